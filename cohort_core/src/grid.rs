//! Placement grid - single-occupancy bookkeeping of where students sit.
//!
//! The grid is a bounded, non-toroidal `width x height` board. Every
//! student is placed once, on a uniformly random empty cell, when the
//! cohort is built. Placement has no effect on majors, hours or GPA.

use cohort_env::StudentId;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building or filling the grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was zero
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    
    /// No empty cell left
    #[error("Grid is full ({capacity} cells)")]
    Full { capacity: usize },
    
    /// Student already has a cell
    #[error("Student {0} is already placed")]
    AlreadyPlaced(StudentId),
}

/// Grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

/// Single-occupancy placement grid.
#[derive(Debug, Clone)]
pub struct PlacementGrid {
    width: usize,
    height: usize,
    
    /// Row-major occupancy, `None` = empty
    cells: Vec<Option<StudentId>>,
    
    /// Reverse index from student to cell
    positions: HashMap<StudentId, Cell>,
}

impl PlacementGrid {
    /// Creates an empty grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
            positions: HashMap::new(),
        })
    }
    
    /// Places `student` on a random empty cell and returns it.
    pub fn place_random(&mut self, student: StudentId, rng: &mut dyn RngCore) -> Result<Cell, GridError> {
        if self.positions.contains_key(&student) {
            return Err(GridError::AlreadyPlaced(student));
        }
        
        let empties: Vec<usize> = self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(idx, _)| idx)
            .collect();
        
        let idx = *empties
            .choose(rng)
            .ok_or(GridError::Full { capacity: self.capacity() })?;
        
        let cell = Cell { x: idx % self.width, y: idx / self.width };
        self.cells[idx] = Some(student);
        self.positions.insert(student, cell);
        Ok(cell)
    }
    
    /// Cell occupied by `student`, if placed.
    pub fn position_of(&self, student: StudentId) -> Option<Cell> {
        self.positions.get(&student).copied()
    }
    
    /// Student on `cell`, if any.
    pub fn occupant(&self, cell: Cell) -> Option<StudentId> {
        if cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        self.cells[cell.y * self.width + cell.x]
    }
    
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }
    
    pub fn placed(&self) -> usize {
        self.positions.len()
    }
    
    pub fn is_full(&self) -> bool {
        self.placed() == self.capacity()
    }
    
    pub fn width(&self) -> usize {
        self.width
    }
    
    pub fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    
    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            PlacementGrid::new(0, 4).unwrap_err(),
            GridError::ZeroDimension { width: 0, height: 4 }
        );
    }
    
    #[test]
    fn test_fill_grid_single_occupancy() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = PlacementGrid::new(3, 2).unwrap();
        
        let mut cells = Vec::new();
        for i in 0..6 {
            let cell = grid.place_random(StudentId(i), &mut rng).unwrap();
            assert_eq!(grid.occupant(cell), Some(StudentId(i)));
            cells.push(cell);
        }
        cells.sort_by_key(|c| (c.y, c.x));
        cells.dedup();
        
        assert_eq!(cells.len(), 6);
        assert!(grid.is_full());
        assert_eq!(
            grid.place_random(StudentId(6), &mut rng).unwrap_err(),
            GridError::Full { capacity: 6 }
        );
    }
    
    #[test]
    fn test_double_placement_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = PlacementGrid::new(4, 4).unwrap();
        
        grid.place_random(StudentId(1), &mut rng).unwrap();
        
        assert_eq!(
            grid.place_random(StudentId(1), &mut rng).unwrap_err(),
            GridError::AlreadyPlaced(StudentId(1))
        );
        assert_eq!(grid.placed(), 1);
    }
    
    #[test]
    fn test_placement_deterministic() {
        let place = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut grid = PlacementGrid::new(10, 10).unwrap();
            (0..20)
                .map(|i| grid.place_random(StudentId(i), &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        
        assert_eq!(place(42), place(42));
    }
    
    #[test]
    fn test_out_of_bounds_occupant() {
        let grid = PlacementGrid::new(2, 2).unwrap();
        assert_eq!(grid.occupant(Cell { x: 5, y: 0 }), None);
    }
}
