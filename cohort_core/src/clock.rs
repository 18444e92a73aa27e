//! The semester clock - a finite, deterministic sequence of semester codes.
//!
//! Codes have the form `{Season}{Position}SEQ{Sub}`:
//!
//! ```text
//! F1SEQ1 F1SEQ2 S1SEQ1 S1SEQ2 F2SEQ1 F2SEQ2 ... S6SEQ1 S6SEQ2
//! ```
//!
//! Each position is paired with the season slots F, F, S, S before
//! advancing, and `Sub` alternates 1, 2 across the whole sequence. The
//! clock cannot be rewound; a new run needs a new clock.

use serde::{Deserialize, Serialize};

/// First and last position in the sequence.
pub const POSITIONS: std::ops::RangeInclusive<u8> = 1..=6;

/// Season slots visited for every position, in order.
pub const SEASON_SLOTS: [Season; 4] = [Season::Fall, Season::Fall, Season::Spring, Season::Spring];

/// Substring marking the very first semester.
const FIRST_SEMESTER_MARKER: &str = "F1SEQ1";

/// Substring marking every second semester.
const SECOND_SEQ_MARKER: &str = "SEQ2";

/// Academic season of a semester code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Fall,
    Spring,
}

impl Season {
    /// Letter used in semester codes.
    pub fn letter(&self) -> char {
        match self {
            Season::Fall => 'F',
            Season::Spring => 'S',
        }
    }
    
    /// Parses the season from the leading letter of a semester code.
    pub fn of_code(code: &str) -> Option<Season> {
        match code.chars().next()? {
            'F' => Some(Season::Fall),
            'S' => Some(Season::Spring),
            _ => None,
        }
    }
}

/// Result of drawing from the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemesterTick {
    /// The next semester code
    Semester(String),
    
    /// Every code has been emitted; the run is over
    Exhausted,
}

/// Returns the full ordered sequence of semester codes.
pub fn semester_codes() -> Vec<String> {
    let mut codes = Vec::with_capacity(POSITIONS.len() * SEASON_SLOTS.len());
    let subs = [1u8, 2].into_iter().cycle();
    
    let pairs = POSITIONS.flat_map(|pos| SEASON_SLOTS.into_iter().map(move |season| (pos, season)));
    for ((pos, season), sub) in pairs.zip(subs) {
        codes.push(format!("{}{}SEQ{}", season.letter(), pos, sub));
    }
    
    codes
}

/// True if a major transition may be evaluated in this semester.
pub fn is_major_relevant(code: &str) -> bool {
    code.contains(FIRST_SEMESTER_MARKER) || code.contains(SECOND_SEQ_MARKER)
}

/// Parses the position (year-half index, 1..=6) from a semester code or tag.
pub fn position_of(code: &str) -> Option<u8> {
    let digits: String = code.chars().skip(1).take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Derives the major-tagged label of a semester, e.g. `F1SEQ2_MAJOR`.
pub fn major_tag(code: &str) -> String {
    format!("{}_MAJOR", code)
}

/// Finite generator of semester codes.
///
/// # Example
/// ```
/// use cohort_core::{SemesterClock, SemesterTick};
///
/// let mut clock = SemesterClock::new();
/// assert_eq!(clock.next_semester(), SemesterTick::Semester("F1SEQ1".to_string()));
/// assert_eq!(clock.next_semester(), SemesterTick::Semester("F1SEQ2".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct SemesterClock {
    codes: Vec<String>,
    cursor: usize,
}

impl SemesterClock {
    /// Creates a clock positioned before the first semester.
    pub fn new() -> Self {
        Self {
            codes: semester_codes(),
            cursor: 0,
        }
    }
    
    /// Draws the next semester code, or [`SemesterTick::Exhausted`].
    ///
    /// Once exhausted, every later draw is exhausted as well.
    pub fn next_semester(&mut self) -> SemesterTick {
        match self.codes.get(self.cursor) {
            Some(code) => {
                self.cursor += 1;
                SemesterTick::Semester(code.clone())
            }
            None => SemesterTick::Exhausted,
        }
    }
    
    /// Number of codes emitted so far.
    pub fn emitted(&self) -> usize {
        self.cursor
    }
    
    /// Number of codes still to come.
    pub fn remaining(&self) -> usize {
        self.codes.len() - self.cursor
    }
    
    /// Total length of the sequence.
    pub fn len(&self) -> usize {
        self.codes.len()
    }
    
    /// True if the sequence has no codes at all.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
    
    /// The full code sequence, independent of the cursor.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

impl Default for SemesterClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    fn drain(clock: &mut SemesterClock) -> Vec<String> {
        let mut out = Vec::new();
        while let SemesterTick::Semester(code) = clock.next_semester() {
            out.push(code);
        }
        out
    }
    
    #[test]
    fn test_sequence_prefix() {
        let codes = semester_codes();
        assert_eq!(
            &codes[..8],
            &["F1SEQ1", "F1SEQ2", "S1SEQ1", "S1SEQ2", "F2SEQ1", "F2SEQ2", "S2SEQ1", "S2SEQ2"]
        );
        assert_eq!(codes.last().map(String::as_str), Some("S6SEQ2"));
    }
    
    #[test]
    fn test_sequence_pattern() {
        for (i, code) in semester_codes().iter().enumerate() {
            let pos = i / 4 + 1;
            let season = if i % 4 < 2 { 'F' } else { 'S' };
            let sub = i % 2 + 1;
            assert_eq!(code, &format!("{}{}SEQ{}", season, pos, sub));
        }
    }
    
    #[test]
    fn test_clock_exhausts_after_24_codes() {
        let mut clock = SemesterClock::new();
        assert_eq!(clock.len(), 24);
        
        let codes = drain(&mut clock);
        
        assert_eq!(codes.len(), 24);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.next_semester(), SemesterTick::Exhausted);
        assert_eq!(clock.next_semester(), SemesterTick::Exhausted);
    }
    
    #[test]
    fn test_clock_deterministic() {
        let mut a = SemesterClock::new();
        let mut b = SemesterClock::new();
        assert_eq!(drain(&mut a), drain(&mut b));
    }
    
    #[test]
    fn test_major_relevant_semesters() {
        assert!(is_major_relevant("F1SEQ1"));
        assert!(is_major_relevant("F1SEQ2"));
        assert!(is_major_relevant("S3SEQ2"));
        assert!(!is_major_relevant("S1SEQ1"));
        assert!(!is_major_relevant("F2SEQ1"));
        
        let relevant = semester_codes().into_iter().filter(|c| is_major_relevant(c)).count();
        assert_eq!(relevant, 13);
    }
    
    #[test]
    fn test_major_tag_and_season() {
        assert_eq!(major_tag("F1SEQ1"), "F1SEQ1_MAJOR");
        assert_eq!(Season::of_code("S4SEQ1"), Some(Season::Spring));
        assert_eq!(Season::of_code("F4SEQ1"), Some(Season::Fall));
        assert_eq!(Season::of_code(""), None);
    }
    
    #[test]
    fn test_position_of() {
        assert_eq!(position_of("F1SEQ1"), Some(1));
        assert_eq!(position_of("S6SEQ2_MAJOR"), Some(6));
        assert_eq!(position_of("garbage"), None);
    }
}
