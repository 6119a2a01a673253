//! Academic period value object

use serde::{Deserialize, Serialize};

/// A (year, semester) pair during which nominations are accepted.
///
/// At most one nomination exists per actor per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AcademicPeriod {
    pub year: i32,
    pub semester: u8,
}

impl AcademicPeriod {
    pub fn new(year: i32, semester: u8) -> Self {
        Self { year, semester }
    }
}

impl std::fmt::Display for AcademicPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.year, self.semester)
    }
}
