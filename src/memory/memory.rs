use std::fmt;

/// A retained training example and how many consecutive ruminations it has
/// been classified correctly.
#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
    pub success_streak: u32,
}

impl Memory {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Memory {
        Memory { input, target, success_streak: 0 }
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.success_streak)
    }
}
