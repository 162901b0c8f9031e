//! Game outcome codes printed by the engine

use std::fmt;

/// Result of one trial from the tuned agent's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Recognise engine output consisting of a single outcome code
    ///
    /// Surrounding whitespace is ignored; anything else yields `None`.
    pub fn from_output(output: &str) -> Option<Self> {
        match output.trim() {
            "W" => Some(Outcome::Win),
            "L" => Some(Outcome::Loss),
            "D" => Some(Outcome::Draw),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
            Outcome::Draw => 'D',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_output() {
        assert_eq!(Outcome::from_output("W\n"), Some(Outcome::Win));
        assert_eq!(Outcome::from_output("L"), Some(Outcome::Loss));
        assert_eq!(Outcome::from_output("  D\r\n"), Some(Outcome::Draw));
    }

    #[test]
    fn test_unrecognised_output() {
        assert_eq!(Outcome::from_output(""), None);
        assert_eq!(Outcome::from_output("WW"), None);
        assert_eq!(Outcome::from_output("w"), None);
        assert_eq!(Outcome::from_output("An agent error occured\nW"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::Draw.to_string(), "D");
    }
}
