//! Category of a user-submitted comment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The closed set of comment categories.
///
/// Parsing is exact and case-sensitive: `"bug"` is rejected, `"Bug"` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HintCategory {
    Lore,
    Hint,
    Suggestion,
    Bug,
}

impl HintCategory {
    pub const ALL: [HintCategory; 4] = [Self::Lore, Self::Hint, Self::Suggestion, Self::Bug];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lore => "Lore",
            Self::Hint => "Hint",
            Self::Suggestion => "Suggestion",
            Self::Bug => "Bug",
        }
    }
}

impl fmt::Display for HintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HintCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("unknown comment category '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_allowed_category() {
        for category in HintCategory::ALL {
            assert_eq!(category.as_str().parse::<HintCategory>(), Ok(category));
        }
    }

    #[test]
    fn rejects_values_outside_the_enumeration() {
        assert!("bug".parse::<HintCategory>().is_err());
        assert!("Rant".parse::<HintCategory>().is_err());
        assert!("".parse::<HintCategory>().is_err());
    }

    #[test]
    fn serializes_with_its_display_name() {
        let json = serde_json::to_string(&HintCategory::Suggestion).expect("serialize");
        assert_eq!(json, "\"Suggestion\"");
    }
}
