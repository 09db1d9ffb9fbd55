//! Scheduling tags

use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::BuildError;

/// How a command is scheduled relative to its neighbours in a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tag {
    /// Runs alone, after everything before it has completed
    Sequential,
    /// Runs together with adjacent concurrent commands
    Concurrent,
}

impl Tag {
    /// Lowercase name, as accepted by `from_str`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Tag::Sequential => "sequential",
            Tag::Concurrent => "concurrent",
        }
    }
}

impl FromStr for Tag {
    type Err = BuildError;

    /// Parse a tag name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("sequential") {
            Ok(Tag::Sequential)
        } else if s.eq_ignore_ascii_case("concurrent") {
            Ok(Tag::Concurrent)
        } else {
            Err(BuildError::UnknownTag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("sequential".parse(), Ok(Tag::Sequential));
        assert_eq!("Concurrent".parse(), Ok(Tag::Concurrent));
        assert_eq!("parallel".parse::<Tag>(), Err(BuildError::UnknownTag));
        assert_eq!("".parse::<Tag>(), Err(BuildError::UnknownTag));
    }

    #[test]
    fn test_name_round_trips() {
        for tag in [Tag::Sequential, Tag::Concurrent] {
            assert_eq!(tag.as_str().parse(), Ok(tag));
        }
    }
}
