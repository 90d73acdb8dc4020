//! Difficulty tiers.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A named difficulty level.
///
/// Each tier maps to a target number of blanked cells; the higher the
/// target, the harder the puzzle and the more search the carver performs to
/// validate each removal. Tier names are lower-case on the wire
/// (`"easy"`, `"medium"`, `"hard"`, `"extreme"`).
///
/// # Examples
///
/// ```
/// use sudobank_core::Tier;
///
/// assert_eq!(Tier::Hard.blank_target(), 50);
/// assert_eq!(Tier::Extreme.to_string(), "extreme");
/// assert_eq!("hard".parse::<Tier>()?, Tier::Hard);
/// # Ok::<(), sudobank_core::TierParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// 35 blanked cells.
    Easy,
    /// 45 blanked cells.
    Medium,
    /// 50 blanked cells.
    Hard,
    /// 58 blanked cells.
    Extreme,
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown tier {name:?}")]
pub struct TierParseError {
    /// The unrecognized name.
    name: String,
}

impl Tier {
    /// All tiers, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Extreme];

    /// Returns the number of cells the carver tries to blank for this tier.
    #[must_use]
    pub const fn blank_target(self) -> usize {
        match self {
            Self::Easy => 35,
            Self::Medium => 45,
            Self::Hard => 50,
            Self::Extreme => 58,
        }
    }

    /// Returns the lower-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| TierParseError { name: s.to_owned() })
    }
}
