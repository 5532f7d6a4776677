//! Priority tiers for search result ranking.

use serde::{Deserialize, Serialize};

/// Ranking class for a search result. Lower value sorts first.
///
/// The tier is assigned from how a keyword matched: an exact hit on the
/// internal name beats a hit on the requested locale's label, which beats a
/// hit on the fallback locale's label, which beats any other match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultPriority {
    /// Keyword equals the internal name.
    ExactMatch,
    /// Keyword matched a label in the requested locale.
    PrimaryLocaleMatch,
    /// Keyword matched a label in the fallback locale.
    SecondaryLocaleMatch,
    /// Everything else. Default for untiered matches.
    AnyMatch,
}

impl ResultPriority {
    /// Numeric tier value as used in the cached wire representation.
    #[must_use]
    pub const fn value(&self) -> u32 {
        match self {
            Self::ExactMatch => 1,
            Self::PrimaryLocaleMatch => 10,
            Self::SecondaryLocaleMatch => 11,
            Self::AnyMatch => 100,
        }
    }
}

impl Default for ResultPriority {
    fn default() -> Self {
        Self::AnyMatch
    }
}
