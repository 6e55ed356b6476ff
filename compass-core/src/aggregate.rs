//! Merge, deduplicate, rank and cap scored places from several queries.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::ScoredPlace;

/// Ordering applied to the merged result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankingMode {
    /// Highest authenticity score first.
    #[default]
    Authenticity,
    /// Nearest first; places with an unknown distance sort last.
    Proximity,
}

impl RankingMode {
    /// Return the mode as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authenticity => "authenticity",
            Self::Proximity => "proximity",
        }
    }

    fn compare(self, a: &ScoredPlace, b: &ScoredPlace) -> Ordering {
        match self {
            Self::Authenticity => b.authenticity_score().cmp(&a.authenticity_score()),
            Self::Proximity => {
                match (a.place().distance_meters(), b.place().distance_meters()) {
                    (Some(left), Some(right)) => left.total_cmp(&right),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "authenticity" | "score" => Ok(Self::Authenticity),
            "proximity" | "distance" => Ok(Self::Proximity),
            _ => Err(format!("unknown ranking mode '{s}'")),
        }
    }
}

/// Merge per-query result lists into one ranked list of at most
/// `result_cap` places.
///
/// Lists are flattened in the order given. The first occurrence of an id
/// wins and later duplicates are dropped without merging. The sort is
/// stable, so ties keep their first-seen order.
///
/// # Examples
/// ```
/// use compass_core::{
///     aggregate, Assessment, AuthenticityLabel, CanonicalPlace, RankingMode, ScoredPlace,
/// };
///
/// let scored = |id: &str, score: u8| {
///     ScoredPlace::new(
///         CanonicalPlace::new(id, id),
///         Assessment { score, label: AuthenticityLabel::Authentic },
///     )
/// };
/// let ranked = aggregate(
///     vec![vec![scored("1", 90)], vec![scored("2", 95)], vec![scored("1", 90)]],
///     10,
///     RankingMode::Authenticity,
/// );
/// let ids: Vec<&str> = ranked.iter().map(ScoredPlace::id).collect();
/// assert_eq!(ids, ["2", "1"]);
/// ```
#[must_use]
pub fn aggregate<I>(query_results: I, result_cap: usize, mode: RankingMode) -> Vec<ScoredPlace>
where
    I: IntoIterator<Item = Vec<ScoredPlace>>,
{
    let mut seen = HashSet::new();
    let mut merged: Vec<ScoredPlace> = query_results
        .into_iter()
        .flatten()
        .filter(|place| seen.insert(place.id().to_owned()))
        .collect();
    merged.sort_by(|a, b| mode.compare(a, b));
    merged.truncate(result_cap);
    merged
}
