//! Caller-facing response shape for ranked places.

use serde::Serialize;

use crate::{RankOutcome, ScoredPlace};

/// Message attached to a response with no places.
pub const NO_PLACES_MESSAGE: &str = "No places found for this query";

/// A ranked place as presented to callers, optionally with a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceEntry {
    /// The scored place, serialised flat.
    #[serde(flatten)]
    pub place: ScoredPlace,
    /// Generated description of the place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// `{ success, count, places }` envelope returned to API and CLI callers.
///
/// # Examples
/// ```
/// use compass_core::{PlacesResponse, RankOutcome};
///
/// let response = PlacesResponse::from_outcome(RankOutcome::default(), |_| None);
/// assert!(response.success);
/// assert_eq!(response.count, 0);
/// assert_eq!(response.message.as_deref(), Some("No places found for this query"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacesResponse {
    /// Whether the request completed; soft warnings do not clear it.
    pub success: bool,
    /// Number of entries in `places`.
    pub count: usize,
    /// Ranked places.
    pub places: Vec<PlaceEntry>,
    /// Informational message, set when no places were found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rendered non-fatal warnings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PlacesResponse {
    /// Build a response from a ranking outcome, attaching whatever
    /// `summarize` returns for each place.
    #[must_use]
    pub fn from_outcome<F>(outcome: RankOutcome, summarize: F) -> Self
    where
        F: Fn(&ScoredPlace) -> Option<String>,
    {
        let places: Vec<PlaceEntry> = outcome
            .places
            .into_iter()
            .map(|place| PlaceEntry {
                summary: summarize(&place),
                place,
            })
            .collect();
        Self {
            success: true,
            count: places.len(),
            message: places.is_empty().then(|| NO_PLACES_MESSAGE.to_owned()),
            places,
            warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Assessment, AuthenticityLabel, CanonicalPlace, NormalizeError, ProviderKind};
    use crate::RankWarning;
    use rstest::rstest;

    #[rstest]
    fn populated_response_has_no_message() {
        let outcome = RankOutcome {
            places: vec![ScoredPlace::new(
                CanonicalPlace::new("a", "A"),
                Assessment {
                    score: 60,
                    label: AuthenticityLabel::Authentic,
                },
            )],
            warnings: vec![RankWarning::SkippedRecord {
                batch: 0,
                position: 3,
                error: NormalizeError::InvalidRecord {
                    provider: ProviderKind::Legacy,
                },
            }],
        };
        let response = PlacesResponse::from_outcome(outcome, |place| Some(place.id().to_owned()));
        let json = serde_json::to_value(&response).expect("serialise response");
        assert_eq!(json["count"], 1);
        assert_eq!(json["places"][0]["authenticityScore"], 60);
        assert_eq!(json["places"][0]["summary"], "a");
        assert!(json.get("message").is_none());
        assert_eq!(json["warnings"].as_array().map(Vec::len), Some(1));
    }
}
