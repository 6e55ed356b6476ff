//! Places carrying their authenticity assessment.

use serde::Serialize;

use crate::{Assessment, AuthenticityLabel, CanonicalPlace};

/// A [`CanonicalPlace`] with its score and label attached.
///
/// Serialises flat: the place's fields sit alongside `authenticityScore`,
/// `authenticityLabel` and `authenticityClass`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlace {
    #[serde(flatten)]
    place: CanonicalPlace,
    authenticity_score: u8,
    authenticity_label: AuthenticityLabel,
    authenticity_class: &'static str,
}

impl ScoredPlace {
    /// Attach `assessment` to `place`.
    #[must_use]
    pub const fn new(place: CanonicalPlace, assessment: Assessment) -> Self {
        Self {
            place,
            authenticity_score: assessment.score,
            authenticity_label: assessment.label,
            authenticity_class: assessment.label.css_class(),
        }
    }

    /// The underlying place.
    #[must_use]
    pub const fn place(&self) -> &CanonicalPlace {
        &self.place
    }

    /// Identifier of the underlying place.
    #[must_use]
    pub fn id(&self) -> &str {
        self.place.id()
    }

    /// Clamped score in `0..=100`.
    #[must_use]
    pub const fn authenticity_score(&self) -> u8 {
        self.authenticity_score
    }

    /// Label selected for the score.
    #[must_use]
    pub const fn authenticity_label(&self) -> AuthenticityLabel {
        self.authenticity_label
    }

    /// Score and label as an [`Assessment`].
    #[must_use]
    pub const fn assessment(&self) -> Assessment {
        Assessment {
            score: self.authenticity_score,
            label: self.authenticity_label,
        }
    }

    /// Consume the wrapper and return the place.
    #[must_use]
    pub fn into_place(self) -> CanonicalPlace {
        self.place
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn serialises_flat_with_label_text_and_class() {
        let scored = ScoredPlace::new(
            CanonicalPlace::new("fsq-1", "Blue Door Coffee"),
            Assessment {
                score: 88,
                label: AuthenticityLabel::HighlyAuthentic,
            },
        );
        let json = serde_json::to_value(&scored).expect("serialise scored place");
        assert_eq!(json["id"], "fsq-1");
        assert_eq!(json["authenticityScore"], 88);
        assert_eq!(json["authenticityLabel"], "Highly Authentic");
        assert_eq!(json["authenticityClass"], "auth-high");
    }
}
