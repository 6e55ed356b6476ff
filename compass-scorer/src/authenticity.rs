//! Table-driven authenticity scoring.
//!
//! The scorer starts from the configured base, adds at most one distance
//! bracket and one age bracket, then the independent boolean signals, and
//! finally clamps the total into `0..=100`.

use std::fmt;

use compass_core::{Assessment, CanonicalPlace, Scorer};
use serde::Serialize;

use crate::{AuthenticityWeights, WeightsError};

/// Signal that contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Place lies within a distance bracket.
    Distance,
    /// Place is an independent business.
    Independent,
    /// Place belongs to a chain.
    Chain,
    /// Place falls within an age bracket.
    Age,
    /// Place has recognised social media accounts.
    SocialMedia,
    /// Place lists a website.
    Website,
    /// Provider has verified the place.
    Verified,
    /// Place has a phone number with a local area code.
    LocalPhone,
}

impl Signal {
    /// Return the signal as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Independent => "independent",
            Self::Chain => "chain",
            Self::Age => "age",
            Self::SocialMedia => "social_media",
            Self::Website => "website",
            Self::Verified => "verified",
            Self::LocalPhone => "local_phone",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    /// Signal that triggered the adjustment.
    pub signal: Signal,
    /// Points added, or removed when negative.
    pub points: i32,
}

/// Itemised account of how a score was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// Starting score.
    pub base: i32,
    /// Adjustments in application order.
    pub adjustments: Vec<Adjustment>,
    /// Unclamped total.
    pub raw_total: i32,
    /// Clamped score and label.
    pub assessment: Assessment,
}

/// Scores places against an [`AuthenticityWeights`] table.
///
/// # Examples
/// ```
/// use compass_core::{AuthenticityLabel, CanonicalPlace, Scorer};
/// use compass_scorer::AuthenticityScorer;
///
/// let place = CanonicalPlace::new("bk-1", "Spine & Crown Books")
///     .with_age_years(3)
///     .with_social_media_count(1);
/// let assessment = AuthenticityScorer::default().score(&place);
/// assert_eq!(assessment.score, 80);
/// assert_eq!(assessment.label, AuthenticityLabel::VeryAuthentic);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthenticityScorer {
    weights: AuthenticityWeights,
}

impl AuthenticityScorer {
    /// Build a scorer from a weight table.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the table fails validation.
    pub fn new(weights: AuthenticityWeights) -> Result<Self, WeightsError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Weight table in use.
    #[must_use]
    pub const fn weights(&self) -> &AuthenticityWeights {
        &self.weights
    }

    /// Score `place` and report every adjustment that applied.
    #[must_use]
    pub fn breakdown(&self, place: &CanonicalPlace) -> ScoreBreakdown {
        let adjustments = self.adjustments(place);
        let raw_total = adjustments
            .iter()
            .fold(self.weights.base, |total, adjustment| {
                total.saturating_add(adjustment.points)
            });
        let score = Self::clamp(raw_total);
        ScoreBreakdown {
            base: self.weights.base,
            adjustments,
            raw_total,
            assessment: Assessment {
                score,
                label: self.weights.thresholds.classify(score),
            },
        }
    }

    fn adjustments(&self, place: &CanonicalPlace) -> Vec<Adjustment> {
        let weights = &self.weights;
        let ownership = if place.is_chain() {
            (Signal::Chain, weights.chain)
        } else {
            (Signal::Independent, weights.independent)
        };
        [
            weights
                .distance_points(place.distance_meters())
                .map(|points| (Signal::Distance, points)),
            Some(ownership),
            weights
                .age_points(place.age_years())
                .map(|points| (Signal::Age, points)),
            weights
                .social_points(place.social_media_count())
                .map(|points| (Signal::SocialMedia, points)),
            place
                .has_website()
                .then_some((Signal::Website, weights.website)),
            place
                .verified()
                .then_some((Signal::Verified, weights.verified)),
            weights
                .is_local_phone(place.phone())
                .then_some((Signal::LocalPhone, weights.local_phone)),
        ]
        .into_iter()
        .flatten()
        .map(|(signal, points)| Adjustment { signal, points })
        .collect()
    }
}

impl Scorer for AuthenticityScorer {
    fn score(&self, place: &CanonicalPlace) -> Assessment {
        self.breakdown(place).assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::AuthenticityLabel;
    use rstest::{fixture, rstest};

    #[fixture]
    fn scorer() -> AuthenticityScorer {
        AuthenticityScorer::default()
    }

    #[rstest]
    #[case(Some(0.0), 15)]
    #[case(Some(499.9), 15)]
    #[case(Some(500.0), 10)]
    #[case(Some(999.0), 10)]
    #[case(Some(1000.0), 5)]
    #[case(Some(1999.0), 5)]
    #[case(Some(2000.0), 0)]
    #[case(None, 0)]
    fn distance_brackets_are_exclusive(
        scorer: AuthenticityScorer,
        #[case] distance: Option<f64>,
        #[case] bonus: i32,
    ) {
        let base = CanonicalPlace::new("p", "P");
        let place = match distance {
            Some(meters) => base.with_distance_meters(meters),
            None => base,
        };
        assert_eq!(scorer.breakdown(&place).raw_total, 70 + bonus);
    }

    #[rstest]
    #[case(None, 0)]
    #[case(Some(0), 0)]
    #[case(Some(2), 0)]
    #[case(Some(3), 5)]
    #[case(Some(5), 5)]
    #[case(Some(6), 10)]
    #[case(Some(10), 10)]
    #[case(Some(11), 15)]
    fn age_brackets_are_exclusive(
        scorer: AuthenticityScorer,
        #[case] age: Option<u32>,
        #[case] bonus: i32,
    ) {
        let base = CanonicalPlace::new("p", "P");
        let place = match age {
            Some(years) => base.with_age_years(years),
            None => base,
        };
        assert_eq!(scorer.breakdown(&place).raw_total, 70 + bonus);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 5)]
    #[case(2, 5)]
    #[case(3, 2)]
    #[case(9, 2)]
    fn social_presence_adjustments(
        scorer: AuthenticityScorer,
        #[case] accounts: u8,
        #[case] bonus: i32,
    ) {
        let place = CanonicalPlace::new("p", "P").with_social_media_count(accounts);
        assert_eq!(scorer.breakdown(&place).raw_total, 70 + bonus);
    }

    #[rstest]
    fn chain_penalty_replaces_independent_bonus(scorer: AuthenticityScorer) {
        let place = CanonicalPlace::new("p", "P").with_chain(Some("Big Burger".into()));
        let breakdown = scorer.breakdown(&place);
        assert_eq!(
            breakdown.adjustments,
            [Adjustment {
                signal: Signal::Chain,
                points: -10
            }]
        );
        assert_eq!(breakdown.assessment.score, 40);
    }

    #[rstest]
    fn total_is_clamped_to_hundred(scorer: AuthenticityScorer) {
        let place = CanonicalPlace::new("p", "P")
            .with_distance_meters(300.0)
            .with_age_years(12)
            .with_social_media_count(2)
            .with_website("https://example.com")
            .with_verified(true);
        let breakdown = scorer.breakdown(&place);
        assert_eq!(breakdown.raw_total, 115);
        assert_eq!(breakdown.assessment.score, 100);
        assert_eq!(breakdown.assessment.label, AuthenticityLabel::HighlyAuthentic);
    }

    #[rstest]
    fn local_area_code_bonus_applies_when_configured() {
        let weights = AuthenticityWeights {
            local_area_codes: vec!["(718)".into()],
            ..AuthenticityWeights::default()
        };
        let scorer = AuthenticityScorer::new(weights).expect("valid weights");
        let local = CanonicalPlace::new("p", "P").with_phone("(718) 555-0134");
        let remote = CanonicalPlace::new("q", "Q").with_phone("(212) 555-0134");
        assert_eq!(scorer.score(&local).score, 75);
        assert_eq!(scorer.score(&remote).score, 70);
    }

    #[rstest]
    fn area_codes_are_ignored_by_default(scorer: AuthenticityScorer) {
        let place = CanonicalPlace::new("p", "P").with_phone("(718) 555-0134");
        assert_eq!(scorer.score(&place).score, 70);
    }

    #[rstest]
    fn negative_totals_clamp_to_zero() {
        let weights = AuthenticityWeights {
            base: 0,
            chain: -80,
            ..AuthenticityWeights::default()
        };
        let scorer = AuthenticityScorer::new(weights).expect("valid weights");
        let place = CanonicalPlace::new("p", "P").with_chain(None);
        let assessment = scorer.score(&place);
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.label, AuthenticityLabel::TouristSpot);
    }
}
