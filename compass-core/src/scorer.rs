//! Score canonical places for authenticity.
//!
//! The `Scorer` trait turns a [`CanonicalPlace`](crate::CanonicalPlace)
//! into an [`Assessment`]: a clamped `0..=100` score and its label.

use serde::{Deserialize, Serialize};

use crate::{AuthenticityLabel, CanonicalPlace, ScoredPlace};

/// Highest score any assessment may carry.
pub const MAX_SCORE: u8 = 100;

/// Score and label attached to a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Clamped score in `0..=100`.
    pub score: u8,
    /// Label selected for `score`.
    pub label: AuthenticityLabel,
}

/// Calculate an authenticity assessment for a place.
///
/// Implementations must be deterministic and side-effect free: the same
/// place always yields the same assessment. The method is infallible;
/// missing signals simply contribute nothing. Implementations must be
/// thread-safe (`Send` + `Sync`) so a scorer can be shared across request
/// handlers.
///
/// Use [`Scorer::clamp`] to bring raw totals into range.
///
/// # Examples
///
/// ```rust
/// use compass_core::{
///     Assessment, AuthenticityLabel, CanonicalPlace, LabelThresholds, Scorer,
/// };
///
/// struct IndependentOnly;
///
/// impl Scorer for IndependentOnly {
///     fn score(&self, place: &CanonicalPlace) -> Assessment {
///         let score = Self::clamp(if place.is_chain() { 10 } else { 120 });
///         Assessment { score, label: LabelThresholds::default().classify(score) }
///     }
/// }
///
/// let place = CanonicalPlace::new("1", "Corner Books");
/// let assessment = IndependentOnly.score(&place);
/// assert_eq!(assessment.score, 100);
/// assert_eq!(assessment.label, AuthenticityLabel::HighlyAuthentic);
/// ```
pub trait Scorer: Send + Sync {
    /// Return the assessment for `place`.
    fn score(&self, place: &CanonicalPlace) -> Assessment;

    /// Clamp a raw total into `0..=100`.
    #[must_use]
    fn clamp(raw: i32) -> u8
    where
        Self: Sized,
    {
        u8::try_from(raw.clamp(0, i32::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
    }

    /// Score `place` and attach the assessment to it.
    fn score_place(&self, place: CanonicalPlace) -> ScoredPlace {
        let assessment = self.score(&place);
        ScoredPlace::new(place, assessment)
    }
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, place: &CanonicalPlace) -> Assessment {
        (**self).score(place)
    }
}
