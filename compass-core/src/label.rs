//! Authenticity labels and the score thresholds that select them.
//!
//! Labels are ordered from least to most authentic so callers can compare
//! them directly.
//!
//! # Examples
//! ```
//! use compass_core::{AuthenticityLabel, LabelThresholds};
//!
//! let thresholds = LabelThresholds::default();
//! assert_eq!(thresholds.classify(90), AuthenticityLabel::HighlyAuthentic);
//! assert_eq!(thresholds.classify(40).as_str(), "Somewhat Authentic");
//! assert!(AuthenticityLabel::Authentic > AuthenticityLabel::TouristSpot);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Human-readable authenticity category for a scored place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AuthenticityLabel {
    /// Scores below every other threshold.
    #[serde(rename = "Tourist Spot")]
    TouristSpot,
    /// Scores at or above the "somewhat" threshold.
    #[serde(rename = "Somewhat Authentic")]
    SomewhatAuthentic,
    /// Scores at or above the "authentic" threshold.
    #[serde(rename = "Authentic")]
    Authentic,
    /// Scores at or above the "very" threshold.
    #[serde(rename = "Very Authentic")]
    VeryAuthentic,
    /// Scores at or above the "highly" threshold.
    #[serde(rename = "Highly Authentic")]
    HighlyAuthentic,
}

impl AuthenticityLabel {
    /// All labels in ascending order of authenticity.
    pub const ALL: [Self; 5] = [
        Self::TouristSpot,
        Self::SomewhatAuthentic,
        Self::Authentic,
        Self::VeryAuthentic,
        Self::HighlyAuthentic,
    ];

    /// Return the display text for the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TouristSpot => "Tourist Spot",
            Self::SomewhatAuthentic => "Somewhat Authentic",
            Self::Authentic => "Authentic",
            Self::VeryAuthentic => "Very Authentic",
            Self::HighlyAuthentic => "Highly Authentic",
        }
    }

    /// Return the presentation class token used by clients to colour the
    /// label.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::TouristSpot => "auth-low",
            Self::SomewhatAuthentic => "auth-okay",
            Self::Authentic => "auth-good",
            Self::VeryAuthentic => "auth-very",
            Self::HighlyAuthentic => "auth-high",
        }
    }

    /// Position of the label in the authenticity ordering, starting at `0`
    /// for [`AuthenticityLabel::TouristSpot`].
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::TouristSpot => 0,
            Self::SomewhatAuthentic => 1,
            Self::Authentic => 2,
            Self::VeryAuthentic => 3,
            Self::HighlyAuthentic => 4,
        }
    }
}

impl fmt::Display for AuthenticityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthenticityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown authenticity label '{s}'"))
    }
}

/// Errors returned by [`LabelThresholds::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelThresholdsError {
    /// A threshold exceeded the maximum score.
    #[error("label threshold {value} exceeds the maximum score of 100")]
    OutOfRange {
        /// Offending threshold.
        value: u8,
    },
    /// Thresholds were not strictly descending from "highly" to "somewhat".
    #[error("label thresholds must be strictly descending")]
    NotDescending,
}

/// Minimum scores for each label above [`AuthenticityLabel::TouristSpot`].
///
/// Labels are evaluated top-down; the first threshold the score reaches
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds", into = "RawThresholds")]
pub struct LabelThresholds {
    highly: u8,
    very: u8,
    authentic: u8,
    somewhat: u8,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            highly: 85,
            very: 70,
            authentic: 55,
            somewhat: 40,
        }
    }
}

impl LabelThresholds {
    /// Validate and construct a threshold set.
    ///
    /// # Errors
    /// Returns [`LabelThresholdsError::OutOfRange`] when a value exceeds
    /// `100` and [`LabelThresholdsError::NotDescending`] when the values are
    /// not strictly descending.
    pub fn new(
        highly: u8,
        very: u8,
        authentic: u8,
        somewhat: u8,
    ) -> Result<Self, LabelThresholdsError> {
        let ordered = [highly, very, authentic, somewhat];
        if let Some(&value) = ordered.iter().find(|&&value| value > 100) {
            return Err(LabelThresholdsError::OutOfRange { value });
        }
        if ordered.windows(2).any(|pair| pair.first() <= pair.last()) {
            return Err(LabelThresholdsError::NotDescending);
        }
        Ok(Self {
            highly,
            very,
            authentic,
            somewhat,
        })
    }

    /// Map a clamped score to its label.
    #[must_use]
    pub const fn classify(&self, score: u8) -> AuthenticityLabel {
        if score >= self.highly {
            AuthenticityLabel::HighlyAuthentic
        } else if score >= self.very {
            AuthenticityLabel::VeryAuthentic
        } else if score >= self.authentic {
            AuthenticityLabel::Authentic
        } else if score >= self.somewhat {
            AuthenticityLabel::SomewhatAuthentic
        } else {
            AuthenticityLabel::TouristSpot
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawThresholds {
    highly: u8,
    very: u8,
    authentic: u8,
    somewhat: u8,
}

impl TryFrom<RawThresholds> for LabelThresholds {
    type Error = LabelThresholdsError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.highly, raw.very, raw.authentic, raw.somewhat)
    }
}

impl From<LabelThresholds> for RawThresholds {
    fn from(thresholds: LabelThresholds) -> Self {
        Self {
            highly: thresholds.highly,
            very: thresholds.very,
            authentic: thresholds.authentic,
            somewhat: thresholds.somewhat,
        }
    }
}
