//! Tunable adjustment table for authenticity scoring.
//!
//! The defaults reproduce the canonical table: base 50, one distance
//! bracket, one age bracket, and independent boolean adjustments for chain
//! status, social presence, website and verification. Any field may be
//! overridden from a JSON document; omitted fields keep their defaults.

use std::io::BufReader;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use compass_core::LabelThresholds;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::WeightsError;

/// Points awarded when a place lies closer than `below_meters`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBracket {
    /// Exclusive upper bound in meters.
    pub below_meters: f64,
    /// Adjustment applied inside the bracket.
    pub points: i32,
}

/// Points awarded when a place is older than `over_years`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBracket {
    /// Exclusive lower bound in whole years.
    pub over_years: u32,
    /// Adjustment applied inside the bracket.
    pub points: i32,
}

/// Adjustments for the number of recognised social media accounts.
///
/// One account up to `many_from - 1` accounts earns `few`; `many_from` or
/// more earns `many`. No accounts earns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialAdjustment {
    /// Adjustment for a small, personal social presence.
    pub few: i32,
    /// Adjustment for a broad, marketing-style social presence.
    pub many: i32,
    /// Account count from which `many` applies.
    pub many_from: u8,
}

impl Default for SocialAdjustment {
    fn default() -> Self {
        Self {
            few: 5,
            many: 2,
            many_from: 3,
        }
    }
}

/// Weight table driving [`AuthenticityScorer`](crate::AuthenticityScorer).
///
/// # Examples
/// ```
/// use compass_scorer::AuthenticityWeights;
///
/// let weights = AuthenticityWeights::from_json_str(r#"{ "chain": -25 }"#)
///     .expect("valid weights");
/// assert_eq!(weights.chain, -25);
/// assert_eq!(weights.base, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticityWeights {
    /// Starting score before adjustments.
    pub base: i32,
    /// Distance brackets, nearest first. The first matching bracket wins;
    /// unknown or larger distances earn nothing.
    pub distance_brackets: Vec<DistanceBracket>,
    /// Adjustment for an independent business.
    pub independent: i32,
    /// Adjustment for a chain location.
    pub chain: i32,
    /// Age brackets, oldest first. The first matching bracket wins; unknown
    /// or smaller ages earn nothing.
    pub age_brackets: Vec<AgeBracket>,
    /// Social presence adjustments.
    pub social: SocialAdjustment,
    /// Adjustment when the place lists a website.
    pub website: i32,
    /// Adjustment when the provider has verified the place.
    pub verified: i32,
    /// Phone prefixes, such as `"(718)"`, that mark a local number.
    pub local_area_codes: Vec<String>,
    /// Adjustment when the phone number contains a local area code.
    pub local_phone: i32,
    /// Label thresholds applied to the clamped score.
    pub thresholds: LabelThresholds,
}

impl Default for AuthenticityWeights {
    fn default() -> Self {
        Self {
            base: 50,
            distance_brackets: vec![
                DistanceBracket {
                    below_meters: 500.0,
                    points: 15,
                },
                DistanceBracket {
                    below_meters: 1000.0,
                    points: 10,
                },
                DistanceBracket {
                    below_meters: 2000.0,
                    points: 5,
                },
            ],
            independent: 20,
            chain: -10,
            age_brackets: vec![
                AgeBracket {
                    over_years: 10,
                    points: 15,
                },
                AgeBracket {
                    over_years: 5,
                    points: 10,
                },
                AgeBracket {
                    over_years: 2,
                    points: 5,
                },
            ],
            social: SocialAdjustment::default(),
            website: 5,
            verified: 5,
            local_area_codes: Vec::new(),
            local_phone: 5,
            thresholds: LabelThresholds::default(),
        }
    }
}

impl AuthenticityWeights {
    /// Validate the table and return it.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when a distance bound is not positive and
    /// finite, brackets are out of order, or the social threshold is below
    /// `2`.
    pub fn validate(self) -> Result<Self, WeightsError> {
        if let Some(bracket) = self
            .distance_brackets
            .iter()
            .find(|bracket| !(bracket.below_meters.is_finite() && bracket.below_meters > 0.0))
        {
            return Err(WeightsError::InvalidDistanceBound {
                below_meters: bracket.below_meters,
            });
        }
        if self
            .distance_brackets
            .windows(2)
            .any(|pair| matches!(pair, [near, far] if near.below_meters >= far.below_meters))
        {
            return Err(WeightsError::UnsortedDistanceBrackets);
        }
        if self
            .age_brackets
            .windows(2)
            .any(|pair| matches!(pair, [old, young] if old.over_years <= young.over_years))
        {
            return Err(WeightsError::UnsortedAgeBrackets);
        }
        if self.social.many_from < 2 {
            return Err(WeightsError::InvalidSocialThreshold {
                many_from: self.social.many_from,
            });
        }
        Ok(self)
    }

    /// Parse and validate weights from a JSON string.
    ///
    /// # Errors
    /// Returns [`WeightsError::Decode`] for malformed JSON and any
    /// [`validate`](Self::validate) failure.
    pub fn from_json_str(json: &str) -> Result<Self, WeightsError> {
        let weights: Self =
            serde_json::from_str(json).map_err(|source| WeightsError::Decode { source })?;
        weights.validate()
    }

    /// Load and validate weights from a JSON file.
    ///
    /// # Errors
    /// Returns [`WeightsError::Read`] when the file cannot be opened,
    /// [`WeightsError::Parse`] when it is not valid weights JSON, and any
    /// [`validate`](Self::validate) failure.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, WeightsError> {
        let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
            WeightsError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let weights: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| WeightsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let validated = weights.validate()?;
        debug!(
            "loaded authenticity weights from {path} (base {}, {} distance brackets, {} age brackets)",
            validated.base,
            validated.distance_brackets.len(),
            validated.age_brackets.len()
        );
        Ok(validated)
    }

    /// Adjustment for a distance, if any bracket matches.
    pub(crate) fn distance_points(&self, meters: Option<f64>) -> Option<i32> {
        let distance = meters?;
        self.distance_brackets
            .iter()
            .find(|bracket| distance < bracket.below_meters)
            .map(|bracket| bracket.points)
    }

    /// Adjustment for an age, if any bracket matches.
    pub(crate) fn age_points(&self, years: Option<u32>) -> Option<i32> {
        let age = years?;
        self.age_brackets
            .iter()
            .find(|bracket| age > bracket.over_years)
            .map(|bracket| bracket.points)
    }

    /// Adjustment for a social account count, if any.
    pub(crate) const fn social_points(&self, count: u8) -> Option<i32> {
        match count {
            0 => None,
            n if n >= self.social.many_from => Some(self.social.many),
            _ => Some(self.social.few),
        }
    }

    /// Whether `phone` contains one of the configured local area codes.
    pub(crate) fn is_local_phone(&self, phone: Option<&str>) -> bool {
        phone.is_some_and(|number| {
            self.local_area_codes
                .iter()
                .filter(|code| !code.trim().is_empty())
                .any(|code| number.contains(code.as_str()))
        })
    }
}
