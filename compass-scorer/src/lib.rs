//! Authenticity scoring and place summaries for the Compass engine.
//!
//! The crate provides two capabilities on top of `compass-core`:
//! - **Scoring**: [`AuthenticityScorer`] implements
//!   [`Scorer`](compass_core::Scorer) over a table of [`AuthenticityWeights`].
//!   The default table starts every place at 50, rewards proximity, age,
//!   independence and a modest online presence, and clamps the total into
//!   `0..=100`. Tables can be loaded from JSON to tune the heuristics
//!   without a rebuild, and [`AuthenticityScorer::breakdown`] itemises how a
//!   score was reached.
//! - **Summaries**: [`summarize`] renders a short description of a scored
//!   place for display alongside its label.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use compass_scorer::{AuthenticityScorer, AuthenticityWeights};
//!
//! let weights = AuthenticityWeights::from_json_file(Utf8Path::new("weights.json"))
//!     .expect("load weights");
//! let scorer = AuthenticityScorer::new(weights).expect("valid weights");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod authenticity;
mod error;
mod summary;
mod weights;

pub use authenticity::{Adjustment, AuthenticityScorer, ScoreBreakdown, Signal};
pub use error::WeightsError;
pub use summary::summarize;
pub use weights::{AgeBracket, AuthenticityWeights, DistanceBracket, SocialAdjustment};
