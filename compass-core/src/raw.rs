//! Raw place payloads as returned by the supported places providers.
//!
//! Two record shapes are understood:
//! - [`LegacyPlace`]: the v3 search API, keyed by `fsq_id` with coordinates
//!   under `geocodes.main`.
//! - [`PlacesApiPlace`]: the newer places API, keyed by `fsq_place_id` with
//!   top-level `latitude` and `longitude`.
//!
//! A payload body is either a bare JSON array of records or an object with a
//! `results` array. [`ProviderKind`] selects which record shape to decode.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// The provider shape a payload was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    /// The v3 search API (`fsq_id`, `geocodes.main`).
    #[default]
    Legacy,
    /// The places API (`fsq_place_id`, top-level coordinates).
    PlacesApi,
}

impl ProviderKind {
    /// Return the provider as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::PlacesApi => "places",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "v3" => Ok(Self::Legacy),
            "places" | "places-api" => Ok(Self::PlacesApi),
            _ => Err(format!("unknown provider '{s}'")),
        }
    }
}

/// A raw record tagged with the provider shape it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPlace {
    /// Record from the v3 search API.
    Legacy(LegacyPlace),
    /// Record from the places API.
    PlacesApi(PlacesApiPlace),
}

impl RawPlace {
    /// Provider shape of this record.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        match self {
            Self::Legacy(_) => ProviderKind::Legacy,
            Self::PlacesApi(_) => ProviderKind::PlacesApi,
        }
    }

    /// Decode a payload body into records of the given provider shape.
    ///
    /// # Errors
    /// Returns the `serde_json` error when the body is not a record array or
    /// a `results` envelope of the selected shape.
    ///
    /// # Examples
    /// ```
    /// use compass_core::{ProviderKind, RawPlace};
    ///
    /// let body = r#"{"results":[{"fsq_id":"abc","name":"Corner Books"}]}"#;
    /// let records = RawPlace::parse_payload(ProviderKind::Legacy, body)?;
    /// assert_eq!(records.len(), 1);
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn parse_payload(kind: ProviderKind, body: &str) -> Result<Vec<Self>, serde_json::Error> {
        match kind {
            ProviderKind::Legacy => serde_json::from_str::<Payload<LegacyPlace>>(body)
                .map(|payload| payload.into_records().into_iter().map(Self::Legacy).collect()),
            ProviderKind::PlacesApi => serde_json::from_str::<Payload<PlacesApiPlace>>(body)
                .map(|payload| {
                    payload
                        .into_records()
                        .into_iter()
                        .map(Self::PlacesApi)
                        .collect()
                }),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Bare(Vec<T>),
    Envelope { results: Vec<T> },
}

impl<T> Payload<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Self::Bare(records) | Self::Envelope { results: records } => records,
        }
    }
}

/// A category label attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawCategory {
    /// Display name of the category.
    #[serde(default)]
    pub name: Option<String>,
}

/// A chain affiliation attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawChain {
    /// Provider identifier of the chain.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the chain.
    #[serde(default)]
    pub name: Option<String>,
}

/// Address components reported for a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawLocation {
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// City or neighbourhood.
    #[serde(default)]
    pub locality: Option<String>,
    /// State or region.
    #[serde(default)]
    pub region: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub postcode: Option<String>,
    /// Country code.
    #[serde(default)]
    pub country: Option<String>,
    /// Provider-formatted single-line address.
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// Social-media handles keyed by platform.
///
/// Only the recognised platforms are decoded; any others are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawSocialMedia {
    /// Facebook page identifier.
    #[serde(default)]
    pub facebook_id: Option<String>,
    /// Instagram handle.
    #[serde(default)]
    pub instagram: Option<String>,
    /// Twitter handle.
    #[serde(default)]
    pub twitter: Option<String>,
}

/// Latitude and longitude pair as reported by the v3 API.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawLatLng {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Coordinate groups reported by the v3 API.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct RawGeocodes {
    /// Main entrance or centroid.
    #[serde(default)]
    pub main: Option<RawLatLng>,
}

/// Record returned by the v3 search API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LegacyPlace {
    /// Provider identifier.
    #[serde(default)]
    pub fsq_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Category labels, most specific first.
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    /// Distance from the query origin in meters.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Address components.
    #[serde(default)]
    pub location: Option<RawLocation>,
    /// Coordinate groups.
    #[serde(default)]
    pub geocodes: Option<RawGeocodes>,
    /// Chain affiliations; absent or empty for independents.
    #[serde(default)]
    pub chains: Option<Vec<RawChain>>,
    /// Creation timestamp of the listing.
    #[serde(default)]
    pub date_created: Option<String>,
    /// Whether the listing was verified.
    #[serde(default)]
    pub verified: Option<bool>,
    /// Social-media handles.
    #[serde(default)]
    pub social_media: Option<RawSocialMedia>,
    /// Website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub tel: Option<String>,
}

/// Record returned by the places API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PlacesApiPlace {
    /// Provider identifier.
    #[serde(default)]
    pub fsq_place_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Category labels, most specific first.
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    /// Distance from the query origin in meters.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Address components.
    #[serde(default)]
    pub location: Option<RawLocation>,
    /// Chain affiliations; absent or empty for independents.
    #[serde(default)]
    pub chains: Option<Vec<RawChain>>,
    /// Creation timestamp of the listing.
    #[serde(default)]
    pub date_created: Option<String>,
    /// Whether the listing was verified.
    #[serde(default)]
    pub verified: Option<bool>,
    /// Social-media handles.
    #[serde(default)]
    pub social_media: Option<RawSocialMedia>,
    /// Website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub tel: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"[{"fsq_id":"a"},{"fsq_id":"b"}]"#)]
    #[case(r#"{"results":[{"fsq_id":"a"},{"fsq_id":"b"}]}"#)]
    fn legacy_payload_accepts_both_envelopes(#[case] body: &str) {
        let records = RawPlace::parse_payload(ProviderKind::Legacy, body).expect("decode payload");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.provider() == ProviderKind::Legacy));
    }

    #[rstest]
    fn places_payload_reads_top_level_coordinates() {
        let body = r#"[{"fsq_place_id":"p1","name":"Gallery","latitude":40.7,"longitude":-74.0}]"#;
        let records =
            RawPlace::parse_payload(ProviderKind::PlacesApi, body).expect("decode payload");
        let Some(RawPlace::PlacesApi(place)) = records.first() else {
            panic!("expected a places API record");
        };
        assert_eq!(place.latitude, Some(40.7));
        assert_eq!(place.fsq_place_id.as_deref(), Some("p1"));
    }

    #[rstest]
    fn unknown_fields_and_platforms_are_ignored() {
        let body = r#"[{"fsq_id":"a","social_media":{"tiktok":"@x","instagram":"@y"},"rating":9.1}]"#;
        let records = RawPlace::parse_payload(ProviderKind::Legacy, body).expect("decode payload");
        let Some(RawPlace::Legacy(place)) = records.first() else {
            panic!("expected a legacy record");
        };
        let social = place.social_media.as_ref().expect("social block");
        assert_eq!(social.instagram.as_deref(), Some("@y"));
    }

    #[rstest]
    #[case("legacy", ProviderKind::Legacy)]
    #[case("V3", ProviderKind::Legacy)]
    #[case("places", ProviderKind::PlacesApi)]
    fn parses_provider_names(#[case] text: &str, #[case] expected: ProviderKind) {
        assert_eq!(text.parse::<ProviderKind>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_provider() {
        assert!("yelp".parse::<ProviderKind>().is_err());
    }

    #[rstest]
    fn rejects_non_record_body() {
        assert!(RawPlace::parse_payload(ProviderKind::Legacy, r#"{"count":3}"#).is_err());
    }
}
