//! Convert provider payloads into [`CanonicalPlace`] values.
//!
//! Each provider shape is projected onto a shared borrowed view first, so the
//! field interpretation rules live in one place regardless of provider.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use geo::Coord;
use log::debug;

use crate::error::NormalizeError;
use crate::place::{FALLBACK_ADDRESS, FALLBACK_CATEGORY, FALLBACK_NAME};
use crate::raw::{
    LegacyPlace, PlacesApiPlace, RawCategory, RawChain, RawLocation, RawSocialMedia,
};
use crate::{CanonicalPlace, ProviderKind, RawPlace};

/// Calendar year used to turn creation dates into ages.
///
/// Inject a fixed year wherever results must be reproducible; use
/// [`ReferenceYear::current`] only at the outer edge of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceYear(i32);

impl ReferenceYear {
    /// Wrap a calendar year.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    /// The current UTC calendar year.
    #[must_use]
    pub fn current() -> Self {
        Self(Utc::now().year())
    }

    /// Return the wrapped year.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Builds [`CanonicalPlace`] values from [`RawPlace`] records.
///
/// # Examples
/// ```
/// use compass_core::{LegacyPlace, Normalizer, RawPlace, ReferenceYear};
///
/// let raw = RawPlace::Legacy(LegacyPlace {
///     fsq_id: Some("abc".into()),
///     name: Some("Corner Books".into()),
///     date_created: Some("2015-04-01".into()),
///     ..LegacyPlace::default()
/// });
/// let place = Normalizer::new(ReferenceYear::new(2025)).normalize(&raw)?;
/// assert_eq!(place.age_years(), Some(10));
/// assert_eq!(place.category(), "Place");
/// # Ok::<(), compass_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    reference_year: ReferenceYear,
}

impl Normalizer {
    /// Create a normaliser that measures ages against `reference_year`.
    #[must_use]
    pub const fn new(reference_year: ReferenceYear) -> Self {
        Self { reference_year }
    }

    /// Year ages are measured against.
    #[must_use]
    pub const fn reference_year(&self) -> ReferenceYear {
        self.reference_year
    }

    /// Normalise a single raw record.
    ///
    /// Missing optional fields never fail; they degrade to `None`, `false` or
    /// `0`. A record with an empty identifier but a name receives an id
    /// derived from the name and its coordinates, or from the name and its
    /// address when coordinates are unknown.
    ///
    /// # Errors
    /// Returns [`NormalizeError::InvalidRecord`] when the record has neither
    /// an identifier nor a name.
    pub fn normalize(&self, raw: &RawPlace) -> Result<CanonicalPlace, NormalizeError> {
        let fields = match raw {
            RawPlace::Legacy(place) => SharedFields::from_legacy(place),
            RawPlace::PlacesApi(place) => SharedFields::from_places_api(place),
        };
        self.build(&fields)
    }

    fn build(&self, fields: &SharedFields<'_>) -> Result<CanonicalPlace, NormalizeError> {
        let name = non_blank(fields.name);
        let address = format_address(fields.location);
        let id = match (non_blank(fields.id), name) {
            (Some(id), _) => id.to_owned(),
            (None, Some(name)) => derive_id(name, fields.coordinates, &address),
            (None, None) => {
                return Err(NormalizeError::InvalidRecord {
                    provider: fields.provider,
                });
            }
        };
        let chains = fields.chains.unwrap_or_default();

        Ok(CanonicalPlace {
            id,
            name: name.unwrap_or(FALLBACK_NAME).to_owned(),
            category: primary_category(fields.categories),
            address,
            coordinates: fields.coordinates,
            distance_meters: fields
                .distance
                .filter(|meters| meters.is_finite() && *meters >= 0.0),
            is_chain: !chains.is_empty(),
            chain_name: chains
                .iter()
                .find_map(|chain| non_blank(chain.name.as_deref()))
                .map(str::to_owned),
            age_years: fields
                .date_created
                .and_then(creation_year)
                .map(|year| self.age_from(year)),
            social_media_count: social_media_count(fields.social),
            website: non_blank(fields.website).map(str::to_owned),
            phone: non_blank(fields.tel).map(str::to_owned),
            verified: fields.verified.unwrap_or(false),
        })
    }

    fn age_from(&self, created_year: i32) -> u32 {
        let elapsed = self.reference_year.get().saturating_sub(created_year);
        u32::try_from(elapsed).unwrap_or(0)
    }
}

struct SharedFields<'a> {
    provider: ProviderKind,
    id: Option<&'a str>,
    name: Option<&'a str>,
    categories: &'a [RawCategory],
    distance: Option<f64>,
    coordinates: Option<Coord<f64>>,
    location: Option<&'a RawLocation>,
    chains: Option<&'a [RawChain]>,
    date_created: Option<&'a str>,
    verified: Option<bool>,
    social: Option<&'a RawSocialMedia>,
    website: Option<&'a str>,
    tel: Option<&'a str>,
}

impl<'a> SharedFields<'a> {
    fn from_legacy(place: &'a LegacyPlace) -> Self {
        Self {
            provider: ProviderKind::Legacy,
            id: place.fsq_id.as_deref(),
            name: place.name.as_deref(),
            categories: &place.categories,
            distance: place.distance,
            coordinates: place
                .geocodes
                .and_then(|geocodes| geocodes.main)
                .map(|main| Coord {
                    x: main.longitude,
                    y: main.latitude,
                }),
            location: place.location.as_ref(),
            chains: place.chains.as_deref(),
            date_created: place.date_created.as_deref(),
            verified: place.verified,
            social: place.social_media.as_ref(),
            website: place.website.as_deref(),
            tel: place.tel.as_deref(),
        }
    }

    fn from_places_api(place: &'a PlacesApiPlace) -> Self {
        Self {
            provider: ProviderKind::PlacesApi,
            id: place.fsq_place_id.as_deref(),
            name: place.name.as_deref(),
            categories: &place.categories,
            distance: place.distance,
            coordinates: place
                .latitude
                .zip(place.longitude)
                .map(|(lat, lon)| Coord { x: lon, y: lat }),
            location: place.location.as_ref(),
            chains: place.chains.as_deref(),
            date_created: place.date_created.as_deref(),
            verified: place.verified,
            social: place.social_media.as_ref(),
            website: place.website.as_deref(),
            tel: place.tel.as_deref(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn derive_id(name: &str, coordinates: Option<Coord<f64>>, address: &str) -> String {
    let name_slug = slug(name);
    match coordinates {
        Some(coord) => format!("derived:{name_slug}@{:.5},{:.5}", coord.y, coord.x),
        None if address != FALLBACK_ADDRESS => format!("derived:{name_slug}@{}", slug(address)),
        None => format!("derived:{name_slug}"),
    }
}

fn primary_category(categories: &[RawCategory]) -> String {
    non_blank(categories.first().and_then(|category| category.name.as_deref()))
        .unwrap_or(FALLBACK_CATEGORY)
        .to_owned()
}

fn format_address(location: Option<&RawLocation>) -> String {
    let Some(location) = location else {
        return FALLBACK_ADDRESS.to_owned();
    };
    if let Some(formatted) = non_blank(location.formatted_address.as_deref()) {
        return formatted.to_owned();
    }
    let parts: Vec<&str> = [
        location.address.as_deref(),
        location.locality.as_deref(),
        location.region.as_deref(),
    ]
    .into_iter()
    .filter_map(non_blank)
    .collect();
    if parts.is_empty() {
        FALLBACK_ADDRESS.to_owned()
    } else {
        parts.join(", ")
    }
}

fn social_media_count(social: Option<&RawSocialMedia>) -> u8 {
    let Some(social) = social else {
        return 0;
    };
    let handles = [
        social.facebook_id.as_deref(),
        social.instagram.as_deref(),
        social.twitter.as_deref(),
    ];
    let present = handles.into_iter().filter_map(non_blank).count();
    u8::try_from(present).unwrap_or(u8::MAX)
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Extract the calendar year from an ISO 8601 timestamp (with or without an
/// offset, `T` or space separated) or a plain `YYYY-MM-DD` date.
///
/// Offset-bearing timestamps report the year in their own offset, not UTC.
fn creation_year(raw: &str) -> Option<i32> {
    let text = raw.trim();
    let year = DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        })
        .map(|stamp| stamp.year())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|stamp| stamp.year())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.year())
        });
    if year.is_none() {
        debug!("ignoring unparsable creation date {text:?}");
    }
    year
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawGeocodes, RawLatLng};
    use rstest::{fixture, rstest};

    #[fixture]
    fn normalizer() -> Normalizer {
        Normalizer::new(ReferenceYear::new(2025))
    }

    fn legacy(place: LegacyPlace) -> RawPlace {
        RawPlace::Legacy(place)
    }

    #[rstest]
    fn rejects_record_without_id_or_name(normalizer: Normalizer) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("   ".into()),
            ..LegacyPlace::default()
        });
        let err = normalizer.normalize(&raw).expect_err("record should be rejected");
        assert_eq!(
            err,
            NormalizeError::InvalidRecord {
                provider: ProviderKind::Legacy
            }
        );
    }

    #[rstest]
    fn derives_id_from_name_and_coordinates(normalizer: Normalizer) {
        let raw = legacy(LegacyPlace {
            name: Some("Joe's  Pizza".into()),
            geocodes: Some(RawGeocodes {
                main: Some(RawLatLng {
                    latitude: 40.73,
                    longitude: -73.99,
                }),
            }),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("name is enough");
        assert_eq!(place.id(), "derived:joe's-pizza@40.73000,-73.99000");
    }

    #[rstest]
    #[case(Some("12 Main St, Brooklyn"), "derived:joe's-pizza@12-main-st,-brooklyn")]
    #[case(Some("400 Court St, Brooklyn"), "derived:joe's-pizza@400-court-st,-brooklyn")]
    #[case(None, "derived:joe's-pizza")]
    fn derived_id_uses_address_without_coordinates(
        normalizer: Normalizer,
        #[case] formatted: Option<&str>,
        #[case] expected: &str,
    ) {
        let raw = legacy(LegacyPlace {
            name: Some("joe's   PIZZA".into()),
            location: formatted.map(|address| RawLocation {
                formatted_address: Some(address.to_owned()),
                ..RawLocation::default()
            }),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("name is enough");
        assert_eq!(place.id(), expected);
    }

    #[rstest]
    fn missing_name_falls_back(normalizer: Normalizer) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("a1".into()),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("id is enough");
        assert_eq!(place.name(), FALLBACK_NAME);
        assert_eq!(place.address(), FALLBACK_ADDRESS);
    }

    #[rstest]
    #[case(Some("12 Main St, Springfield"), "12 Main St, Springfield")]
    #[case(None, "12 Main St, Brooklyn, NY")]
    #[case(Some("  "), "12 Main St, Brooklyn, NY")]
    fn address_prefers_formatted(
        normalizer: Normalizer,
        #[case] formatted: Option<&str>,
        #[case] expected: &str,
    ) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("a1".into()),
            location: Some(RawLocation {
                address: Some("12 Main St".into()),
                locality: Some("Brooklyn".into()),
                region: Some("NY".into()),
                formatted_address: formatted.map(str::to_owned),
                ..RawLocation::default()
            }),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("valid record");
        assert_eq!(place.address(), expected);
    }

    #[rstest]
    fn address_skips_empty_components(normalizer: Normalizer) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("a1".into()),
            location: Some(RawLocation {
                address: Some(String::new()),
                locality: Some("Brooklyn".into()),
                region: Some("NY".into()),
                ..RawLocation::default()
            }),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("valid record");
        assert_eq!(place.address(), "Brooklyn, NY");
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(vec![]), false)]
    #[case(Some(vec![RawChain { id: None, name: Some("Big Beans".into()) }]), true)]
    fn chain_flag_requires_non_empty_list(
        normalizer: Normalizer,
        #[case] chains: Option<Vec<RawChain>>,
        #[case] expected: bool,
    ) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("a1".into()),
            chains,
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("valid record");
        assert_eq!(place.is_chain(), expected);
    }

    #[rstest]
    #[case("2013-06-01", Some(12))]
    #[case("2013-06-01T10:15:00Z", Some(12))]
    #[case("2013-06-01T10:15:00.250", Some(12))]
    #[case("2013-06-01 10:15:00", Some(12))]
    #[case("2013-06-01T10:15:00+0000", Some(12))]
    #[case("2013-06-01 10:15:00-0500", Some(12))]
    #[case("2030-01-01", Some(0))]
    #[case("sometime last spring", None)]
    fn age_uses_reference_year(
        normalizer: Normalizer,
        #[case] created: &str,
        #[case] expected: Option<u32>,
    ) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("a1".into()),
            date_created: Some(created.into()),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("valid record");
        assert_eq!(place.age_years(), expected);
    }

    #[rstest]
    fn counts_only_recognised_non_blank_handles(normalizer: Normalizer) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("a1".into()),
            social_media: Some(RawSocialMedia {
                facebook_id: Some("12345".into()),
                instagram: Some(String::new()),
                twitter: Some("corner_books".into()),
            }),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("valid record");
        assert_eq!(place.social_media_count(), 2);
    }

    #[rstest]
    fn negative_distance_is_unknown(normalizer: Normalizer) {
        let raw = legacy(LegacyPlace {
            fsq_id: Some("a1".into()),
            distance: Some(-3.0),
            ..LegacyPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("valid record");
        assert!(place.distance_meters().is_none());
    }

    #[rstest]
    fn places_api_record_maps_all_fields(normalizer: Normalizer) {
        let raw = RawPlace::PlacesApi(PlacesApiPlace {
            fsq_place_id: Some("p-9".into()),
            name: Some("Night Owl Records".into()),
            categories: vec![RawCategory {
                name: Some("Music Venue".into()),
            }],
            distance: Some(750.0),
            latitude: Some(40.7),
            longitude: Some(-74.0),
            website: Some("https://nightowl.example".into()),
            tel: Some("(718) 555-0101".into()),
            verified: Some(true),
            ..PlacesApiPlace::default()
        });
        let place = normalizer.normalize(&raw).expect("valid record");
        assert_eq!(place.id(), "p-9");
        assert_eq!(place.category(), "Music Venue");
        assert_eq!(place.distance_meters(), Some(750.0));
        assert_eq!(place.coordinates(), Some(Coord { x: -74.0, y: 40.7 }));
        assert!(place.has_website());
        assert_eq!(place.phone(), Some("(718) 555-0101"));
        assert!(place.verified());
    }
}
