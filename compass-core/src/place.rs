//! Provider-agnostic place records used by scoring and ranking.

use geo::Coord;
use serde::Serialize;

/// Category used when a provider supplies no category labels.
pub const FALLBACK_CATEGORY: &str = "Place";
/// Address used when a provider supplies no usable address components.
pub const FALLBACK_ADDRESS: &str = "Address not available";
/// Name used when a record carries an identifier but no name.
pub const FALLBACK_NAME: &str = "Unnamed place";

/// A normalised place, independent of the provider that returned it.
///
/// Values are built once by the [`Normalizer`](crate::Normalizer) (or the
/// `with_*` builders in tests) and only read afterwards.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use compass_core::CanonicalPlace;
///
/// let place = CanonicalPlace::new("fsq-1", "Blue Door Coffee")
///     .with_category("Coffee Shop")
///     .with_distance_meters(320.0)
///     .with_age_years(12);
///
/// assert_eq!(place.id(), "fsq-1");
/// assert!(!place.is_chain());
/// assert_eq!(place.age_years(), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPlace {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) coordinates: Option<Coord<f64>>,
    pub(crate) distance_meters: Option<f64>,
    pub(crate) is_chain: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) chain_name: Option<String>,
    pub(crate) age_years: Option<u32>,
    pub(crate) social_media_count: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) website: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) verified: bool,
}

impl CanonicalPlace {
    /// Construct a place with only identity fields set; every optional
    /// signal starts absent.
    ///
    /// `id` must not be blank: it is the deduplication key.
    ///
    /// # Panics
    /// Debug builds panic when `id` is blank.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        debug_assert!(!id.trim().is_empty(), "place id must not be blank");
        Self {
            id,
            name: name.into(),
            category: FALLBACK_CATEGORY.to_owned(),
            address: FALLBACK_ADDRESS.to_owned(),
            coordinates: None,
            distance_meters: None,
            is_chain: false,
            chain_name: None,
            age_years: None,
            social_media_count: 0,
            website: None,
            phone: None,
            verified: false,
        }
    }

    /// Stable identifier used as the deduplication key.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primary category label.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Best-effort formatted address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Geographic position, when the provider reported one.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coord<f64>> {
        self.coordinates
    }

    /// Distance from the query origin in meters.
    #[must_use]
    pub const fn distance_meters(&self) -> Option<f64> {
        self.distance_meters
    }

    /// Whether the place belongs to a chain.
    #[must_use]
    pub const fn is_chain(&self) -> bool {
        self.is_chain
    }

    /// Name of the first affiliated chain, if any.
    #[must_use]
    pub fn chain_name(&self) -> Option<&str> {
        self.chain_name.as_deref()
    }

    /// Whole years since the place was first recorded.
    #[must_use]
    pub const fn age_years(&self) -> Option<u32> {
        self.age_years
    }

    /// Number of recognised social platforms with a handle.
    #[must_use]
    pub const fn social_media_count(&self) -> u8 {
        self.social_media_count
    }

    /// Website URL, if any.
    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Whether a website is listed.
    #[must_use]
    pub const fn has_website(&self) -> bool {
        self.website.is_some()
    }

    /// Contact phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Whether the provider marked the listing as verified.
    #[must_use]
    pub const fn verified(&self) -> bool {
        self.verified
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the formatted address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the geographic position.
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coord<f64>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Set the distance from the query origin.
    #[must_use]
    pub const fn with_distance_meters(mut self, meters: f64) -> Self {
        self.distance_meters = Some(meters);
        self
    }

    /// Mark the place as part of a chain, optionally naming it.
    #[must_use]
    pub fn with_chain(mut self, chain_name: Option<String>) -> Self {
        self.is_chain = true;
        self.chain_name = chain_name;
        self
    }

    /// Set the establishment age in years.
    #[must_use]
    pub const fn with_age_years(mut self, years: u32) -> Self {
        self.age_years = Some(years);
        self
    }

    /// Set the number of recognised social platforms.
    #[must_use]
    pub const fn with_social_media_count(mut self, count: u8) -> Self {
        self.social_media_count = count;
        self
    }

    /// Set the website URL.
    #[must_use]
    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the verification flag.
    #[must_use]
    pub const fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }
}
