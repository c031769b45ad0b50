//! [`Property`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, From, FromStr as DeriveFromStr, Into};
use serde::{Deserialize, Serialize};

/// Property listed in the catalog, for sale or for rent.
///
/// Serialized field names follow the legacy `properties.json` document
/// layout, which is part of the public contract.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Location`] of this [`Property`].
    pub location: Location,

    /// [`Price`] of this [`Property`].
    pub price: Price,

    /// [`Kind`] of this [`Property`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// [`Operation`] this [`Property`] is listed for.
    pub operation: Operation,

    /// [`Surface`] of this [`Property`], in square meters.
    pub surface: Surface,

    /// Number of bedrooms in this [`Property`].
    pub bedrooms: Bedrooms,

    /// Number of bathrooms in this [`Property`].
    pub bathrooms: Bathrooms,

    /// Indicator whether this [`Property`] is promoted to the top of
    /// listings.
    #[serde(default)]
    pub featured: bool,

    /// [`Description`] of this [`Property`].
    #[serde(default)]
    pub description: Description,

    /// Ordered [`MediaUrl`]s of the images of this [`Property`].
    #[serde(default)]
    pub images: Vec<MediaUrl>,

    /// External [`VideoUrl`] of this [`Property`], if any.
    #[serde(default)]
    pub video_url: Option<VideoUrl>,

    /// [`MediaUrl`] of the floor plan of this [`Property`], if any.
    #[serde(default)]
    pub floorplan: Option<MediaUrl>,

    /// Indicator whether this [`Property`] is reserved.
    #[serde(default)]
    pub reserved: bool,

    /// Indicator whether this [`Property`] is already rented out.
    #[serde(default, rename = "alquilado")]
    pub rented: bool,

    /// Indicator whether this [`Property`] is already sold.
    #[serde(default, rename = "vendido")]
    pub sold: bool,

    /// [`Latitude`] of this [`Property`], if any.
    #[serde(default)]
    pub latitude: Option<Latitude>,

    /// [`Longitude`] of this [`Property`], if any.
    #[serde(default)]
    pub longitude: Option<Longitude>,
}

impl Property {
    /// Returns the ID a [`Property`] appended to the given collection
    /// should be assigned.
    ///
    /// IDs are assigned as `max(existing) + 1`, starting at 1. The maximum
    /// is recomputed on every call rather than persisted, so an ID may be
    /// reissued after the backing document is edited by hand.
    #[must_use]
    pub fn next_id(existing: &[Self]) -> Id {
        existing.iter().map(|p| p.id).max().map_or(Id::FIRST, Id::next)
    }

    /// Returns [`MediaUrl`]s of all the files stored on behalf of this
    /// [`Property`].
    pub fn media_urls(&self) -> impl Iterator<Item = &MediaUrl> {
        self.images.iter().chain(self.floorplan.as_ref())
    }
}

/// ID of a [`Property`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    DeriveFromStr,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(i64);

impl Id {
    /// First [`Id`] ever assigned in an empty catalog.
    pub const FIRST: Self = Self(1);

    /// Returns the [`Id`] following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Title of a [`Property`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Location of a [`Property`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `location` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// Price of a [`Property`].
///
/// Free text rather than a number: listings carry values like
/// `"Consultar"` or `"120.000 €"`.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Price(String);

impl Price {
    /// Creates a new [`Price`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `price` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(price: impl Into<String>) -> Self {
        Self(price.into())
    }

    /// Creates a new [`Price`] if the given `price` is valid.
    #[must_use]
    pub fn new(price: impl Into<String>) -> Option<Self> {
        let price = price.into();
        Self::check(&price).then_some(Self(price))
    }

    /// Checks whether the given `price` is a valid [`Price`].
    fn check(price: impl AsRef<str>) -> bool {
        let price = price.as_ref();
        price.trim() == price && !price.is_empty() && price.len() <= 512
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Price`")
    }
}

/// Kind of a [`Property`] (e.g. `"casa"`, `"piso"`, `"local"`).
///
/// Kept as free text: the set of kinds is curated by the admin, not by the
/// code.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Kind(String);

impl Kind {
    /// Creates a new [`Kind`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `kind` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Creates a new [`Kind`] if the given `kind` is valid.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        Self::check(&kind).then_some(Self(kind))
    }

    /// Checks whether the given `kind` is a valid [`Kind`].
    fn check(kind: impl AsRef<str>) -> bool {
        let kind = kind.as_ref();
        kind.trim() == kind && !kind.is_empty() && kind.len() <= 512
    }
}

impl FromStr for Kind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Kind`")
    }
}

/// Operation a [`Property`] is listed for (e.g. `"venta"`, `"alquiler"`).
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Operation(String);

impl Operation {
    /// Creates a new [`Operation`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `operation` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(operation: impl Into<String>) -> Self {
        Self(operation.into())
    }

    /// Creates a new [`Operation`] if the given `operation` is valid.
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Option<Self> {
        let operation = operation.into();
        Self::check(&operation).then_some(Self(operation))
    }

    /// Checks whether the given `operation` is a valid [`Operation`].
    fn check(operation: impl AsRef<str>) -> bool {
        let operation = operation.as_ref();
        operation.trim() == operation
            && !operation.is_empty()
            && operation.len() <= 512
    }
}

impl FromStr for Operation {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Operation`")
    }
}

/// Description of a [`Property`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize,
)]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Placeholder used whenever no description is provided.
    pub const PLACEHOLDER: &'static str = "Sin descripción disponible.";

    /// Creates a new [`Description`] if the given `description` is
    /// non-empty.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        (!description.is_empty()).then_some(Self(description))
    }
}

impl Default for Description {
    fn default() -> Self {
        Self(Self::PLACEHOLDER.to_owned())
    }
}

/// Public URL of a locally stored media file
/// (`/static/uploads/<kind>/<token><ext>`).
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
pub struct MediaUrl(String);

impl MediaUrl {
    /// Creates a new [`MediaUrl`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`MediaUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`MediaUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.starts_with('/') && url.len() <= 512
    }
}

impl FromStr for MediaUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `MediaUrl`")
    }
}

/// External video URL of a [`Property`] (e.g. a YouTube link).
///
/// Unlike a [`MediaUrl`], nothing is stored on disk for it.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
pub struct VideoUrl(String);

/// Surface of a [`Property`], in square meters.
pub type Surface = u32;

/// Number of bedrooms in a [`Property`].
pub type Bedrooms = u8;

/// Number of bathrooms in a [`Property`].
pub type Bathrooms = u8;

/// Latitude of a [`Property`].
pub type Latitude = f64;

/// Longitude of a [`Property`].
pub type Longitude = f64;

/// Parses an optional coordinate form value.
///
/// Blank and non-numeric values are treated as absent rather than as
/// errors.
#[must_use]
pub fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod spec {
    use super::{parse_coordinate, Description, Id, Property, Title};

    fn property(id: i64) -> Property {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": "Piso céntrico",
            "location": "Zaragoza",
            "price": "120.000 €",
            "type": "piso",
            "operation": "venta",
            "surface": 90,
            "bedrooms": 3,
            "bathrooms": 1,
        }))
        .unwrap()
    }

    #[test]
    fn assigns_first_id_in_empty_catalog() {
        assert_eq!(Property::next_id(&[]), Id::FIRST);
    }

    #[test]
    fn assigns_max_plus_one() {
        let existing = vec![property(2), property(5)];
        assert_eq!(Property::next_id(&existing), Id::from(6));
    }

    #[test]
    fn title_rejects_blank_and_padded() {
        assert!(Title::new("").is_none());
        assert!(Title::new(" padded ").is_none());
        assert!(Title::new("Ático con terraza").is_some());
    }

    #[test]
    fn description_defaults_to_placeholder() {
        assert_eq!(Description::default().to_string(), Description::PLACEHOLDER);
        assert!(Description::new("").is_none());
    }

    #[test]
    fn coordinate_parsing_is_lenient() {
        assert_eq!(parse_coordinate(Some("41.65")), Some(41.65));
        assert_eq!(parse_coordinate(Some(" -0.88 ")), Some(-0.88));
        assert_eq!(parse_coordinate(Some("")), None);
        assert_eq!(parse_coordinate(Some("   ")), None);
        assert_eq!(parse_coordinate(Some("north")), None);
        assert_eq!(parse_coordinate(None), None);
    }

    #[test]
    fn deserializes_legacy_document_fields() {
        let p: Property = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Casa rural",
            "location": "Huesca",
            "price": "Consultar",
            "type": "casa",
            "operation": "alquiler",
            "surface": 200,
            "bedrooms": 5,
            "bathrooms": 2,
            "featured": true,
            "alquilado": true,
            "vendido": false,
        }))
        .unwrap();
        assert!(p.featured);
        assert!(p.rented);
        assert!(!p.sold);
        assert_eq!(p.description.to_string(), Description::PLACEHOLDER);
        assert!(p.images.is_empty());
    }
}
