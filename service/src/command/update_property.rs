//! [`Command`] for updating an existing [`Property`].

use common::operations::{Load, Persist, Save};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{media, store, Media, Store},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Property`].
///
/// Scalar fields replace the stored values unconditionally; media is
/// replaced only when new files were actually uploaded, and coordinates
/// follow the tri-state [`CoordinateUpdate`] convention.
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to update.
    pub id: property::Id,

    /// New [`Title`].
    ///
    /// [`Title`]: property::Title
    pub title: property::Title,

    /// New [`Location`].
    ///
    /// [`Location`]: property::Location
    pub location: property::Location,

    /// New [`Price`].
    ///
    /// [`Price`]: property::Price
    pub price: property::Price,

    /// New [`Kind`].
    ///
    /// [`Kind`]: property::Kind
    pub kind: property::Kind,

    /// New [`Operation`].
    ///
    /// [`Operation`]: property::Operation
    pub operation: property::Operation,

    /// New [`Surface`].
    ///
    /// [`Surface`]: property::Surface
    pub surface: property::Surface,

    /// New number of bedrooms.
    pub bedrooms: property::Bedrooms,

    /// New number of bathrooms.
    pub bathrooms: property::Bathrooms,

    /// New featured flag.
    pub featured: bool,

    /// New [`Description`], if provided.
    ///
    /// [`Description`]: property::Description
    pub description: Option<property::Description>,

    /// Requested latitude change.
    pub latitude: CoordinateUpdate,

    /// Requested longitude change.
    pub longitude: CoordinateUpdate,

    /// Image [`Upload`]s replacing the stored ones, if any non-empty one
    /// arrived.
    ///
    /// [`Upload`]: media::Upload
    pub images: Vec<media::Upload>,

    /// New external [`VideoUrl`]; [`None`] keeps the stored one.
    ///
    /// [`VideoUrl`]: property::VideoUrl
    pub video_url: Option<property::VideoUrl>,

    /// Floor plan [`Upload`] replacing the stored one, if any.
    ///
    /// [`Upload`]: media::Upload
    pub floorplan: Option<media::Upload>,

    /// New reserved flag.
    pub reserved: bool,

    /// New rented flag.
    pub rented: bool,

    /// New sold flag.
    pub sold: bool,
}

impl<Db, Fs> Command<UpdateProperty> for Service<Db, Fs>
where
    Db: Store<Load<Property>, Ok = Vec<Property>, Err = Traced<store::Error>>
        + Store<Save<Vec<Property>>, Ok = (), Err = Traced<store::Error>>,
    Fs: Media<
        Persist<media::Upload>,
        Ok = Option<property::MediaUrl>,
        Err = Traced<media::Error>,
    >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            id,
            title,
            location,
            price,
            kind,
            operation,
            surface,
            bedrooms,
            bathrooms,
            featured,
            description,
            latitude,
            longitude,
            images,
            video_url,
            floorplan,
            reserved,
            rented,
            sold,
        } = cmd;

        let mut properties = self
            .database()
            .execute(Load::new())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let index = properties
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| tracerr::new!(E::PropertyNotExists(id)))?;

        let mut new_images = Vec::new();
        for image in images {
            if let Some(url) = self
                .media()
                .execute(Persist(image))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
            {
                new_images.push(url);
            }
        }

        let mut new_floorplan = None;
        if let Some(floorplan) = floorplan {
            new_floorplan = self
                .media()
                .execute(Persist(floorplan))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        let previous = &properties[index];
        let updated = Property {
            id,
            title,
            location,
            price,
            kind,
            operation,
            surface,
            bedrooms,
            bathrooms,
            featured,
            description: description.unwrap_or_default(),
            images: if new_images.is_empty() {
                previous.images.clone()
            } else {
                new_images
            },
            video_url: video_url.or_else(|| previous.video_url.clone()),
            floorplan: new_floorplan.or_else(|| previous.floorplan.clone()),
            reserved,
            rented,
            sold,
            latitude: latitude.apply(previous.latitude),
            longitude: longitude.apply(previous.longitude),
        };

        properties[index] = updated.clone();
        self.database()
            .execute(Save(properties))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(updated)
    }
}

/// Requested change of a single coordinate on update.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum CoordinateUpdate {
    /// Field absent from the form: the previous value is kept.
    #[default]
    Keep,

    /// Explicit empty value: the coordinate is cleared.
    Clear,

    /// Raw value to be parsed; a value failing to parse keeps the previous
    /// coordinate.
    Set(String),
}

impl CoordinateUpdate {
    /// Creates a [`CoordinateUpdate`] from the raw form field value.
    #[must_use]
    pub fn from_form(raw: Option<String>) -> Self {
        match raw {
            None => Self::Keep,
            Some(s) if s.is_empty() => Self::Clear,
            Some(s) => Self::Set(s),
        }
    }

    /// Applies this [`CoordinateUpdate`] to the previously stored value.
    #[must_use]
    pub fn apply(&self, previous: Option<f64>) -> Option<f64> {
        match self {
            Self::Keep => previous,
            Self::Clear => None,
            Self::Set(raw) => {
                property::parse_coordinate(Some(raw)).or(previous)
            }
        }
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Media`] error.
    #[display("`Media` operation failed: {_0}")]
    Media(media::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}

#[cfg(test)]
mod spec {
    use super::CoordinateUpdate;

    #[test]
    fn absent_field_keeps_previous() {
        let update = CoordinateUpdate::from_form(None);
        assert_eq!(update, CoordinateUpdate::Keep);
        assert_eq!(update.apply(Some(41.65)), Some(41.65));
    }

    #[test]
    fn explicit_empty_clears() {
        let update = CoordinateUpdate::from_form(Some(String::new()));
        assert_eq!(update, CoordinateUpdate::Clear);
        assert_eq!(update.apply(Some(41.65)), None);
    }

    #[test]
    fn valid_value_replaces() {
        let update = CoordinateUpdate::from_form(Some("40.1".into()));
        assert_eq!(update.apply(Some(41.65)), Some(40.1));
    }

    #[test]
    fn unparsable_value_keeps_previous() {
        let update = CoordinateUpdate::from_form(Some("north".into()));
        assert_eq!(update.apply(Some(41.65)), Some(41.65));

        // Whitespace-only submissions neither parse nor clear.
        let update = CoordinateUpdate::from_form(Some("   ".into()));
        assert_eq!(update.apply(Some(41.65)), Some(41.65));
    }
}
