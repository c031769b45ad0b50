//! [`Command`] for creating a new [`Property`].

use common::operations::{Load, Persist, Save};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{media, store, Media, Store},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`] in the catalog.
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// [`Title`] of the new [`Property`].
    ///
    /// [`Title`]: property::Title
    pub title: property::Title,

    /// [`Location`] of the new [`Property`].
    ///
    /// [`Location`]: property::Location
    pub location: property::Location,

    /// [`Price`] of the new [`Property`].
    ///
    /// [`Price`]: property::Price
    pub price: property::Price,

    /// [`Kind`] of the new [`Property`].
    ///
    /// [`Kind`]: property::Kind
    pub kind: property::Kind,

    /// [`Operation`] the new [`Property`] is listed for.
    ///
    /// [`Operation`]: property::Operation
    pub operation: property::Operation,

    /// [`Surface`] of the new [`Property`].
    ///
    /// [`Surface`]: property::Surface
    pub surface: property::Surface,

    /// Number of bedrooms in the new [`Property`].
    pub bedrooms: property::Bedrooms,

    /// Number of bathrooms in the new [`Property`].
    pub bathrooms: property::Bathrooms,

    /// Whether the new [`Property`] is featured.
    pub featured: bool,

    /// [`Description`] of the new [`Property`], if provided.
    ///
    /// [`Description`]: property::Description
    pub description: Option<property::Description>,

    /// Raw latitude form value, parsed leniently.
    pub latitude: Option<String>,

    /// Raw longitude form value, parsed leniently.
    pub longitude: Option<String>,

    /// Image [`Upload`]s to persist.
    ///
    /// [`Upload`]: media::Upload
    pub images: Vec<media::Upload>,

    /// External [`VideoUrl`] of the new [`Property`], if any.
    ///
    /// [`VideoUrl`]: property::VideoUrl
    pub video_url: Option<property::VideoUrl>,

    /// Floor plan [`Upload`] to persist, if any.
    ///
    /// [`Upload`]: media::Upload
    pub floorplan: Option<media::Upload>,

    /// Whether the new [`Property`] is reserved.
    pub reserved: bool,

    /// Whether the new [`Property`] is already rented out.
    pub rented: bool,

    /// Whether the new [`Property`] is already sold.
    pub sold: bool,
}

impl<Db, Fs> Command<CreateProperty> for Service<Db, Fs>
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
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
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

        let id = Property::next_id(&properties);

        let mut saved_images = Vec::new();
        for image in images {
            if let Some(url) = self
                .media()
                .execute(Persist(image))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
            {
                saved_images.push(url);
            }
        }

        let mut saved_floorplan = None;
        if let Some(floorplan) = floorplan {
            saved_floorplan = self
                .media()
                .execute(Persist(floorplan))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        let property = Property {
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
            images: saved_images,
            video_url,
            floorplan: saved_floorplan,
            reserved,
            rented,
            sold,
            latitude: property::parse_coordinate(latitude.as_deref()),
            longitude: property::parse_coordinate(longitude.as_deref()),
        };

        properties.push(property.clone());
        self.database()
            .execute(Save(properties))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Media`] error.
    #[display("`Media` operation failed: {_0}")]
    Media(media::Error),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}
