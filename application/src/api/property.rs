//! [`Property`]-related HTTP handlers.

use axum::{
    extract::{Multipart, Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use service::{
    command::{
        update_property::CoordinateUpdate, CreateProperty, DeleteProperty,
        UpdateProperty,
    },
    domain::{property, Property},
    infra::media,
    query,
    read::property::list,
    Command as _,
};

use crate::{define_error, Admin, AsError as _, Error};

/// Query parameters of the [`list`] handler.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Exact match on the featured flag, coerced leniently
    /// (`true`/`false`, `1`/`0`, `on`/`off`, `yes`/`no`).
    pub featured: Option<String>,

    /// Case-insensitive match on the operation.
    pub operation: Option<String>,

    /// Case-insensitive match on the kind.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Case-insensitive substring match on the location.
    pub location: Option<String>,

    /// Bedrooms bucket, with `4` meaning "4 or more".
    pub rooms: Option<String>,
}

impl From<ListParams> for list::Filter {
    fn from(params: ListParams) -> Self {
        let ListParams {
            featured,
            operation,
            kind,
            location,
            rooms,
        } = params;
        Self {
            featured: featured.as_deref().and_then(lenient_bool),
            operation,
            kind,
            location,
            rooms: rooms.as_deref().and_then(list::Rooms::from_param),
        }
    }
}

/// `GET /api/properties` handler.
///
/// Lists the [`Property`]s satisfying the [`ListParams`], featured ones
/// first.
pub async fn list(
    Extension(service): Extension<crate::Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Property>>, Error> {
    service
        .execute(query::properties::List {
            filter: params.into(),
        })
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

/// `GET /api/properties/{id}` handler.
pub async fn by_id(
    Extension(service): Extension<crate::Service>,
    Path(id): Path<i64>,
) -> Result<Json<Property>, Error> {
    service
        .execute(query::property::ById(id.into()))
        .await
        .map_err(|e| e.into_error())?
        .map(Json)
        .ok_or_else(|| PropertyError::NotFound.into())
}

/// `POST /api/properties` handler.
///
/// Creates a new [`Property`] from the submitted `multipart/form-data`.
pub async fn create(
    _: Admin,
    Extension(service): Extension<crate::Service>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, Error> {
    let form = PropertyForm::parse(multipart).await?;

    let created = service
        .execute(CreateProperty {
            title: require(form.title, "title")?,
            location: require(form.location, "location")?,
            price: require(form.price, "price")?,
            kind: require(form.kind, "type")?,
            operation: require(form.operation, "operation")?,
            surface: require(form.surface, "surface")?,
            bedrooms: require(form.bedrooms, "bedrooms")?,
            bathrooms: require(form.bathrooms, "bathrooms")?,
            featured: form.featured,
            description: form.description,
            latitude: form.latitude,
            longitude: form.longitude,
            images: form.images,
            video_url: form.video_url,
            floorplan: form.floorplan,
            reserved: form.reserved,
            rented: form.rented,
            sold: form.sold,
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(Json(serde_json::json!({
        "message": "Property created successfully",
        "property": created,
    })))
}

/// `PUT /api/properties/{id}` handler.
///
/// Updates an existing [`Property`] from the submitted
/// `multipart/form-data`. Stored media is kept unless new files actually
/// arrived, and coordinates follow the [`CoordinateUpdate`] convention.
pub async fn update(
    _: Admin,
    Extension(service): Extension<crate::Service>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, Error> {
    let form = PropertyForm::parse(multipart).await?;

    let updated = service
        .execute(UpdateProperty {
            id: id.into(),
            title: require(form.title, "title")?,
            location: require(form.location, "location")?,
            price: require(form.price, "price")?,
            kind: require(form.kind, "type")?,
            operation: require(form.operation, "operation")?,
            surface: require(form.surface, "surface")?,
            bedrooms: require(form.bedrooms, "bedrooms")?,
            bathrooms: require(form.bathrooms, "bathrooms")?,
            featured: form.featured,
            description: form.description,
            latitude: CoordinateUpdate::from_form(form.latitude),
            longitude: CoordinateUpdate::from_form(form.longitude),
            images: form.images,
            video_url: form.video_url,
            floorplan: form.floorplan,
            reserved: form.reserved,
            rented: form.rented,
            sold: form.sold,
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(Json(serde_json::json!({
        "message": "Property updated successfully",
        "property": updated,
    })))
}

/// `DELETE /api/properties/{id}` handler.
///
/// Media files failing to be cleaned up don't fail the deletion, but are
/// reported in the response.
pub async fn delete(
    _: Admin,
    Extension(service): Extension<crate::Service>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, Error> {
    let deleted = service
        .execute(DeleteProperty { id: id.into() })
        .await
        .map_err(|e| e.into_error())?;

    Ok(Json(serde_json::json!({
        "message": "Property deleted successfully",
        "cleanup_failures": deleted.failed_cleanups,
    })))
}

/// `multipart/form-data` payload of the [`create`] and [`update`]
/// handlers.
#[derive(Debug, Default)]
struct PropertyForm {
    title: Option<property::Title>,
    location: Option<property::Location>,
    price: Option<property::Price>,
    kind: Option<property::Kind>,
    operation: Option<property::Operation>,
    surface: Option<property::Surface>,
    bedrooms: Option<property::Bedrooms>,
    bathrooms: Option<property::Bathrooms>,
    featured: bool,
    description: Option<property::Description>,
    latitude: Option<String>,
    longitude: Option<String>,
    images: Vec<media::Upload>,
    video_url: Option<property::VideoUrl>,
    floorplan: Option<media::Upload>,
    reserved: bool,
    rented: bool,
    sold: bool,
}

impl PropertyForm {
    /// Parses a [`PropertyForm`] out of the provided [`Multipart`] stream.
    ///
    /// Unknown fields are ignored.
    async fn parse(mut multipart: Multipart) -> Result<Self, Error> {
        let mut form = Self::default();

        while let Some(field) =
            multipart.next_field().await.map_err(malformed)?
        {
            let Some(name) = field.name().map(ToOwned::to_owned) else {
                continue;
            };
            match name.as_str() {
                "images" => {
                    let file_name =
                        field.file_name().unwrap_or_default().to_owned();
                    let bytes =
                        field.bytes().await.map_err(malformed)?.to_vec();
                    form.images.push(media::Upload {
                        file_name,
                        bytes,
                        kind: media::Kind::Images,
                    });
                }
                "floorplan" => {
                    let file_name =
                        field.file_name().unwrap_or_default().to_owned();
                    let bytes =
                        field.bytes().await.map_err(malformed)?.to_vec();
                    form.floorplan = Some(media::Upload {
                        file_name,
                        bytes,
                        kind: media::Kind::Images,
                    });
                }
                name => {
                    let text = field.text().await.map_err(malformed)?;
                    form.apply_text_field(name, text)?;
                }
            }
        }

        Ok(form)
    }

    /// Applies a single non-file form field to this [`PropertyForm`].
    fn apply_text_field(
        &mut self,
        name: &str,
        text: String,
    ) -> Result<(), Error> {
        match name {
            "title" => {
                self.title = Some(validated(property::Title::new(text), name)?);
            }
            "location" => {
                self.location =
                    Some(validated(property::Location::new(text), name)?);
            }
            "price" => {
                self.price = Some(validated(property::Price::new(text), name)?);
            }
            "type" => {
                self.kind = Some(validated(property::Kind::new(text), name)?);
            }
            "operation" => {
                self.operation =
                    Some(validated(property::Operation::new(text), name)?);
            }
            "surface" => self.surface = Some(integer(&text, name)?),
            "bedrooms" => self.bedrooms = Some(integer(&text, name)?),
            "bathrooms" => self.bathrooms = Some(integer(&text, name)?),
            "featured" => self.featured = parse_bool(&text),
            // An empty description falls back to the stored placeholder.
            "description" => {
                self.description = property::Description::new(text);
            }
            "latitude" => self.latitude = Some(text),
            "longitude" => self.longitude = Some(text),
            "video_url" => self.video_url = Some(text.into()),
            "reserved" => self.reserved = parse_bool(&text),
            "alquilado" => self.rented = parse_bool(&text),
            "vendido" => self.sold = parse_bool(&text),
            _ => {}
        }
        Ok(())
    }
}

/// Parses a checkbox-style boolean form value.
fn parse_bool(text: &str) -> bool {
    lenient_bool(text) == Some(true)
}

/// Coerces a boolean wire value leniently, ignoring unrecognized input.
fn lenient_bool(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Parses an integer form value.
fn integer<N: std::str::FromStr>(
    text: &str,
    name: &str,
) -> Result<N, Error> {
    text.trim().parse().map_err(|_| {
        validation(format!("field `{name}` must be a valid integer"))
    })
}

/// Unwraps a validated form value.
fn validated<T>(value: Option<T>, name: &str) -> Result<T, Error> {
    value.ok_or_else(|| validation(format!("field `{name}` is invalid")))
}

/// Unwraps a required form field.
fn require<T>(field: Option<T>, name: &str) -> Result<T, Error> {
    field.ok_or_else(|| {
        validation(format!("missing required field `{name}`"))
    })
}

/// Creates a validation [`Error`] with the provided message.
fn validation(message: String) -> Error {
    Error {
        code: "VALIDATION_FAILED",
        status_code: http::StatusCode::BAD_REQUEST,
        message,
        backtrace: None,
    }
}

/// Creates an [`Error`] out of a malformed `multipart/form-data` payload.
fn malformed(e: axum::extract::multipart::MultipartError) -> Error {
    Error {
        code: "BAD_REQUEST",
        status_code: http::StatusCode::BAD_REQUEST,
        message: e.to_string(),
        backtrace: None,
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Property not found"]
        NotFound,
    }
}
