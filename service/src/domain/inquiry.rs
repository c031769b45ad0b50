//! [`Inquiry`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use common::DateTime;

/// Client-submitted appraisal or contact request.
///
/// Never mutated once created; only listed and deleted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Inquiry {
    /// ID of this [`Inquiry`].
    pub id: Id,

    /// [`Kind`] of this [`Inquiry`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// [`DateTime`] when this [`Inquiry`] was submitted.
    #[serde(rename = "date", with = "common::datetime::serde::human")]
    pub created_at: CreationDateTime,

    /// Submitted [`Payload`].
    pub data: Payload,
}

/// ID of an [`Inquiry`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
pub struct Id(String);

impl Id {
    /// Creates a new random [`Id`].
    ///
    /// The ID is the first 8 hex characters of a freshly generated UUID.
    /// Collisions are possible at this length and accepted: inquiries are
    /// short-lived records reviewed and removed by the admin.
    #[expect(clippy::missing_panics_doc, reason = "slicing is infallible")]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string()[..8].to_owned())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of an [`Inquiry`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
)]
pub enum Kind {
    /// Appraisal request.
    #[serde(rename = "Tasación")]
    #[strum(to_string = "Tasación")]
    Appraisal,

    /// Contact message.
    #[serde(rename = "Contacto")]
    #[strum(to_string = "Contacto")]
    Contact,
}

/// Payload of an [`Inquiry`].
///
/// Field names follow the public wire (and on-disk) contract of the
/// legacy forms, hence the Spanish renames.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Payload of an [`Appraisal`] request.
    Appraisal(Appraisal),

    /// Payload of a [`Contact`] message.
    Contact(Contact),
}

impl Payload {
    /// Returns the [`Kind`] of an [`Inquiry`] carrying this [`Payload`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Appraisal(_) => Kind::Appraisal,
            Self::Contact(_) => Kind::Contact,
        }
    }
}

/// Appraisal request form.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Appraisal {
    /// Name of the client.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Surname of the client.
    #[serde(rename = "apellido")]
    pub surname: String,

    /// Email of the client.
    pub email: String,

    /// Phone of the client, if provided.
    #[serde(default, rename = "telefono")]
    pub phone: Option<String>,

    /// Free-form comment describing the property to appraise.
    #[serde(rename = "comentario")]
    pub comment: String,
}

/// Contact message form.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Contact {
    /// Name of the client.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Email of the client.
    pub email: String,

    /// Phone of the client, if provided.
    #[serde(default, rename = "telefono")]
    pub phone: Option<String>,

    /// Message of the client.
    #[serde(rename = "mensaje")]
    pub message: String,
}

/// [`DateTime`] when an [`Inquiry`] was submitted.
pub type CreationDateTime = DateTimeOf<(Inquiry, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Id, Inquiry, Kind, Payload};

    #[test]
    fn id_is_short_hex() {
        let id = Id::new();
        let id: &str = id.as_ref();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn kind_displays_spanish_tags() {
        assert_eq!(Kind::Appraisal.to_string(), "Tasación");
        assert_eq!(Kind::Contact.to_string(), "Contacto");
    }

    #[test]
    fn deserializes_legacy_document_entry() {
        let inquiry: Inquiry = serde_json::from_value(serde_json::json!({
            "id": "deadbeef",
            "type": "Tasación",
            "date": "2024-03-02 18:45:12",
            "data": {
                "nombre": "Ana",
                "apellido": "García",
                "email": "ana@example.com",
                "comentario": "Piso en el centro",
            },
        }))
        .unwrap();
        assert_eq!(inquiry.kind, Kind::Appraisal);
        assert!(matches!(inquiry.data, Payload::Appraisal(_)));
    }

    #[test]
    fn payload_distinguishes_contact_shape() {
        let payload: Payload = serde_json::from_value(serde_json::json!({
            "nombre": "Luis",
            "email": "luis@example.com",
            "telefono": "600123123",
            "mensaje": "¿Sigue disponible?",
        }))
        .unwrap();
        assert_eq!(payload.kind(), Kind::Contact);
    }
}
