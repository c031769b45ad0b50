//! [`Inquiry`]-related HTTP handlers.

use axum::{extract::Path, Extension, Json};
use service::{
    command::{DeleteInquiry, SubmitInquiry},
    domain::{inquiry, Inquiry},
    query, Command as _,
};

use crate::{Admin, AsError as _, Error};

/// `POST /api/tasaciones` handler.
///
/// Records an appraisal request submitted from the public website.
pub async fn submit_appraisal(
    Extension(service): Extension<crate::Service>,
    Json(form): Json<inquiry::Appraisal>,
) -> Result<Json<serde_json::Value>, Error> {
    _ = service
        .execute(SubmitInquiry {
            payload: inquiry::Payload::Appraisal(form),
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(Json(serde_json::json!({
        "message": "Solicitud recibida correctamente",
    })))
}

/// `POST /api/contacto` handler.
///
/// Records a contact message submitted from the public website.
pub async fn submit_contact(
    Extension(service): Extension<crate::Service>,
    Json(form): Json<inquiry::Contact>,
) -> Result<Json<serde_json::Value>, Error> {
    _ = service
        .execute(SubmitInquiry {
            payload: inquiry::Payload::Contact(form),
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(Json(serde_json::json!({
        "message": "Mensaje enviado con éxito",
    })))
}

/// `GET /api/clients` handler.
///
/// Lists all the recorded [`Inquiry`] submissions, in submission order.
pub async fn list(
    _: Admin,
    Extension(service): Extension<crate::Service>,
) -> Result<Json<Vec<Inquiry>>, Error> {
    service
        .execute(query::inquiries::List)
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

/// `DELETE /api/clients/{id}` handler.
///
/// Deleting an unknown ID is a no-op rather than an error.
pub async fn delete(
    _: Admin,
    Extension(service): Extension<crate::Service>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, Error> {
    service
        .execute(DeleteInquiry { id: id.into() })
        .await
        .map_err(|e| e.into_error())?;

    Ok(Json(serde_json::json!({
        "message": "Cliente eliminado",
    })))
}
