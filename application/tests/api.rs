//! HTTP API tests.

use application::{api, AdminCredentials, Service};
use axum::{body::Body, Extension, Router};
use http::{header, Request, StatusCode};
use http_body_util::BodyExt as _;
use secrecy::SecretString;
use service::infra::{media, store, FsMedia, JsonFiles};
use tempfile::TempDir;
use tower::ServiceExt as _;

// `admin:secret` in Base64.
const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

fn app(dir: &TempDir, admin: AdminCredentials) -> Router {
    let database = JsonFiles::new(&store::json::Config {
        dir: dir.path().join("data"),
    })
    .unwrap();
    let files = FsMedia::new(&media::fs::Config {
        dir: dir.path().join("static/uploads"),
    })
    .unwrap();

    api::router(dir.path().join("static"))
        .layer(Extension(Service::new(database, files)))
        .layer(Extension(admin))
}

fn admin() -> AdminCredentials {
    AdminCredentials {
        username: Some("admin".to_owned()),
        password: Some(SecretString::from("secret".to_owned())),
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let response = app
        .oneshot(
            Request::get("/api/properties").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn unknown_property_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let response = app
        .oneshot(
            Request::get("/api/properties/7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], "PROPERTY_NOT_FOUND");
}

#[tokio::test]
async fn admin_endpoints_challenge_unauthenticated_requests() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let response = app
        .oneshot(Request::get("/api/clients").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Basic"),
    );
}

#[tokio::test]
async fn admin_endpoints_reject_wrong_credentials() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let response = app
        .oneshot(
            Request::get("/api/clients")
                // `admin:wrong` in Base64.
                .header(header::AUTHORIZATION, "Basic YWRtaW46d3Jvbmc=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_endpoints_fail_closed_without_configured_credentials() {
    let dir = TempDir::new().unwrap();
    let app = app(
        &dir,
        AdminCredentials {
            username: None,
            password: None,
        },
    );

    let response = app
        .oneshot(
            Request::get("/api/clients")
                .header(header::AUTHORIZATION, BASIC_AUTH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn contact_inquiry_round_trip() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/contacto")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "nombre": "Luis",
                        "email": "luis@example.com",
                        "mensaje": "¿Sigue disponible?",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Mensaje enviado con éxito");

    let response = app
        .oneshot(
            Request::get("/api/clients")
                .header(header::AUTHORIZATION, BASIC_AUTH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let recorded = json_body(response).await;
    assert_eq!(recorded.as_array().map(Vec::len), Some(1));
    assert_eq!(recorded[0]["type"], "Contacto");
    assert_eq!(recorded[0]["data"]["nombre"], "Luis");
}

#[tokio::test]
async fn appraisal_inquiry_returns_its_receipt() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let response = app
        .oneshot(
            Request::post("/api/tasaciones")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "nombre": "Ana",
                        "apellido": "García",
                        "email": "ana@example.com",
                        "telefono": "600123123",
                        "comentario": "Piso de 90 m2 en el centro",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Solicitud recibida correctamente");
}

#[tokio::test]
async fn missing_required_form_field_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; \
         name=\"title\"\r\n\r\nSolo título\r\n--{boundary}--\r\n",
    );

    let response = app
        .oneshot(
            Request::post("/api/properties")
                .header(header::AUTHORIZATION, BASIC_AUTH)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn property_is_created_from_multipart_form() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let boundary = "test-boundary";
    let mut body = String::new();
    for (name, value) in [
        ("title", "Piso céntrico"),
        ("location", "Zaragoza centro"),
        ("price", "150.000 €"),
        ("type", "piso"),
        ("operation", "venta"),
        ("surface", "90"),
        ("bedrooms", "3"),
        ("bathrooms", "1"),
        ("featured", "on"),
        ("latitude", "41.65"),
        ("longitude", "invalid"),
    ] {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; \
             name=\"{name}\"\r\n\r\n{value}\r\n",
        ));
    }
    body.push_str(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; \
         name=\"images\"; filename=\"front.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\nJPEGDATA\r\n--{boundary}--\r\n",
    ));

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/properties")
                .header(header::AUTHORIZATION, BASIC_AUTH)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    assert_eq!(created["message"], "Property created successfully");
    assert_eq!(created["property"]["id"], 1);
    assert_eq!(created["property"]["featured"], true);
    assert_eq!(created["property"]["latitude"], 41.65);
    assert_eq!(
        created["property"]["longitude"],
        serde_json::Value::Null,
    );
    assert_eq!(
        created["property"]["description"],
        "Sin descripción disponible.",
    );
    assert_eq!(
        created["property"]["images"].as_array().map(Vec::len),
        Some(1),
    );

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/properties?type=PISO&rooms=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    // Numeric booleans coerce instead of failing deserialization.
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/properties?featured=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    // A huge rooms value still lands in the "4 or more" bucket, so the
    // 3-bedroom listing is filtered out rather than returned unfiltered.
    let response = app
        .oneshot(
            Request::get("/api/properties?rooms=300")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn property_creation_requires_authentication() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir, admin());

    let response = app
        .oneshot(
            Request::post("/api/properties")
                .header(
                    header::CONTENT_TYPE,
                    "multipart/form-data; boundary=x",
                )
                .body(Body::from("--x--\r\n"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
