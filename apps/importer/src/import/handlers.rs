use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::import::decoder::Upload;
use crate::import::service::{import_document, ImportResponse};
use crate::import::store::{AuditRecord, StoredProfile};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// POST /api/v1/profile/import
/// Multipart form with a `user_id` text field and a `file` part.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid user_id field: {e}")))?;
                let parsed = Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::Validation(format!("Invalid user_id '{}'", raw.trim())))?;
                user_id = Some(parsed);
            }
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file field: {e}")))?;
                upload = Some(Upload {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("Missing user_id field".into()))?;
    let upload = upload.ok_or_else(|| AppError::Validation("Missing file field".into()))?;

    let response = import_document(&state, user_id, upload).await?;
    Ok(Json(response))
}

/// GET /api/v1/profile?user_id=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<StoredProfile>, AppError> {
    let profile = state
        .profiles
        .get(params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", params.user_id)))?;
    Ok(Json(profile))
}

/// GET /api/v1/profile/imports?user_id=
pub async fn handle_import_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AuditRecord>>, AppError> {
    let history = state.audit_log.history(params.user_id).await?;
    Ok(Json(history))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::extraction::models::ExtractionConfig;
    use crate::import::store::memory::{InMemoryAuditLog, InMemoryProfileStore};
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "importer-test-boundary";
    const RESUME: &str = "John Smith\njohn.smith@example.com\n\nExperience\nSenior Engineer at Acme Corp 2019-present\n\nEducation\nBachelor of Science in Computer Science, State University, 2015\n\nSkills\nPython, Go, SQL";

    fn app() -> Router {
        build_router(AppState::in_memory(
            Arc::new(InMemoryProfileStore::default()),
            Arc::new(InMemoryAuditLog::default()),
            ExtractionConfig::default(),
        ))
    }

    fn import_request(user_id: Option<&str>, file: Option<&str>) -> Request<Body> {
        let mut body = String::new();
        if let Some(user_id) = user_id {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"user_id\"\r\n\r\n{user_id}\r\n"
            ));
        }
        if let Some(file) = file {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.txt\"\r\nContent-Type: text/plain\r\n\r\n{file}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/v1/profile/import")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_import_then_fetch_profile() {
        let app = app();
        let user = uuid::Uuid::new_v4().to_string();

        let response = app
            .clone()
            .oneshot(import_request(Some(&user), Some(RESUME)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["report"]["overall_status"], "success");
        assert_eq!(body["profile"]["profile"]["name"], "John Smith");
        assert_eq!(
            body["profile"]["profile"]["education"][0]["institution"],
            "State University"
        );

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/v1/profile?user_id={user}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["profile"]["email"], "john.smith@example.com");

        let response = app
            .oneshot(get_request(&format!("/api/v1/profile/imports?user_id={user}")))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["report"]["config_version"], "v1");
    }

    #[tokio::test]
    async fn test_missing_file_is_bad_request() {
        let user = uuid::Uuid::new_v4().to_string();
        let response = app()
            .oneshot(import_request(Some(&user), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_user_id_is_bad_request() {
        let response = app()
            .oneshot(import_request(Some("not-a-uuid"), Some(RESUME)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unrecognisable_resume_is_unprocessable() {
        let user = uuid::Uuid::new_v4().to_string();
        let response = app()
            .oneshot(import_request(Some(&user), Some("lorem ipsum dolor sit amet")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PROFILE_VALIDATION_ERROR");
        assert_eq!(
            body["error"]["missing_fields"],
            serde_json::json!(["name", "email"])
        );
    }

    #[tokio::test]
    async fn test_blank_upload_is_unprocessable() {
        let user = uuid::Uuid::new_v4().to_string();
        let response = app()
            .oneshot(import_request(Some(&user), Some("   ")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let uri = format!("/api/v1/profile?user_id={}", uuid::Uuid::new_v4());
        let response = app().oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "importer");
    }
}
