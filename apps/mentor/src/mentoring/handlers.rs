//! Axum route handler for the mentoring endpoint.

use std::path::PathBuf;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::mentoring::classifier::classify;
use crate::mentoring::context::{build_issue_context, NO_CODE_PROVIDED};
use crate::mentoring::dispatcher::dispatch;
use crate::state::AppState;
use crate::submission::archive::extract_user_code;
use crate::submission::{allowed_file, extract_question_id, save_upload};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub response: String,
}

/// The `file` part of the form, as received.
#[derive(Debug)]
struct UploadedFile {
    file_name: Option<String>,
    bytes: Bytes,
}

#[derive(Debug, Default)]
struct ProcessForm {
    query: Option<String>,
    file: Option<UploadedFile>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/process
///
/// Multipart form: `query` (required text) and `file` (`<question_id>.zip`).
/// Looks up the question, extracts the code, classifies the query and returns the
/// mentoring reply as `{"response": ...}`. A body that is not multipart at all is
/// treated as a form without a query.
pub async fn handle_process(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(%request_id, "Rejected non-multipart request: {}", rejection.body_text());
            return Err(AppError::Validation("User query is required".to_string()));
        }
    };

    process(state, multipart)
        .instrument(info_span!("process", %request_id))
        .await
}

async fn process(state: AppState, multipart: Multipart) -> Result<Json<ProcessResponse>, AppError> {
    let form = read_form(multipart).await?;

    let user_query = form
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::Validation("User query is required".to_string()))?;

    let (file_name, bytes) = match form.file {
        Some(UploadedFile {
            file_name: Some(name),
            bytes,
        }) if allowed_file(&name) => (name, bytes),
        Some(_) => {
            return Err(AppError::Validation(
                "Invalid file type. Only .zip files are allowed".to_string(),
            ))
        }
        None => {
            return Err(AppError::Validation(
                "Zip file is required to extract the question ID".to_string(),
            ))
        }
    };

    let upload_dir = state.config.upload_dir.clone();
    let zip_path = {
        let dir = upload_dir.clone();
        let name = file_name.clone();
        tokio::task::spawn_blocking(move || save_upload(&dir, &name, &bytes))
            .await
            .context("Upload task failed")??
    };
    info!("File uploaded successfully: {}", zip_path.display());

    let question_id = extract_question_id(&file_name)
        .ok_or_else(|| {
            AppError::Validation("Question ID not found in the zip file name".to_string())
        })?
        .to_string();

    let store = state.questions.clone();
    let lookup_id = question_id.clone();
    let question = tokio::task::spawn_blocking(move || store.lookup(&lookup_id))
        .await
        .context("Question lookup task failed")?
        .map_err(|e| {
            warn!("Error fetching question details for '{question_id}': {e}");
            AppError::Lookup("Question details not found".to_string())
        })?;

    let user_code = extract_code(zip_path, upload_dir).await?;

    let classification = classify(state.classifier.as_ref(), &user_query).await?;

    let issue_context = build_issue_context(
        &classification.user_query_summary,
        &question,
        &user_code,
    );

    let response = dispatch(
        state.mentor.as_ref(),
        &classification.query_category,
        &issue_context,
        &classification.user_query_summary,
    )
    .await?;

    Ok(Json(ProcessResponse { response }))
}

/// Collects the known form fields. Unknown fields are drained and ignored.
async fn read_form(mut multipart: Multipart) -> Result<ProcessForm, AppError> {
    let mut form = ProcessForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("query") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                form.query = Some(text);
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                form.file = Some(UploadedFile { file_name, bytes });
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Extracts the saved archive, degrading to [`NO_CODE_PROVIDED`] when it cannot be read.
async fn extract_code(zip_path: PathBuf, upload_dir: PathBuf) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || {
        let result = extract_user_code(&zip_path, &upload_dir);
        (zip_path, result)
    })
    .await
    .context("Archive extraction task failed")?;

    Ok(match extracted {
        (_, Ok(code)) => code,
        (zip_path, Err(e)) => {
            warn!("Error extracting user code from {}: {e}", zip_path.display());
            NO_CODE_PROVIDED.to_string()
        }
    })
}
