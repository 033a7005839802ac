use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::assessment::{assess, AssessmentResult, Criterion};
use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentFormat};
use crate::state::AppState;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    data: Bytes,
}

/// POST /assess-cv (also POST /api/v1/assess)
pub async fn handle_assess_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AssessmentResult>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let format = DocumentFormat::from_filename(&upload.filename);
    let span = info_span!(
        "assess",
        request_id = %Uuid::new_v4(),
        filename = %upload.filename,
        %format,
        bytes = upload.data.len(),
    );

    async move {
        let text = extract_text(format, upload.data, &state.extraction).await?;

        let registry = state.registry.clone();
        let segmenter = state.segmenter.clone();
        let result = tokio::task::spawn_blocking(move || assess(&text, &registry, segmenter.as_ref()))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("assessment task failed: {e}")))??;

        for (criterion, sentences) in result.criteria_met().iter() {
            debug!(criterion, sentences = sentences.len(), "Criterion evidence");
        }
        info!(
            criteria_met = result.criteria_met().met_count(),
            criteria_total = result.criteria_met().len(),
            rating = ?result.rating(),
            "Assessment complete"
        );
        Ok::<_, AppError>(Json(result))
    }
    .instrument(span)
    .await
}

/// GET /api/v1/criteria
pub async fn handle_list_criteria(State(state): State<AppState>) -> Json<Vec<Criterion>> {
    Json(state.registry.criteria().to_vec())
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed multipart body"))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read upload"))?;
        return Ok(Upload { filename, data });
    }

    Err(AppError::UnprocessableEntity(format!(
        "Missing '{FILE_FIELD}' field in multipart form"
    )))
}

/// Body-limit overruns surface here as multipart read failures; axum tags them 413.
fn multipart_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", err.body_text()))
    } else {
        AppError::Validation(format!("{context}: {}", err.body_text()))
    }
}
