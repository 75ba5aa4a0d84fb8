//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::screening::batch::{BatchReport, DocumentInput};
use crate::state::AppState;

/// Multipart field names carrying resume files.
const FILE_FIELDS: [&str; 2] = ["resumes", "files"];
const SKILLS_FIELD: &str = "skills";
const ENHANCED_FIELD: &str = "enhanced";

/// The parsed multipart form.
#[derive(Debug)]
struct ScreenForm {
    documents: Vec<DocumentInput>,
    skills: String,
    enhanced: bool,
}

/// POST /api/v1/screen
///
/// Screens every uploaded resume against the comma-separated `skills` field.
/// `enhanced=false` skips the semantic judge even when one is configured.
pub async fn handle_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchReport>, AppError> {
    let form = read_form(multipart).await?;
    let report = state
        .screener
        .run(form.documents, &form.skills, form.enhanced)
        .await?;
    Ok(Json(report))
}

async fn read_form(mut multipart: Multipart) -> Result<ScreenForm, AppError> {
    let mut form = ScreenForm {
        documents: Vec::new(),
        skills: String::new(),
        enhanced: true,
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if FILE_FIELDS.contains(&name.as_str()) {
            let file_name = field
                .file_name()
                .map(str::to_string)
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("resume-{}", form.documents.len() + 1));
            let content = field.bytes().await?;
            form.documents.push(DocumentInput { content, file_name });
        } else if name == SKILLS_FIELD {
            form.skills = field.text().await?;
        } else if name == ENHANCED_FIELD {
            form.enhanced = parse_flag(&field.text().await?)?;
        } else {
            tracing::debug!("Ignoring unknown multipart field '{name}'");
        }
    }

    Ok(form)
}

fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(AppError::Validation(format!(
            "'{ENHANCED_FIELD}' must be true or false, got '{other}'"
        ))),
    }
}
