//! Contact form API endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::CreateContactInput;

/// Form descriptor returned on GET, matching what the submit expects
#[derive(Debug, Serialize)]
pub struct ContactFormResponse {
    pub fields: [&'static str; 3],
}

/// Acknowledgment returned after a stored submission
#[derive(Debug, Serialize)]
pub struct ContactAckResponse {
    pub message: &'static str,
}

/// GET /contact-us/
pub async fn contact_form() -> Json<ContactFormResponse> {
    Json(ContactFormResponse {
        fields: ["name", "email", "message"],
    })
}

/// POST /contact-us/
///
/// A valid submission stores exactly one record and returns a static
/// acknowledgment; an invalid one stores nothing and reports field errors.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContactInput>,
) -> Result<(StatusCode, Json<ContactAckResponse>), ApiError> {
    state.contact_service.submit(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactAckResponse {
            message: "Xabaringiz qabul qilindi",
        }),
    ))
}
