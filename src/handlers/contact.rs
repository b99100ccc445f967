use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::contact_message;
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Submit a contact message
pub async fn submit_message(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<contact_message::Model>>)> {
    if payload.name.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and message are required".to_string(),
        ));
    }

    let new_message = contact_message::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        message: Set(payload.message),
        ..Default::default()
    };

    let message = new_message.insert(&state.db).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(message)))
}
