use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::appointment::{self, AppointmentStatus};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::services::appointment as workflow;
use crate::services::appointment::{ActingRole, CreateAppointment, TransitionRequest};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionStatusRequest {
    pub status: String,
    pub role: String,
    pub reason: Option<String>,
}

/// Request a viewing appointment; the logged-in user is the buyer
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<appointment::Model>>)> {
    let appointment = workflow::create(
        &state.db,
        CreateAppointment {
            buyer_user_id: claims.sub,
            vehicle_id: payload.vehicle_id,
            date: payload.date,
            time: payload.time,
            location: payload.location,
            description: payload.description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, ApiResponse::data(appointment)))
}

/// List every appointment (admin)
pub async fn list_all_appointments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ApiResponse<Vec<appointment::Model>>>> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let appointments = workflow::list_all(&state.db).await?;
    Ok(ApiResponse::data(appointments))
}

/// List a user's appointments partitioned by side (self or admin)
pub async fn list_user_appointments(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<workflow::UserAppointments>>> {
    if claims.sub != user_id && !claims.is_admin() {
        return Err(AppError::Forbidden(
            "You can only view your own appointments".to_string(),
        ));
    }

    let appointments = workflow::list_by_user(&state.db, user_id).await?;
    Ok(ApiResponse::data(appointments))
}

/// Transition an appointment: body carries the target status, the acting
/// role (selects who gets notified) and an optional cancellation reason
pub async fn transition_appointment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionStatusRequest>,
) -> AppResult<Json<ApiResponse<appointment::Model>>> {
    let new_status = parse_status(&payload.status)?;
    let acting_role = ActingRole::parse(&payload.role)?;

    let appointment = workflow::transition(
        &state.db,
        &state.notifier,
        TransitionRequest {
            appointment_id: id,
            new_status,
            acting_role,
            actor_user_id: claims.sub,
            actor_is_admin: claims.is_admin(),
            reason: payload.reason,
        },
    )
    .await?;

    Ok(ApiResponse::data(appointment))
}

fn parse_status(raw: &str) -> AppResult<AppointmentStatus> {
    match raw {
        "pending" => Ok(AppointmentStatus::Pending),
        "confirmed" => Ok(AppointmentStatus::Confirmed),
        "cancelled" => Ok(AppointmentStatus::Cancelled),
        "completed" => Ok(AppointmentStatus::Completed),
        other => Err(AppError::BadRequest(format!(
            "Unknown appointment status: {}",
            other
        ))),
    }
}
