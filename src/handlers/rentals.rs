use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::rental_booking::{
    self, BookingStatus, DriveOption, PaymentMethod, RentalType,
};
use crate::entities::rental_vehicle;
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::services::rental as workflow;
use crate::services::rental::CreateBooking;
use crate::utils::jwt::Claims;
use crate::AppState;

/// List available rental vehicles, newest first
pub async fn list_rental_vehicles(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<rental_vehicle::Model>>>> {
    let vehicles = rental_vehicle::Entity::find()
        .filter(rental_vehicle::Column::Available.eq(true))
        .order_by_desc(rental_vehicle::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(ApiResponse::data(vehicles))
}

/// Get a rental vehicle
pub async fn get_rental_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<rental_vehicle::Model>>> {
    let vehicle = rental_vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental vehicle not found".to_string()))?;

    Ok(ApiResponse::data(vehicle))
}

// ============ Booking Workflow ============

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub vehicle_id: Uuid,
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub return_location: String,
    pub return_date: NaiveDate,
    pub return_time: NaiveTime,
    pub rental_type: RentalType,
    pub drive_option: DriveOption,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

/// Book a rental vehicle; the total is priced server-side
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<rental_booking::Model>>)> {
    let booking = workflow::create(
        &state.db,
        CreateBooking {
            user_id: claims.sub,
            vehicle_id: payload.vehicle_id,
            pickup_location: payload.pickup_location,
            pickup_date: payload.pickup_date,
            pickup_time: payload.pickup_time,
            return_location: payload.return_location,
            return_date: payload.return_date,
            return_time: payload.return_time,
            rental_type: payload.rental_type,
            drive_option: payload.drive_option,
            payment_method: payload.payment_method,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, ApiResponse::data(booking)))
}

/// Pending, active and late bookings (admin)
pub async fn list_active_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ApiResponse<Vec<rental_booking::Model>>>> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let bookings = workflow::list_active(&state.db).await?;
    Ok(ApiResponse::data(bookings))
}

/// Cancelled and completed bookings (admin)
pub async fn list_booking_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ApiResponse<Vec<rental_booking::Model>>>> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let bookings = workflow::list_history(&state.db).await?;
    Ok(ApiResponse::data(bookings))
}

/// Cancel a booking. Admins can cancel any booking; customers only their own.
/// The acting side is taken from the token, and the other side is notified.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelBookingRequest>,
) -> AppResult<Json<ApiResponse<rental_booking::Model>>> {
    let admin_acting = claims.is_admin();

    if !admin_acting {
        let booking = rental_booking::Entity::find_by_id(id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != claims.sub {
            return Err(AppError::Forbidden(
                "You can only cancel your own bookings".to_string(),
            ));
        }
    }

    let booking = workflow::cancel(
        &state.db,
        &state.notifier,
        &state.config.admin_email,
        id,
        payload.reason,
        admin_acting,
    )
    .await?;

    Ok(ApiResponse::data(booking))
}

/// Advance a booking through its lifecycle (admin)
pub async fn update_booking_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<ApiResponse<rental_booking::Model>>> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let new_status = parse_status(&payload.status)?;
    let booking = workflow::update_status(&state.db, id, new_status).await?;

    Ok(ApiResponse::data(booking))
}

fn parse_status(raw: &str) -> AppResult<BookingStatus> {
    match raw {
        "not_paid" => Ok(BookingStatus::NotPaid),
        "pending" => Ok(BookingStatus::Pending),
        "active" => Ok(BookingStatus::Active),
        "late" => Ok(BookingStatus::Late),
        "completed" => Ok(BookingStatus::Completed),
        "completed_late" => Ok(BookingStatus::CompletedLate),
        "cancelled" => Ok(BookingStatus::Cancelled),
        other => Err(AppError::BadRequest(format!(
            "Unknown booking status: {}",
            other
        ))),
    }
}
