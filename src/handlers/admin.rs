use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::user::{self, UserRole};
use crate::entities::{contact_message, rental_vehicle, vehicle};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::AppState;

// ============ User Management ============

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            phone: u.phone,
            role: u.role,
            verified: u.verified,
            created_at: u.created_at.with_timezone(&Utc),
        }
    }
}

/// List all users (admin)
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = user::Entity::find().all(&state.db).await?;

    let responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(ApiResponse::data(responses))
}

/// Mark a user as verified (admin)
pub async fn verify_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut active: user::ActiveModel = user.into();
    active.verified = Set(true);

    let updated = active.update(&state.db).await?;
    Ok(ApiResponse::data(UserResponse::from(updated)))
}

/// Delete a user account (admin). Listings, bookings, appointments, wishlist
/// rows and reports go with it via the FK cascades.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let user = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.role == UserRole::Admin {
        return Err(AppError::BadRequest(
            "Admin accounts cannot be deleted".to_string(),
        ));
    }

    user::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(ApiResponse::message("User deleted"))
}

/// Remove a sale listing for moderation (admin)
pub async fn remove_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let result = vehicle::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Vehicle not found".to_string()));
    }

    Ok(ApiResponse::message("Vehicle deleted"))
}

// ============ Contact Inbox ============

/// List contact messages, newest first (admin)
pub async fn list_messages(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<contact_message::Model>>>> {
    let messages = contact_message::Entity::find()
        .order_by_desc(contact_message::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(ApiResponse::data(messages))
}

// ============ Rental Fleet Management ============

#[derive(Debug, Deserialize)]
pub struct CreateRentalVehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub rate_per_hour: i64,
    pub rate_per_day: i64,
    pub rate_per_week: i64,
    pub rate_per_month: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRentalVehicleRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub rate_per_hour: Option<i64>,
    pub rate_per_day: Option<i64>,
    pub rate_per_week: Option<i64>,
    pub rate_per_month: Option<i64>,
    pub available: Option<bool>,
}

/// Add a vehicle to the rental fleet (admin)
pub async fn create_rental_vehicle(
    State(state): State<AppState>,
    Json(payload): Json<CreateRentalVehicleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<rental_vehicle::Model>>)> {
    let rates = [
        payload.rate_per_hour,
        payload.rate_per_day,
        payload.rate_per_week,
        payload.rate_per_month,
    ];
    if rates.iter().any(|r| *r <= 0) {
        return Err(AppError::BadRequest("Rates must be positive".to_string()));
    }

    let new_vehicle = rental_vehicle::ActiveModel {
        id: Set(Uuid::new_v4()),
        make: Set(payload.make),
        model: Set(payload.model),
        year: Set(payload.year),
        rate_per_hour: Set(payload.rate_per_hour),
        rate_per_day: Set(payload.rate_per_day),
        rate_per_week: Set(payload.rate_per_week),
        rate_per_month: Set(payload.rate_per_month),
        available: Set(true),
        ..Default::default()
    };

    let vehicle = new_vehicle.insert(&state.db).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(vehicle)))
}

/// Update a rental fleet vehicle (admin)
pub async fn update_rental_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRentalVehicleRequest>,
) -> AppResult<Json<ApiResponse<rental_vehicle::Model>>> {
    let vehicle = rental_vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental vehicle not found".to_string()))?;

    let mut active: rental_vehicle::ActiveModel = vehicle.into();

    if let Some(make) = payload.make {
        active.make = Set(make);
    }
    if let Some(model) = payload.model {
        active.model = Set(model);
    }
    if let Some(year) = payload.year {
        active.year = Set(year);
    }
    if let Some(rate) = payload.rate_per_hour {
        active.rate_per_hour = Set(rate);
    }
    if let Some(rate) = payload.rate_per_day {
        active.rate_per_day = Set(rate);
    }
    if let Some(rate) = payload.rate_per_week {
        active.rate_per_week = Set(rate);
    }
    if let Some(rate) = payload.rate_per_month {
        active.rate_per_month = Set(rate);
    }
    if let Some(available) = payload.available {
        active.available = Set(available);
    }

    let updated = active.update(&state.db).await?;
    Ok(ApiResponse::data(updated))
}

/// Remove a vehicle from the rental fleet (admin)
pub async fn delete_rental_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let result = rental_vehicle::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Rental vehicle not found".to_string()));
    }

    Ok(ApiResponse::message("Rental vehicle deleted"))
}
