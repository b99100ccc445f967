use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::vehicle;
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::utils::jwt::Claims;
use crate::AppState;

/// List unsold sale vehicles, newest first
pub async fn list_vehicles(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<vehicle::Model>>>> {
    let vehicles = vehicle::Entity::find()
        .filter(vehicle::Column::Sold.eq(false))
        .order_by_desc(vehicle::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(ApiResponse::data(vehicles))
}

/// Get a sale vehicle
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<vehicle::Model>>> {
    let vehicle = vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    Ok(ApiResponse::data(vehicle))
}

// ============ Seller Listing Management ============

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage_km: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<i64>,
    pub mileage_km: Option<i32>,
    pub description: Option<String>,
}

/// Create a sale listing owned by the logged-in seller
pub async fn create_vehicle(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<vehicle::Model>>)> {
    if payload.price <= 0 {
        return Err(AppError::BadRequest("Price must be positive".to_string()));
    }

    let new_vehicle = vehicle::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(claims.sub),
        make: Set(payload.make),
        model: Set(payload.model),
        year: Set(payload.year),
        price: Set(payload.price),
        mileage_km: Set(payload.mileage_km),
        description: Set(payload.description),
        sold: Set(false),
        ..Default::default()
    };

    let vehicle = new_vehicle.insert(&state.db).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(vehicle)))
}

/// Update a listing (owner only)
pub async fn update_vehicle(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> AppResult<Json<ApiResponse<vehicle::Model>>> {
    let vehicle = find_owned(&state, id, &claims).await?;

    let mut active: vehicle::ActiveModel = vehicle.into();

    if let Some(make) = payload.make {
        active.make = Set(make);
    }
    if let Some(model) = payload.model {
        active.model = Set(model);
    }
    if let Some(year) = payload.year {
        active.year = Set(year);
    }
    if let Some(price) = payload.price {
        if price <= 0 {
            return Err(AppError::BadRequest("Price must be positive".to_string()));
        }
        active.price = Set(price);
    }
    if payload.mileage_km.is_some() {
        active.mileage_km = Set(payload.mileage_km);
    }
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }

    let updated = active.update(&state.db).await?;
    Ok(ApiResponse::data(updated))
}

/// Mark a listing sold (owner only)
pub async fn mark_sold(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<vehicle::Model>>> {
    let vehicle = find_owned(&state, id, &claims).await?;

    let mut active: vehicle::ActiveModel = vehicle.into();
    active.sold = Set(true);

    let updated = active.update(&state.db).await?;
    Ok(ApiResponse::data(updated))
}

/// Delete a listing (owner only; admins moderate via the admin routes)
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    find_owned(&state, id, &claims).await?;

    vehicle::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(ApiResponse::message("Vehicle deleted"))
}

async fn find_owned(state: &AppState, id: Uuid, claims: &Claims) -> AppResult<vehicle::Model> {
    let vehicle = vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    if vehicle.owner_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only manage your own listings".to_string(),
        ));
    }

    Ok(vehicle)
}
