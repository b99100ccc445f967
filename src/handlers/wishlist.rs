use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{vehicle, wishlist_item};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveWishlistRequest {
    pub vehicle_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct WishlistEntry {
    pub vehicle: vehicle::Model,
    pub saved_at: chrono::DateTime<chrono::Utc>,
}

/// List the logged-in user's saved vehicles, newest save first
pub async fn my_wishlist(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<ApiResponse<Vec<WishlistEntry>>>> {
    let items = wishlist_item::Entity::find()
        .filter(wishlist_item::Column::UserId.eq(claims.sub))
        .order_by_desc(wishlist_item::Column::CreatedAt)
        .find_also_related(vehicle::Entity)
        .all(&state.db)
        .await?;

    let entries: Vec<WishlistEntry> = items
        .into_iter()
        .filter_map(|(item, vehicle)| {
            Some(WishlistEntry {
                vehicle: vehicle?,
                saved_at: item.created_at.with_timezone(&chrono::Utc),
            })
        })
        .collect();

    Ok(ApiResponse::data(entries))
}

/// Save a vehicle to the wishlist
pub async fn save_vehicle(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SaveWishlistRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<wishlist_item::Model>>)> {
    vehicle::Entity::find_by_id(payload.vehicle_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let existing = wishlist_item::Entity::find()
        .filter(wishlist_item::Column::UserId.eq(claims.sub))
        .filter(wishlist_item::Column::VehicleId.eq(payload.vehicle_id))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "Vehicle is already on your wishlist".to_string(),
        ));
    }

    let new_item = wishlist_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(claims.sub),
        vehicle_id: Set(payload.vehicle_id),
        ..Default::default()
    };

    let item = new_item.insert(&state.db).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(item)))
}

/// Remove a vehicle from the wishlist
pub async fn remove_vehicle(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(vehicle_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let result = wishlist_item::Entity::delete_many()
        .filter(wishlist_item::Column::UserId.eq(claims.sub))
        .filter(wishlist_item::Column::VehicleId.eq(vehicle_id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(
            "Vehicle is not on your wishlist".to_string(),
        ));
    }

    Ok(ApiResponse::message("Removed from wishlist"))
}
