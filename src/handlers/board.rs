use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::lost_report::{self, ReportType};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::utils::jwt::Claims;
use crate::AppState;

/// List unresolved lost/found reports, newest first
pub async fn list_reports(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<lost_report::Model>>>> {
    let reports = lost_report::Entity::find()
        .filter(lost_report::Column::Resolved.eq(false))
        .order_by_desc(lost_report::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(ApiResponse::data(reports))
}

#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub report_type: ReportType,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub registration_no: Option<String>,
    pub location: String,
    pub event_date: NaiveDate,
    pub description: String,
}

/// File a lost or found vehicle report
pub async fn create_report(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<lost_report::Model>>)> {
    let new_report = lost_report::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(claims.sub),
        report_type: Set(payload.report_type),
        make: Set(payload.make),
        model: Set(payload.model),
        year: Set(payload.year),
        registration_no: Set(payload.registration_no),
        location: Set(payload.location),
        event_date: Set(payload.event_date),
        description: Set(payload.description),
        resolved: Set(false),
        ..Default::default()
    };

    let report = new_report.insert(&state.db).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(report)))
}

/// Mark a report resolved (reporter or admin)
pub async fn resolve_report(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<lost_report::Model>>> {
    let report = find_report_for(&state, id, &claims).await?;

    let mut active: lost_report::ActiveModel = report.into();
    active.resolved = Set(true);

    let updated = active.update(&state.db).await?;
    Ok(ApiResponse::data(updated))
}

/// Delete a report (reporter or admin)
pub async fn delete_report(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    find_report_for(&state, id, &claims).await?;

    lost_report::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(ApiResponse::message("Report deleted"))
}

async fn find_report_for(
    state: &AppState,
    id: Uuid,
    claims: &Claims,
) -> AppResult<lost_report::Model> {
    let report = lost_report::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    if report.user_id != claims.sub && !claims.is_admin() {
        return Err(AppError::Forbidden(
            "You can only manage your own reports".to_string(),
        ));
    }

    Ok(report)
}
