use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::engine::error::EngineError;
use crate::model::department::{Department, join_departments, parse_departments};
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "New Year")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "approved", nullable = true)]
    pub status: Option<String>,
    #[schema(example = json!(["Hr", "Sales"]))]
    pub departments: Vec<Department>,
}

#[derive(Deserialize, IntoParams)]
pub struct HolidayQuery {
    /// Only list holidays on this date
    #[param(example = "2026-01-01", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct HolidayResponse {
    pub id: u64,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "New Year")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "approved", nullable = true)]
    pub status: Option<String>,
    #[schema(example = json!(["Hr", "Sales"]))]
    pub departments: Vec<Department>,
}

/// Create holiday endpoint
#[utoipa::path(
    post,
    path = "/api/v1/holiday",
    request_body = CreateHoliday,
    responses(
        (status = 200, description = "Holiday created", body = Object, example = json!({
            "message": "Holiday created"
        })),
        (status = 400, description = "No departments given", body = Object, example = json!({
            "message": "at least one department required"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Holiday"
)]
pub async fn create_holiday(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateHoliday>,
) -> actix_web::Result<impl Responder> {
    if payload.departments.is_empty() {
        return Err(EngineError::validation("at least one department required").into());
    }

    store::insert_holiday(
        pool.get_ref(),
        payload.date,
        &payload.title,
        payload.description.as_deref(),
        payload.status.as_deref(),
        &join_departments(&payload.departments),
    )
    .await
    .map_err(|e| {
        error!(error = %e, date = %payload.date, "Failed to create holiday");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Holiday created"
    })))
}

/// List holidays endpoint
#[utoipa::path(
    get,
    path = "/api/v1/holiday",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Holiday list", body = [HolidayResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Holiday"
)]
pub async fn list_holidays(
    pool: web::Data<MySqlPool>,
    query: web::Query<HolidayQuery>,
) -> actix_web::Result<impl Responder> {
    let rows = match query.date {
        Some(date) => store::holidays_for_date(pool.get_ref(), date).await,
        None => store::list_holidays(pool.get_ref()).await,
    }
    .map_err(|e| {
        error!(error = %e, "Failed to fetch holidays");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let holidays: Vec<HolidayResponse> = rows
        .into_iter()
        .map(|row| HolidayResponse {
            departments: parse_departments(&row.departments),
            id: row.id,
            date: row.date,
            title: row.title,
            description: row.description,
            status: row.status,
        })
        .collect();

    Ok(HttpResponse::Ok().json(holidays))
}
