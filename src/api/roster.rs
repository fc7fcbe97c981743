use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::engine::clock::CalendarClock;
use crate::engine::reconcile::{self, RosterEmployee, RosterRow, RosterSummary};
use crate::store;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RosterQuery {
    /// Target date (YYYY-MM-DD); defaults to today
    #[param(example = "2026-01-01", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct RosterResponse {
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub data: Vec<RosterRow>,
    #[schema(example = 25)]
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct RosterSummaryResponse {
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub summary: RosterSummary,
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> actix_web::Error {
    move |e| {
        tracing::error!(error = %e, context, "Database error");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    }
}

async fn reconciled_rows(
    pool: &MySqlPool,
    date: NaiveDate,
) -> actix_web::Result<Vec<RosterRow>> {
    let employees = store::fetch_employees(pool)
        .await
        .map_err(db_error("fetch employees"))?;

    let roster: Vec<RosterEmployee> = employees
        .iter()
        .filter_map(|e| match e.kind.parse() {
            Ok(kind) => Some(RosterEmployee {
                id: e.id,
                kind,
                name: e.name.clone(),
            }),
            Err(_) => {
                tracing::warn!(employee_id = e.id, kind = %e.kind, "Unknown employee kind, skipping");
                None
            }
        })
        .collect();

    let records = store::fetch_for_date(pool, date)
        .await
        .map_err(db_error("fetch attendance"))?;

    let holidays: Vec<_> = store::holidays_for_date(pool, date)
        .await
        .map_err(db_error("fetch holidays"))?
        .iter()
        .map(|h| h.descriptor())
        .collect();

    Ok(reconcile::reconcile_roster(date, &roster, &records, &holidays))
}

/// Daily roster endpoint
#[utoipa::path(
    get,
    path = "/api/v1/roster",
    params(RosterQuery),
    responses(
        (status = 200, description = "Reconciled roster for the date", body = RosterResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Roster"
)]
pub async fn daily_roster(
    pool: web::Data<MySqlPool>,
    clock: web::Data<CalendarClock>,
    query: web::Query<RosterQuery>,
) -> actix_web::Result<impl Responder> {
    let date = query.date.unwrap_or_else(|| clock.today());
    let rows = reconciled_rows(pool.get_ref(), date).await?;

    Ok(HttpResponse::Ok().json(RosterResponse {
        date,
        total: rows.len(),
        data: rows,
    }))
}

/// Roster summary endpoint
#[utoipa::path(
    get,
    path = "/api/v1/roster/summary",
    params(RosterQuery),
    responses(
        (status = 200, description = "Aggregated attendance counts", body = RosterSummaryResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Roster"
)]
pub async fn roster_summary(
    pool: web::Data<MySqlPool>,
    clock: web::Data<CalendarClock>,
    query: web::Query<RosterQuery>,
) -> actix_web::Result<impl Responder> {
    let date = query.date.unwrap_or_else(|| clock.today());
    let rows = reconciled_rows(pool.get_ref(), date).await?;

    Ok(HttpResponse::Ok().json(RosterSummaryResponse {
        date,
        summary: reconcile::summarize_roster(&rows),
    }))
}
