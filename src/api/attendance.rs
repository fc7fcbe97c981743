use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::engine::clock::CalendarClock;
use crate::engine::error::EngineError;
use crate::engine::session::{self, OpenPlan, ResolvedEmployee};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, CoordinatesInput, SessionSummary, TravelLog,
};
use crate::model::employee::EmployeeKind;
use crate::store;
use crate::utils::directory_cache;

#[derive(Deserialize, ToSchema)]
pub struct WorkModeOnRequest {
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = "SalesEmployee")]
    pub employee_kind: EmployeeKind,
    pub coordinates: Option<CoordinatesInput>,
    #[schema(example = "Field Work")]
    pub work_type: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct WorkModeOffRequest {
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = "SalesEmployee")]
    pub employee_kind: EmployeeKind,
    pub coordinates: Option<CoordinatesInput>,
    #[schema(example = 18.2)]
    pub total_distance: Option<f64>,
}

#[derive(Deserialize, ToSchema)]
pub struct TravelSampleRequest {
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = "SalesEmployee")]
    pub employee_kind: EmployeeKind,
    pub coordinates: Option<CoordinatesInput>,
    #[schema(example = 4.2)]
    pub distance_from_start: f64,
    #[schema(example = "2026-01-01T11:00:00", value_type = String, nullable = true)]
    pub logged_at: Option<NaiveDateTime>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Employee id within its directory partition
    #[schema(example = 1000)]
    pub employee_id: u64,
    /// Directory partition the id resolves in
    #[schema(example = "SalesEmployee")]
    pub employee_kind: EmployeeKind,
}

#[derive(Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[schema(example = "Approved")]
    pub status: String,
    #[schema(example = "verified against field report", nullable = true)]
    pub remarks: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TodayResponse {
    pub record: AttendanceRecord,
    pub travel_logs: Vec<TravelLog>,
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> actix_web::Error {
    move |e| {
        tracing::error!(error = %e, context, "Database error");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    }
}

/// Work mode on (clock-in) endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/work-mode/on",
    request_body = WorkModeOnRequest,
    responses(
        (status = 200, description = "Work mode started", body = SessionSummary),
        (status = 400, description = "Location coordinates required", body = Object, example = json!({
            "message": "location coordinates required"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "employee not found"
        })),
        (status = 409, description = "Work mode already active", body = Object, example = json!({
            "message": "work mode already active"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn work_mode_on(
    pool: web::Data<MySqlPool>,
    clock: web::Data<CalendarClock>,
    payload: web::Json<WorkModeOnRequest>,
) -> actix_web::Result<impl Responder> {
    let coordinates = session::require_coordinates(payload.coordinates.as_ref())?;

    let name =
        directory_cache::resolve_name(pool.get_ref(), payload.employee_id, payload.employee_kind)
            .await
            .map_err(db_error("directory lookup"))?
            .ok_or_else(|| EngineError::not_found("employee not found"))?;

    let employee = ResolvedEmployee {
        id: payload.employee_id,
        kind: payload.employee_kind,
        name,
    };
    let now = clock.now();
    let kind_tag = employee.kind.to_string();

    let existing = store::fetch_for_day(pool.get_ref(), employee.id, &kind_tag, now.date())
        .await
        .map_err(db_error("fetch attendance"))?;

    let plan = session::open_session(
        existing,
        &employee,
        coordinates,
        payload.work_type.clone(),
        now,
    )?;

    let summary = match plan {
        OpenPlan::Start { record, log } => {
            if let Err(e) = store::insert_session(pool.get_ref(), &record).await {
                // Racing double clock-in loses on the unique day key
                if store::is_duplicate_key(&e) {
                    return Err(EngineError::conflict("work mode already active").into());
                }
                tracing::error!(error = %e, employee_id = record.employee_id, "Work mode on failed");
                return Err(actix_web::error::ErrorInternalServerError(
                    "Internal Server Error",
                ));
            }
            store::append_travel_log(pool.get_ref(), &record.id, &log)
                .await
                .map_err(db_error("append travel log"))?;
            SessionSummary::from(&record)
        }
        OpenPlan::Extend { record, log } => {
            let affected = store::reopen_session(pool.get_ref(), &record)
                .await
                .map_err(db_error("reopen attendance"))?;
            if affected == 0 {
                return Err(EngineError::conflict("work mode already active").into());
            }
            store::append_travel_log(pool.get_ref(), &record.id, &log)
                .await
                .map_err(db_error("append travel log"))?;
            SessionSummary::from(&record)
        }
    };

    Ok(HttpResponse::Ok().json(summary))
}

/// Work mode off (clock-out) endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/work-mode/off",
    request_body = WorkModeOffRequest,
    responses(
        (status = 200, description = "Work mode ended", body = SessionSummary),
        (status = 400, description = "Location coordinates required", body = Object, example = json!({
            "message": "location coordinates required"
        })),
        (status = 404, description = "No active work session", body = Object, example = json!({
            "message": "no active work session"
        })),
        (status = 409, description = "Work mode already ended", body = Object, example = json!({
            "message": "work mode already ended"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn work_mode_off(
    pool: web::Data<MySqlPool>,
    clock: web::Data<CalendarClock>,
    payload: web::Json<WorkModeOffRequest>,
) -> actix_web::Result<impl Responder> {
    let coordinates = session::require_coordinates(payload.coordinates.as_ref())?;
    let now = clock.now();
    let kind_tag = payload.employee_kind.to_string();

    let mut record =
        store::fetch_for_day(pool.get_ref(), payload.employee_id, &kind_tag, now.date())
            .await
            .map_err(db_error("fetch attendance"))?
            .ok_or_else(|| EngineError::not_found("no active work session"))?;

    let log = session::close_session(&mut record, coordinates, payload.total_distance, now)?;

    let affected = store::close_session(pool.get_ref(), &record)
        .await
        .map_err(db_error("close attendance"))?;
    if affected == 0 {
        return Err(EngineError::conflict("work mode already ended").into());
    }

    store::append_travel_log(pool.get_ref(), &record.id, &log)
        .await
        .map_err(db_error("append travel log"))?;

    Ok(HttpResponse::Ok().json(SessionSummary::from(&record)))
}

/// Travel sample endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/travel",
    request_body = TravelSampleRequest,
    responses(
        (status = 200, description = "Travel sample recorded", body = Object, example = json!({
            "message": "travel sample recorded",
            "total_distance_travelled": 4.2
        })),
        (status = 400, description = "Location coordinates required", body = Object, example = json!({
            "message": "location coordinates required"
        })),
        (status = 404, description = "No active work session", body = Object, example = json!({
            "message": "no active work session"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn travel_sample(
    pool: web::Data<MySqlPool>,
    clock: web::Data<CalendarClock>,
    payload: web::Json<TravelSampleRequest>,
) -> actix_web::Result<impl Responder> {
    let coordinates = session::require_coordinates(payload.coordinates.as_ref())?;
    let now = clock.now();
    let kind_tag = payload.employee_kind.to_string();

    let record = store::fetch_for_day(pool.get_ref(), payload.employee_id, &kind_tag, now.date())
        .await
        .map_err(db_error("fetch attendance"))?
        .ok_or_else(|| EngineError::not_found("no active work session"))?;

    let log = session::append_travel_sample(
        &record,
        coordinates,
        payload.distance_from_start,
        payload.logged_at,
        now,
    )?;

    // Guarded on the session still being open; a concurrent clock-out wins.
    let affected =
        store::update_total_distance(pool.get_ref(), &record.id, payload.distance_from_start)
            .await
            .map_err(db_error("update total distance"))?;
    if affected == 0 {
        return Err(EngineError::not_found("no active work session").into());
    }

    store::append_travel_log(pool.get_ref(), &record.id, &log)
        .await
        .map_err(db_error("append travel log"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "travel sample recorded",
        "total_distance_travelled": payload.distance_from_start
    })))
}

/// Today's session endpoint
#[utoipa::path(
    get,
    path = "/api/v1/attendance/today",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Today's attendance record", body = TodayResponse),
        (status = 404, description = "No record for today", body = Object, example = json!({
            "message": "no attendance record for today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn today_status(
    pool: web::Data<MySqlPool>,
    clock: web::Data<CalendarClock>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let kind_tag = query.employee_kind.to_string();

    let record = store::fetch_for_day(pool.get_ref(), query.employee_id, &kind_tag, clock.today())
        .await
        .map_err(db_error("fetch attendance"))?
        .ok_or_else(|| EngineError::not_found("no attendance record for today"))?;

    let travel_logs = store::fetch_travel_logs(pool.get_ref(), &record.id)
        .await
        .map_err(db_error("fetch travel logs"))?;

    Ok(HttpResponse::Ok().json(TodayResponse {
        record,
        travel_logs,
    }))
}

/// Administrative status update endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}/status",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = AttendanceRecord),
        (status = 400, description = "Invalid status value", body = Object, example = json!({
            "message": "invalid status value"
        })),
        (status = 404, description = "Attendance record not found", body = Object, example = json!({
            "message": "attendance record not found"
        })),
        (status = 422, description = "Synthetic row", body = Object, example = json!({
            "message": "cannot update a synthetic absent row"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn set_status(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    payload: web::Json<StatusUpdateRequest>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    // Absent placeholders only exist in reconciliation output.
    if id.starts_with("absent-") {
        return Err(EngineError::invalid_operation("cannot update a synthetic absent row").into());
    }

    let status: AttendanceStatus = payload
        .status
        .parse()
        .map_err(|_| EngineError::validation("invalid status value"))?;

    store::fetch_by_id(pool.get_ref(), &id)
        .await
        .map_err(db_error("fetch attendance"))?
        .ok_or_else(|| EngineError::not_found("attendance record not found"))?;

    store::set_status(
        pool.get_ref(),
        &id,
        &status.to_string(),
        payload.remarks.as_deref(),
    )
    .await
    .map_err(db_error("update status"))?;

    let record = store::fetch_by_id(pool.get_ref(), &id)
        .await
        .map_err(db_error("fetch attendance"))?
        .ok_or_else(|| EngineError::not_found("attendance record not found"))?;

    Ok(HttpResponse::Ok().json(record))
}
