use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::engine::session::PlannedLog;
use crate::model::attendance::{AttendanceRecord, TravelLog};
use crate::model::employee::Employee;
use crate::model::holiday::HolidayRow;

/// MySQL duplicate-key violation; the UNIQUE(employee_id, employee_kind, date)
/// key turns a racing double clock-in into this error.
pub fn is_duplicate_key(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        db_err.code().as_deref() == Some("23000")
    } else {
        false
    }
}

pub async fn fetch_for_day(
    pool: &MySqlPool,
    employee_id: u64,
    employee_kind: &str,
    date: NaiveDate,
) -> Result<Option<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT * FROM attendance
        WHERE employee_id = ? AND employee_kind = ? AND date = ?
        "#,
    )
    .bind(employee_id)
    .bind(employee_kind)
    .bind(date)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_by_id(
    pool: &MySqlPool,
    id: &str,
) -> Result<Option<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>("SELECT * FROM attendance WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_for_date(
    pool: &MySqlPool,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>("SELECT * FROM attendance WHERE date = ?")
        .bind(date)
        .fetch_all(pool)
        .await
}

pub async fn insert_session(
    pool: &MySqlPool,
    record: &AttendanceRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO attendance
            (id, employee_id, employee_kind, employee_name, date,
             work_mode_on_time, on_latitude, on_longitude,
             total_distance_travelled, status, work_type)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(record.employee_id)
    .bind(&record.employee_kind)
    .bind(&record.employee_name)
    .bind(record.date)
    .bind(record.work_mode_on_time)
    .bind(record.on_latitude)
    .bind(record.on_longitude)
    .bind(record.total_distance_travelled)
    .bind(&record.status)
    .bind(&record.work_type)
    .execute(pool)
    .await?;
    Ok(())
}

/// Reopen a same-day closed session. Guarded so a racing reopen loses with
/// zero rows affected instead of clobbering an already-active session.
pub async fn reopen_session(
    pool: &MySqlPool,
    record: &AttendanceRecord,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET work_mode_off_time = NULL,
            status = ?,
            on_latitude = ?,
            on_longitude = ?,
            total_work_duration = NULL,
            work_type = ?
        WHERE id = ?
        AND work_mode_off_time IS NOT NULL
        "#,
    )
    .bind(&record.status)
    .bind(record.on_latitude)
    .bind(record.on_longitude)
    .bind(&record.work_type)
    .bind(&record.id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Close an active session. The `work_mode_off_time IS NULL` guard is the
/// atomic backstop for the one-open-session invariant.
pub async fn close_session(
    pool: &MySqlPool,
    record: &AttendanceRecord,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET work_mode_off_time = ?,
            off_latitude = ?,
            off_longitude = ?,
            total_work_duration = ?,
            total_distance_travelled = ?,
            status = ?
        WHERE id = ?
        AND work_mode_off_time IS NULL
        "#,
    )
    .bind(record.work_mode_off_time)
    .bind(record.off_latitude)
    .bind(record.off_longitude)
    .bind(record.total_work_duration)
    .bind(record.total_distance_travelled)
    .bind(&record.status)
    .bind(&record.id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn append_travel_log(
    pool: &MySqlPool,
    attendance_id: &str,
    log: &PlannedLog,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO travel_logs
            (attendance_id, logged_at, latitude, longitude, distance_from_start, label)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(attendance_id)
    .bind(log.logged_at)
    .bind(log.coordinates.latitude)
    .bind(log.coordinates.longitude)
    .bind(log.distance_from_start)
    .bind(&log.label)
    .execute(pool)
    .await?;
    Ok(())
}

/// Take the caller's latest cumulative figure as the new running total.
/// Guarded on the session still being open.
pub async fn update_total_distance(
    pool: &MySqlPool,
    id: &str,
    total_distance: f64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET total_distance_travelled = ?
        WHERE id = ?
        AND work_mode_off_time IS NULL
        "#,
    )
    .bind(total_distance)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn set_status(
    pool: &MySqlPool,
    id: &str,
    status: &str,
    remarks: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET status = ?,
            remarks = COALESCE(?, remarks)
        WHERE id = ?
        "#,
    )
    .bind(status)
    .bind(remarks)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn fetch_travel_logs(
    pool: &MySqlPool,
    attendance_id: &str,
) -> Result<Vec<TravelLog>, sqlx::Error> {
    sqlx::query_as::<_, TravelLog>(
        "SELECT * FROM travel_logs WHERE attendance_id = ? ORDER BY logged_at, id",
    )
    .bind(attendance_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_employee(
    pool: &MySqlPool,
    id: u64,
    kind: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ? AND kind = ?")
        .bind(id)
        .bind(kind)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_employees(pool: &MySqlPool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY kind, id")
        .fetch_all(pool)
        .await
}

pub async fn insert_holiday(
    pool: &MySqlPool,
    date: NaiveDate,
    title: &str,
    description: Option<&str>,
    status: Option<&str>,
    departments: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO holidays (date, title, description, status, departments)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(date)
    .bind(title)
    .bind(description)
    .bind(status)
    .bind(departments)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn holidays_for_date(
    pool: &MySqlPool,
    date: NaiveDate,
) -> Result<Vec<HolidayRow>, sqlx::Error> {
    sqlx::query_as::<_, HolidayRow>("SELECT * FROM holidays WHERE date = ? ORDER BY id")
        .bind(date)
        .fetch_all(pool)
        .await
}

pub async fn list_holidays(pool: &MySqlPool) -> Result<Vec<HolidayRow>, sqlx::Error> {
    sqlx::query_as::<_, HolidayRow>("SELECT * FROM holidays ORDER BY date DESC, id")
        .fetch_all(pool)
        .await
}
