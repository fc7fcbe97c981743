use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Stored status values. Open sessions are `Active`; close reclassifies from
/// the worked duration; roster reconciliation may report `Holiday` on top of
/// any of these without rewriting the stored value.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
    Default,
)]
pub enum AttendanceStatus {
    #[default]
    Active,
    AwaitingApproval,
    Approved,
    Rejected,
    Present,
    HalfDay,
    Leave,
    Absent,
    LateArrival,
    EarlyLeave,
    Holiday,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    #[schema(example = 23.8103)]
    pub latitude: f64,
    #[schema(example = 90.4125)]
    pub longitude: f64,
}

/// Coordinates as posted by clients. Both parts are optional at the wire
/// level so an incomplete pair surfaces as a validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct CoordinatesInput {
    #[schema(example = 23.8103, nullable = true)]
    pub latitude: Option<f64>,
    #[schema(example = 90.4125, nullable = true)]
    pub longitude: Option<f64>,
}

/// One attendance record per (employee_id, employee_kind, date); the UNIQUE
/// key on those columns is what makes the open path race-safe.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "0a4c2f1e-6c3b-4f0e-9a2d-7b1f3c5d8e90")]
    pub id: String,
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = "SalesEmployee")]
    pub employee_kind: String,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "2026-01-01T09:00:00", value_type = String)]
    pub work_mode_on_time: NaiveDateTime,
    #[schema(example = "2026-01-01T18:00:00", value_type = String, nullable = true)]
    pub work_mode_off_time: Option<NaiveDateTime>,
    pub on_latitude: Option<f64>,
    pub on_longitude: Option<f64>,
    pub off_latitude: Option<f64>,
    pub off_longitude: Option<f64>,
    #[schema(example = 12.5)]
    pub total_distance_travelled: f64,
    #[schema(example = 9.0, nullable = true)]
    pub total_work_duration: Option<f64>,
    #[schema(example = "Present")]
    pub status: String,
    #[schema(example = "Field Work")]
    pub work_type: String,
    pub description: Option<String>,
    pub remarks: Option<String>,
    pub approved_by: Option<String>,
}

impl AttendanceRecord {
    pub fn is_active(&self) -> bool {
        self.work_mode_off_time.is_none()
    }
}

/// Append-only location sample captured while a session is open. The
/// cumulative distance is caller-computed; the engine stores it verbatim.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TravelLog {
    pub id: u64,
    pub attendance_id: String,
    #[schema(example = "2026-01-01T09:00:00", value_type = String)]
    pub logged_at: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(example = 3.2)]
    pub distance_from_start: f64,
    #[schema(example = "extend", nullable = true)]
    pub label: Option<String>,
}

/// Shape returned by the work-mode endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionSummary {
    pub is_active: bool,
    #[schema(example = "2026-01-01T09:00:00", value_type = String)]
    pub work_mode_on_time: NaiveDateTime,
    #[schema(example = "2026-01-01T18:00:00", value_type = String, nullable = true)]
    pub work_mode_off_time: Option<NaiveDateTime>,
    #[schema(example = 9.0, nullable = true)]
    pub total_work_duration: Option<f64>,
    #[schema(example = 12.5)]
    pub total_distance_travelled: f64,
    #[schema(example = "Present")]
    pub status: String,
    #[schema(example = "Field Work")]
    pub work_type: String,
}

impl From<&AttendanceRecord> for SessionSummary {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            is_active: record.is_active(),
            work_mode_on_time: record.work_mode_on_time,
            work_mode_off_time: record.work_mode_off_time,
            total_work_duration: record.total_work_duration,
            total_distance_travelled: record.total_distance_travelled,
            status: record.status.clone(),
            work_type: record.work_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_round_trip() {
        let status: AttendanceStatus = "AwaitingApproval".parse().unwrap();
        assert_eq!(status, AttendanceStatus::AwaitingApproval);
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "HalfDay");
        assert!("OnLeave".parse::<AttendanceStatus>().is_err());
    }
}
