use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::engine::classify;
use crate::engine::error::EngineError;
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, Coordinates, CoordinatesInput,
};
use crate::model::employee::EmployeeKind;

pub const DEFAULT_WORK_TYPE: &str = "Field Work";
pub const EXTEND_LABEL: &str = "extend";

/// Directory lookup result carried into a session transition.
#[derive(Debug, Clone)]
pub struct ResolvedEmployee {
    pub id: u64,
    pub kind: EmployeeKind,
    pub name: String,
}

/// Travel-log entry produced by a transition, to be persisted with the record.
#[derive(Debug, Clone)]
pub struct PlannedLog {
    pub logged_at: NaiveDateTime,
    pub coordinates: Coordinates,
    pub distance_from_start: f64,
    pub label: Option<String>,
}

/// Outcome of a successful open transition. `Start` inserts a fresh record;
/// `Extend` reopens the same-day record under a guarded update so the
/// one-record-per-day invariant holds across repeated clock-ins.
#[derive(Debug)]
pub enum OpenPlan {
    Start {
        record: AttendanceRecord,
        log: PlannedLog,
    },
    Extend {
        record: AttendanceRecord,
        log: PlannedLog,
    },
}

pub fn require_coordinates(input: Option<&CoordinatesInput>) -> Result<Coordinates, EngineError> {
    match input {
        Some(CoordinatesInput {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }) => Ok(Coordinates {
            latitude: *latitude,
            longitude: *longitude,
        }),
        _ => Err(EngineError::validation("location coordinates required")),
    }
}

/// Clock-in. `existing` is today's record, if any: an open one rejects the
/// request, a closed one is extended in place, none at all starts fresh.
pub fn open_session(
    existing: Option<AttendanceRecord>,
    employee: &ResolvedEmployee,
    coordinates: Coordinates,
    work_type: Option<String>,
    now: NaiveDateTime,
) -> Result<OpenPlan, EngineError> {
    match existing {
        Some(record) if record.is_active() => {
            Err(EngineError::conflict("work mode already active"))
        }
        Some(mut record) => {
            record.work_mode_off_time = None;
            record.status = AttendanceStatus::Active.to_string();
            record.on_latitude = Some(coordinates.latitude);
            record.on_longitude = Some(coordinates.longitude);
            record.total_work_duration = None;
            if let Some(work_type) = work_type {
                record.work_type = work_type;
            }
            let log = PlannedLog {
                logged_at: now,
                coordinates,
                distance_from_start: record.total_distance_travelled,
                label: Some(EXTEND_LABEL.to_string()),
            };
            Ok(OpenPlan::Extend { record, log })
        }
        None => {
            let record = AttendanceRecord {
                id: Uuid::new_v4().to_string(),
                employee_id: employee.id,
                employee_kind: employee.kind.to_string(),
                employee_name: employee.name.clone(),
                date: now.date(),
                work_mode_on_time: now,
                work_mode_off_time: None,
                on_latitude: Some(coordinates.latitude),
                on_longitude: Some(coordinates.longitude),
                off_latitude: None,
                off_longitude: None,
                total_distance_travelled: 0.0,
                total_work_duration: None,
                status: AttendanceStatus::Active.to_string(),
                work_type: work_type.unwrap_or_else(|| DEFAULT_WORK_TYPE.to_string()),
                description: None,
                remarks: None,
                approved_by: None,
            };
            let log = PlannedLog {
                logged_at: now,
                coordinates,
                distance_from_start: 0.0,
                label: None,
            };
            Ok(OpenPlan::Start { record, log })
        }
    }
}

/// Clock-out. Computes the worked duration and reclassifies the status; the
/// record is mutated in place and the returned log entry is the final sample.
pub fn close_session(
    record: &mut AttendanceRecord,
    coordinates: Coordinates,
    total_distance: Option<f64>,
    now: NaiveDateTime,
) -> Result<PlannedLog, EngineError> {
    if !record.is_active() {
        return Err(EngineError::conflict("work mode already ended"));
    }

    record.work_mode_off_time = Some(now);
    record.off_latitude = Some(coordinates.latitude);
    record.off_longitude = Some(coordinates.longitude);
    if let Some(total_distance) = total_distance {
        record.total_distance_travelled = total_distance;
    }

    let duration = classify::work_duration_hours(record.work_mode_on_time, now);
    record.total_work_duration = Some(duration);
    record.status = classify::classify(duration).to_string();

    Ok(PlannedLog {
        logged_at: now,
        coordinates,
        distance_from_start: record.total_distance_travelled,
        label: None,
    })
}

/// Mid-session location sample. The cumulative distance is taken from the
/// caller as-is and becomes the record's new running total.
pub fn append_travel_sample(
    record: &AttendanceRecord,
    coordinates: Coordinates,
    distance_from_start: f64,
    logged_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Result<PlannedLog, EngineError> {
    if !record.is_active() {
        return Err(EngineError::not_found("no active work session"));
    }

    Ok(PlannedLog {
        logged_at: logged_at.unwrap_or(now),
        coordinates,
        distance_from_start,
        label: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn coords(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    fn test_employee() -> ResolvedEmployee {
        ResolvedEmployee {
            id: 42,
            kind: EmployeeKind::SalesEmployee,
            name: "Jane Roe".to_string(),
        }
    }

    fn open_record(now: NaiveDateTime) -> AttendanceRecord {
        match open_session(None, &test_employee(), coords(23.8, 90.4), None, now).unwrap() {
            OpenPlan::Start { record, .. } => record,
            OpenPlan::Extend { .. } => panic!("fresh open must not extend"),
        }
    }

    #[test]
    fn fresh_open_starts_active_record() {
        let now = at(5, 9, 0);
        let plan = open_session(
            None,
            &test_employee(),
            coords(23.8, 90.4),
            Some("Office Work".to_string()),
            now,
        )
        .unwrap();

        let (record, log) = match plan {
            OpenPlan::Start { record, log } => (record, log),
            OpenPlan::Extend { .. } => panic!("expected a fresh record"),
        };
        assert!(record.is_active());
        assert_eq!(record.date, now.date());
        assert_eq!(record.work_mode_on_time, now);
        assert_eq!(record.status, "Active");
        assert_eq!(record.work_type, "Office Work");
        assert_eq!(record.total_distance_travelled, 0.0);
        assert_eq!(log.distance_from_start, 0.0);
        assert_eq!(log.label, None);
    }

    #[test]
    fn open_defaults_work_type_to_field_work() {
        let record = open_record(at(5, 9, 0));
        assert_eq!(record.work_type, DEFAULT_WORK_TYPE);
    }

    #[test]
    fn open_while_active_is_a_conflict() {
        let record = open_record(at(5, 9, 0));
        let err = open_session(
            Some(record),
            &test_employee(),
            coords(23.8, 90.4),
            None,
            at(5, 10, 0),
        )
        .unwrap_err();
        assert_eq!(err, EngineError::Conflict("work mode already active".into()));
    }

    #[test]
    fn open_after_same_day_close_extends_the_record() {
        let mut record = open_record(at(5, 9, 0));
        close_session(&mut record, coords(23.9, 90.5), Some(7.5), at(5, 13, 0)).unwrap();
        let original_id = record.id.clone();
        let original_on = record.work_mode_on_time;

        let plan = open_session(
            Some(record),
            &test_employee(),
            coords(24.0, 90.6),
            None,
            at(5, 14, 0),
        )
        .unwrap();

        let (record, log) = match plan {
            OpenPlan::Extend { record, log } => (record, log),
            OpenPlan::Start { .. } => panic!("same-day reopen must reuse the record"),
        };
        assert_eq!(record.id, original_id);
        assert!(record.work_mode_off_time.is_none());
        assert_eq!(record.status, "Active");
        assert_eq!(record.work_mode_on_time, original_on);
        assert_eq!(record.on_latitude, Some(24.0));
        assert_eq!(record.total_work_duration, None);
        assert_eq!(record.total_distance_travelled, 7.5);
        assert_eq!(log.label.as_deref(), Some(EXTEND_LABEL));
        assert_eq!(log.distance_from_start, 7.5);
    }

    #[test]
    fn close_computes_duration_and_status() {
        let mut record = open_record(at(5, 9, 0));
        let log =
            close_session(&mut record, coords(23.9, 90.5), Some(18.2), at(5, 18, 0)).unwrap();

        assert!(!record.is_active());
        assert_eq!(record.total_work_duration, Some(9.0));
        assert_eq!(record.status, "Present");
        assert_eq!(record.total_distance_travelled, 18.2);
        assert_eq!(record.off_latitude, Some(23.9));
        assert_eq!(log.distance_from_start, 18.2);
    }

    #[test]
    fn short_session_closes_as_early_leave() {
        let mut record = open_record(at(5, 9, 0));
        close_session(&mut record, coords(23.9, 90.5), None, at(5, 11, 30)).unwrap();
        assert_eq!(record.total_work_duration, Some(2.5));
        assert_eq!(record.status, "EarlyLeave");
    }

    #[test]
    fn closing_twice_is_a_conflict() {
        let mut record = open_record(at(5, 9, 0));
        close_session(&mut record, coords(23.9, 90.5), None, at(5, 18, 0)).unwrap();

        let err =
            close_session(&mut record, coords(23.9, 90.5), None, at(5, 19, 0)).unwrap_err();
        assert_eq!(err, EngineError::Conflict("work mode already ended".into()));
    }

    #[test]
    fn travel_sample_requires_an_open_session() {
        let mut record = open_record(at(5, 9, 0));

        let log = append_travel_sample(&record, coords(23.85, 90.45), 4.2, None, at(5, 11, 0))
            .unwrap();
        assert_eq!(log.distance_from_start, 4.2);

        close_session(&mut record, coords(23.9, 90.5), None, at(5, 18, 0)).unwrap();
        let err = append_travel_sample(&record, coords(23.9, 90.5), 5.0, None, at(5, 19, 0))
            .unwrap_err();
        assert_eq!(err, EngineError::NotFound("no active work session".into()));
    }

    #[test]
    fn coordinates_must_be_complete() {
        let missing = CoordinatesInput {
            latitude: Some(23.8),
            longitude: None,
        };
        assert_eq!(
            require_coordinates(Some(&missing)).unwrap_err(),
            EngineError::Validation("location coordinates required".into())
        );
        assert!(require_coordinates(None).is_err());

        let full = CoordinatesInput {
            latitude: Some(23.8),
            longitude: Some(90.4),
        };
        let parsed = require_coordinates(Some(&full)).unwrap();
        assert_eq!(parsed.latitude, 23.8);
        assert_eq!(parsed.longitude, 90.4);
    }
}
