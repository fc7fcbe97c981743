use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::department::Department;
use crate::model::employee::EmployeeKind;
use crate::model::holiday::Holiday;

/// Directory entry fed into reconciliation.
#[derive(Debug, Clone)]
pub struct RosterEmployee {
    pub id: u64,
    pub kind: EmployeeKind,
    pub name: String,
}

/// Holiday metadata attached to a reconciled row. Overlay only; the stored
/// record keeps its original status.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HolidayOverlay {
    #[schema(example = "New Year")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "approved", nullable = true)]
    pub status: Option<String>,
}

/// One displayable row per roster employee for a given date.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterRow {
    #[schema(example = "absent-SalesEmployee-42")]
    pub id: String,
    pub employee_id: u64,
    pub employee_kind: EmployeeKind,
    pub employee_name: String,
    pub department: Department,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub is_active: bool,
    #[schema(value_type = Option<String>)]
    pub work_mode_on_time: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>)]
    pub work_mode_off_time: Option<NaiveDateTime>,
    pub total_work_duration: Option<f64>,
    pub total_distance_travelled: Option<f64>,
    pub status: AttendanceStatus,
    pub work_type: Option<String>,
    pub holiday: Option<HolidayOverlay>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterSummary {
    pub total: usize,
    pub present: usize,
    pub half_day: usize,
    pub early_leave: usize,
    pub absent: usize,
    pub active: usize,
    pub awaiting_approval: usize,
    pub holiday: usize,
    #[schema(example = "50.0")]
    pub present_percentage: String,
}

fn holiday_for<'a>(holidays: &'a [Holiday], department: Department) -> Option<&'a Holiday> {
    holidays.iter().find(|h| h.covers(department))
}

/// Merge the persisted records, synthetic absences, and holiday overlays for
/// one date into a single row set. Pure over its inputs; holiday scope is
/// matched per employee department, never globally.
pub fn reconcile_roster(
    date: NaiveDate,
    roster: &[RosterEmployee],
    records: &[AttendanceRecord],
    holidays: &[Holiday],
) -> Vec<RosterRow> {
    let by_employee: HashMap<(u64, &str), &AttendanceRecord> = records
        .iter()
        .map(|r| ((r.employee_id, r.employee_kind.as_str()), r))
        .collect();

    roster
        .iter()
        .map(|employee| {
            let department = employee.kind.department();
            let kind_tag = employee.kind.to_string();
            let holiday = holiday_for(holidays, department);
            let overlay = holiday.map(|h| HolidayOverlay {
                title: h.title.clone(),
                description: h.description.clone(),
                status: h.status.clone(),
            });

            match by_employee.get(&(employee.id, kind_tag.as_str())) {
                Some(record) => {
                    let status = if overlay.is_some() {
                        AttendanceStatus::Holiday
                    } else {
                        record.status.parse().unwrap_or_default()
                    };
                    RosterRow {
                        id: record.id.clone(),
                        employee_id: employee.id,
                        employee_kind: employee.kind,
                        employee_name: record.employee_name.clone(),
                        department,
                        date,
                        is_active: record.is_active(),
                        work_mode_on_time: Some(record.work_mode_on_time),
                        work_mode_off_time: record.work_mode_off_time,
                        total_work_duration: record.total_work_duration,
                        total_distance_travelled: Some(record.total_distance_travelled),
                        status,
                        work_type: Some(record.work_type.clone()),
                        holiday: overlay,
                    }
                }
                None => RosterRow {
                    id: format!("absent-{}-{}", kind_tag, employee.id),
                    employee_id: employee.id,
                    employee_kind: employee.kind,
                    employee_name: employee.name.clone(),
                    department,
                    date,
                    is_active: false,
                    work_mode_on_time: None,
                    work_mode_off_time: None,
                    total_work_duration: None,
                    total_distance_travelled: None,
                    status: if overlay.is_some() {
                        AttendanceStatus::Holiday
                    } else {
                        AttendanceStatus::Absent
                    },
                    work_type: None,
                    holiday: overlay,
                },
            }
        })
        .collect()
}

pub fn summarize_roster(rows: &[RosterRow]) -> RosterSummary {
    let total = rows.len();
    let count = |status: AttendanceStatus| rows.iter().filter(|r| r.status == status).count();

    let present = count(AttendanceStatus::Present);
    let present_percentage = if total == 0 {
        "0.0".to_string()
    } else {
        format!("{:.1}", present as f64 / total as f64 * 100.0)
    };

    RosterSummary {
        total,
        present,
        half_day: count(AttendanceStatus::HalfDay),
        early_leave: count(AttendanceStatus::EarlyLeave),
        absent: count(AttendanceStatus::Absent),
        active: rows.iter().filter(|r| r.is_active).count(),
        awaiting_approval: count(AttendanceStatus::AwaitingApproval),
        holiday: count(AttendanceStatus::Holiday),
        present_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn employee(id: u64, kind: EmployeeKind, name: &str) -> RosterEmployee {
        RosterEmployee {
            id,
            kind,
            name: name.to_string(),
        }
    }

    fn record(id: u64, kind: EmployeeKind, status: &str) -> AttendanceRecord {
        let on = day().and_hms_opt(9, 0, 0).unwrap();
        AttendanceRecord {
            id: format!("rec-{}", id),
            employee_id: id,
            employee_kind: kind.to_string(),
            employee_name: format!("Employee {}", id),
            date: day(),
            work_mode_on_time: on,
            work_mode_off_time: Some(day().and_hms_opt(18, 0, 0).unwrap()),
            on_latitude: Some(23.8),
            on_longitude: Some(90.4),
            off_latitude: Some(23.9),
            off_longitude: Some(90.5),
            total_distance_travelled: 10.0,
            total_work_duration: Some(9.0),
            status: status.to_string(),
            work_type: "Field Work".to_string(),
            description: None,
            remarks: None,
            approved_by: None,
        }
    }

    fn holiday(title: &str, departments: Vec<Department>) -> Holiday {
        Holiday {
            title: title.to_string(),
            description: None,
            status: Some("approved".to_string()),
            departments,
        }
    }

    #[test]
    fn holiday_overlay_is_non_destructive() {
        let roster = vec![employee(1, EmployeeKind::Hr, "A")];
        let records = vec![record(1, EmployeeKind::Hr, "Present")];
        let holidays = vec![holiday("New Year", vec![Department::Hr])];

        let rows = reconcile_roster(day(), &roster, &records, &holidays);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Holiday);
        assert_eq!(rows[0].holiday.as_ref().unwrap().title, "New Year");
        // Underlying record keeps its computed status.
        assert_eq!(records[0].status, "Present");
        assert_eq!(rows[0].total_work_duration, Some(9.0));
    }

    #[test]
    fn holiday_scope_is_per_department() {
        let roster = vec![
            employee(1, EmployeeKind::Hr, "A"),
            employee(2, EmployeeKind::SalesEmployee, "B"),
        ];
        let records = vec![
            record(1, EmployeeKind::Hr, "Present"),
            record(2, EmployeeKind::SalesEmployee, "Present"),
        ];
        let holidays = vec![holiday("HR Day", vec![Department::Hr])];

        let rows = reconcile_roster(day(), &roster, &records, &holidays);
        assert_eq!(rows[0].status, AttendanceStatus::Holiday);
        assert_eq!(rows[1].status, AttendanceStatus::Present);
        assert!(rows[1].holiday.is_none());
    }

    #[test]
    fn missing_record_synthesizes_absent_row() {
        let roster = vec![employee(7, EmployeeKind::Telecaller, "C")];

        let rows = reconcile_roster(day(), &roster, &[], &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "absent-Telecaller-7");
        assert_eq!(rows[0].status, AttendanceStatus::Absent);
        assert!(!rows[0].is_active);
        assert!(rows[0].work_mode_on_time.is_none());
        assert!(rows[0].work_mode_off_time.is_none());
        assert!(rows[0].total_distance_travelled.is_none());
    }

    #[test]
    fn absent_row_still_gets_holiday_overlay() {
        let roster = vec![employee(7, EmployeeKind::Telecaller, "C")];
        let holidays = vec![holiday("Eid", vec![Department::Telecaller])];

        let rows = reconcile_roster(day(), &roster, &[], &holidays);
        assert_eq!(rows[0].status, AttendanceStatus::Holiday);
        assert_eq!(rows[0].holiday.as_ref().unwrap().title, "Eid");
    }

    #[test]
    fn ids_match_across_partitions_without_mixing_rows() {
        // Same numeric id in two partitions; only the Hr one has a record.
        let roster = vec![
            employee(5, EmployeeKind::Hr, "A"),
            employee(5, EmployeeKind::Ceo, "B"),
        ];
        let records = vec![record(5, EmployeeKind::Hr, "Present")];

        let rows = reconcile_roster(day(), &roster, &records, &[]);
        assert_eq!(rows[0].status, AttendanceStatus::Present);
        assert_eq!(rows[1].status, AttendanceStatus::Absent);
    }

    #[test]
    fn summary_counts_and_percentage() {
        let roster = vec![
            employee(1, EmployeeKind::Hr, "A"),
            employee(2, EmployeeKind::SalesEmployee, "B"),
            employee(3, EmployeeKind::Telecaller, "C"),
            employee(4, EmployeeKind::Accountant, "D"),
        ];
        let records = vec![
            record(1, EmployeeKind::Hr, "Present"),
            record(2, EmployeeKind::SalesEmployee, "Present"),
            record(3, EmployeeKind::Telecaller, "HalfDay"),
        ];

        let rows = reconcile_roster(day(), &roster, &records, &[]);
        let summary = summarize_roster(&rows);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.half_day, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.present_percentage, "50.0");
    }

    #[test]
    fn summary_counts_active_and_awaiting() {
        let mut active = record(1, EmployeeKind::Hr, "Active");
        active.work_mode_off_time = None;
        active.total_work_duration = None;
        let awaiting = record(2, EmployeeKind::SalesEmployee, "AwaitingApproval");

        let roster = vec![
            employee(1, EmployeeKind::Hr, "A"),
            employee(2, EmployeeKind::SalesEmployee, "B"),
        ];
        let rows = reconcile_roster(day(), &roster, &[active, awaiting], &[]);
        let summary = summarize_roster(&rows);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.awaiting_approval, 1);
        assert_eq!(summary.present, 0);
    }

    #[test]
    fn empty_roster_reports_zero_percentage() {
        let summary = summarize_roster(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.present_percentage, "0.0");
    }
}
