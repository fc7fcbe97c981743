use crate::api::attendance::{
    EmployeeQuery, StatusUpdateRequest, TodayResponse, TravelSampleRequest, WorkModeOffRequest,
    WorkModeOnRequest,
};
use crate::api::holiday::{CreateHoliday, HolidayResponse};
use crate::api::roster::{RosterResponse, RosterSummaryResponse};
use crate::engine::reconcile::{HolidayOverlay, RosterRow, RosterSummary};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, CoordinatesInput, SessionSummary, TravelLog,
};
use crate::model::department::Department;
use crate::model::employee::EmployeeKind;
use utoipa::OpenApi;
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Worktrack API",
        version = "1.0.0",
        description = r#"
## Field Attendance Tracking

This API powers attendance tracking for a multi-department field organization.

### 🔹 Key Features
- **Work Mode Sessions**
  - Clock in/out once per employee per day, with same-day session extension
- **Travel Logging**
  - Append GPS samples and caller-reported cumulative distance while a session is open
- **Daily Roster**
  - Per-date reconciliation of records, synthetic absences and department-scoped holidays
- **Holiday Registry**
  - Department-scoped holiday intake used as a roster overlay

### 📦 Response Format
- JSON-based RESTful responses
- Duration is reported in hours (2 decimal places), roster percentage as a 1-decimal string

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::work_mode_on,
        crate::api::attendance::work_mode_off,
        crate::api::attendance::travel_sample,
        crate::api::attendance::today_status,
        crate::api::attendance::set_status,

        crate::api::roster::daily_roster,
        crate::api::roster::roster_summary,

        crate::api::holiday::create_holiday,
        crate::api::holiday::list_holidays
    ),
    components(
        schemas(
            WorkModeOnRequest,
            WorkModeOffRequest,
            TravelSampleRequest,
            EmployeeQuery,
            StatusUpdateRequest,
            TodayResponse,
            SessionSummary,
            AttendanceRecord,
            AttendanceStatus,
            CoordinatesInput,
            TravelLog,
            RosterResponse,
            RosterSummaryResponse,
            RosterRow,
            RosterSummary,
            HolidayOverlay,
            CreateHoliday,
            HolidayResponse,
            Department,
            EmployeeKind
        )
    ),
    tags(
        (name = "Attendance", description = "Work-mode session APIs"),
        (name = "Roster", description = "Daily roster reconciliation APIs"),
        (name = "Holiday", description = "Holiday registry APIs"),
    )
)]
pub struct ApiDoc;
