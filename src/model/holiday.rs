use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::department::{Department, parse_departments};

/// Raw holidays row. `departments` is a comma-separated department tag list.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct HolidayRow {
    pub id: u64,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "New Year")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "approved", nullable = true)]
    pub status: Option<String>,
    #[schema(example = "Hr,Sales")]
    pub departments: String,
}

/// Parsed descriptor handed to roster reconciliation.
#[derive(Debug, Clone)]
pub struct Holiday {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub departments: Vec<Department>,
}

impl HolidayRow {
    pub fn descriptor(&self) -> Holiday {
        Holiday {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            departments: parse_departments(&self.departments),
        }
    }
}

impl Holiday {
    pub fn covers(&self, department: Department) -> bool {
        self.departments.contains(&department)
    }
}
