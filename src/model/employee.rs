use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::department::Department;

/// Which directory partition an employee id resolves in. Ids are only unique
/// within a partition, so every attendance operation carries the kind tag
/// alongside the id.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum EmployeeKind {
    TeamLeader,
    Hr,
    Accountant,
    Telecaller,
    SalesEmployee,
    ProjectManager,
    Ceo,
}

impl EmployeeKind {
    /// Department tag used for holiday-scope matching.
    pub fn department(self) -> Department {
        match self {
            EmployeeKind::TeamLeader => Department::TeamLeader,
            EmployeeKind::Hr => Department::Hr,
            EmployeeKind::Accountant => Department::Accountant,
            EmployeeKind::Telecaller => Department::Telecaller,
            EmployeeKind::SalesEmployee => Department::Sales,
            EmployeeKind::ProjectManager => Department::ProjectManager,
            EmployeeKind::Ceo => Department::Ceo,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "kind": "SalesEmployee",
        "name": "John Doe",
        "email": "john.doe@company.com",
        "phone": "+8801712345678",
        "status": "active"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "SalesEmployee")]
    pub kind: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "active", nullable = true)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_onto_department_tag() {
        assert_eq!(EmployeeKind::SalesEmployee.department(), Department::Sales);
        assert_eq!(EmployeeKind::Hr.department(), Department::Hr);
    }

    #[test]
    fn kind_string_round_trip() {
        let kind: EmployeeKind = "ProjectManager".parse().unwrap();
        assert_eq!(kind, EmployeeKind::ProjectManager);
        assert_eq!(kind.to_string(), "ProjectManager");
        assert!("Manager".parse::<EmployeeKind>().is_err());
    }
}
