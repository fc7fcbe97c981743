use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Organizational partition an employee belongs to. Holiday scoping matches
/// against this tag, never against the raw employee id.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Department {
    TeamLeader,
    Hr,
    Accountant,
    Telecaller,
    Sales,
    ProjectManager,
    Ceo,
}

/// Parse a comma-separated department list as stored in the holidays table.
/// Unknown tags are skipped rather than failing the whole row.
pub fn parse_departments(raw: &str) -> Vec<Department> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

pub fn join_departments(departments: &[Department]) -> String {
    departments
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_tags() {
        let parsed = parse_departments("Hr, Sales,Ceo");
        assert_eq!(
            parsed,
            vec![Department::Hr, Department::Sales, Department::Ceo]
        );
    }

    #[test]
    fn skips_unknown_tags() {
        let parsed = parse_departments("Hr,Marketing,");
        assert_eq!(parsed, vec![Department::Hr]);
    }

    #[test]
    fn join_round_trips() {
        let departments = vec![Department::TeamLeader, Department::ProjectManager];
        assert_eq!(
            parse_departments(&join_departments(&departments)),
            departments
        );
    }
}
