//! Student profile domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Academic year, as offered by the profile form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum YearOfStudy {
    #[serde(rename = "1st Year")]
    #[strum(to_string = "1st Year", serialize = "1")]
    First,
    #[serde(rename = "2nd Year")]
    #[strum(to_string = "2nd Year", serialize = "2")]
    Second,
    #[serde(rename = "3rd Year")]
    #[strum(to_string = "3rd Year", serialize = "3")]
    Third,
    #[serde(rename = "4th Year")]
    #[strum(to_string = "4th Year", serialize = "4")]
    Fourth,
    #[serde(rename = "5th Year")]
    #[strum(to_string = "5th Year", serialize = "5")]
    Fifth,
}

/// Department catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Department {
    #[serde(rename = "Computer Science")]
    #[strum(serialize = "Computer Science")]
    ComputerScience,
    #[serde(rename = "Information Technology")]
    #[strum(serialize = "Information Technology")]
    InformationTechnology,
    Electronics,
    Mechanical,
    Civil,
    Electrical,
    Chemical,
    Biotechnology,
    Other,
}

/// A student's profile document.
///
/// Always written and read as a whole; there is no partial update.
/// Field names on the wire follow the portal's document layout
/// (`fullName`, `yearOfStudying`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub full_name: String,
    /// Mirrors the identity's email; not editable by the student
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "yearOfStudying")]
    pub year_of_study: YearOfStudy,
    pub department: Department,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_year_display_matches_form_labels() {
        let labels: Vec<String> = YearOfStudy::iter().map(|y| y.to_string()).collect();
        assert_eq!(
            labels,
            vec!["1st Year", "2nd Year", "3rd Year", "4th Year", "5th Year"]
        );
    }

    #[test]
    fn test_year_accepts_short_form() {
        assert_eq!(YearOfStudy::from_str("3").unwrap(), YearOfStudy::Third);
        assert_eq!(YearOfStudy::from_str("3rd Year").unwrap(), YearOfStudy::Third);
        assert!(YearOfStudy::from_str("6th Year").is_err());
    }

    #[test]
    fn test_department_catalog() {
        assert_eq!(Department::iter().count(), 9);
        assert_eq!(
            Department::from_str("computer science").unwrap(),
            Department::ComputerScience
        );
        assert_eq!(Department::Electronics.to_string(), "Electronics");
    }

    #[test]
    fn test_document_uses_portal_field_names() {
        let profile = StudentProfile {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Row".to_string(),
            year_of_study: YearOfStudy::Second,
            department: Department::ComputerScience,
        };

        let doc = toml::to_string(&profile).unwrap();
        assert!(doc.contains("fullName = \"Ada Lovelace\""));
        assert!(doc.contains("yearOfStudying = \"2nd Year\""));
        assert!(doc.contains("department = \"Computer Science\""));
    }
}
