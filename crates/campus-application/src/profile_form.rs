use campus_core::error::{CampusError, Result};
use campus_core::identity::Identity;
use campus_core::profile::{Department, StudentProfile, YearOfStudy};
use std::str::FromStr;

/// Editable fields of the profile page.
///
/// The email is not editable: it always mirrors the signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    /// Label or short form ("3rd Year", "3")
    pub year_of_study: String,
    pub department: String,
    email: String,
}

impl ProfileForm {
    /// Form for `identity`, filled from its existing profile if there is one.
    pub fn prefill(identity: &Identity, existing: Option<&StudentProfile>) -> Self {
        let email = identity
            .email
            .clone()
            .or_else(|| existing.map(|profile| profile.email.clone()))
            .unwrap_or_default();

        match existing {
            Some(profile) => Self {
                full_name: profile.full_name.clone(),
                phone: profile.phone.clone(),
                address: profile.address.clone(),
                year_of_study: profile.year_of_study.to_string(),
                department: profile.department.to_string(),
                email,
            },
            None => Self {
                full_name: identity.display_name.clone().unwrap_or_default(),
                email,
                ..Self::default()
            },
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Checks every field and builds the complete profile document.
    ///
    /// # Errors
    ///
    /// Returns `CampusError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<StudentProfile> {
        let full_name = required("full name", &self.full_name)?;
        let phone = required("phone", &self.phone)?;
        let address = required("address", &self.address)?;

        let year_of_study = YearOfStudy::from_str(self.year_of_study.trim()).map_err(|_| {
            CampusError::validation(
                "year of study",
                format!("'{}' is not one of 1st Year to 5th Year", self.year_of_study.trim()),
            )
        })?;
        let department = Department::from_str(self.department.trim()).map_err(|_| {
            CampusError::validation(
                "department",
                format!("unknown department '{}'", self.department.trim()),
            )
        })?;

        Ok(StudentProfile {
            full_name,
            email: self.email.clone(),
            phone,
            address,
            year_of_study,
            department,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CampusError::validation(field, "is required"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{identity, profile};

    #[test]
    fn test_prefill_new_profile_uses_identity() {
        let mut identity = identity();
        identity.display_name = Some("Grace".to_string());

        let form = ProfileForm::prefill(&identity, None);

        assert_eq!(form.email(), "new@x.com");
        assert_eq!(form.full_name, "Grace");
        assert!(form.phone.is_empty());
    }

    #[test]
    fn test_prefill_round_trips_existing_profile() {
        let form = ProfileForm::prefill(&identity(), Some(&profile()));

        assert_eq!(form.year_of_study, "4th Year");
        assert_eq!(form.department, "Computer Science");
        assert_eq!(form.validate().unwrap(), profile());
    }

    #[test]
    fn test_email_follows_identity_not_stored_profile() {
        let stored = StudentProfile {
            email: "old@x.com".to_string(),
            ..profile()
        };

        let form = ProfileForm::prefill(&identity(), Some(&stored));

        assert_eq!(form.validate().unwrap().email, "new@x.com");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut form = ProfileForm::prefill(&identity(), Some(&profile()));
        form.phone = "   ".to_string();

        assert_eq!(
            form.validate().unwrap_err(),
            CampusError::validation("phone", "is required")
        );
    }

    #[test]
    fn test_validate_parses_choices() {
        let mut form = ProfileForm::prefill(&identity(), Some(&profile()));
        form.year_of_study = "2".to_string();
        form.department = "mechanical".to_string();
        let parsed = form.validate().unwrap();
        assert_eq!(parsed.year_of_study, YearOfStudy::Second);
        assert_eq!(parsed.department, Department::Mechanical);

        form.year_of_study = "6th Year".to_string();
        assert!(matches!(
            form.validate().unwrap_err(),
            CampusError::Validation {
                field: "year of study",
                ..
            }
        ));

        form.year_of_study = "1st Year".to_string();
        form.department = "Astrology".to_string();
        assert!(matches!(
            form.validate().unwrap_err(),
            CampusError::Validation {
                field: "department",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_trims_input() {
        let mut form = ProfileForm::prefill(&identity(), None);
        form.full_name = "  Grace Hopper ".to_string();
        form.phone = "555-0199".to_string();
        form.address = "1 Compiler Way".to_string();
        form.year_of_study = " 4th Year ".to_string();
        form.department = "Computer Science".to_string();

        assert_eq!(form.validate().unwrap(), profile());
    }
}
