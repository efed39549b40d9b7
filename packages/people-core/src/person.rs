//! Person record and its validation rules.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ModelState;

/// Maximum length of first and last names, in characters.
pub const MAX_NAME_LEN: usize = 50;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// One person in the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonModel {
    /// Unique within a store; 0 asks the store to assign one
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    /// Required in JSON; there is no sensible fallback date
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

impl PersonModel {
    /// Records every rule this person breaks into `state`.
    pub fn validate(&self, state: &mut ModelState) {
        self.validate_at(Utc::now().date_naive(), state);
    }

    /// Like [`PersonModel::validate`], with an explicit current date.
    pub fn validate_at(&self, today: NaiveDate, state: &mut ModelState) {
        check_name("firstName", "First name", &self.first_name, state);
        check_name("lastName", "Last name", &self.last_name, state);

        if !self.phone_number.is_empty() && !is_valid_phone(&self.phone_number) {
            state.add_model_error(
                "phoneNumber",
                format!(
                    "Phone number must contain {}-{} digits",
                    MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
                ),
            );
        }

        if self.date_of_birth > today {
            state.add_model_error("dateOfBirth", "Date of birth cannot be in the future");
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn check_name(key: &str, label: &str, value: &str, state: &mut ModelState) {
    if value.trim().is_empty() {
        state.add_model_error(key, format!("{} is required", label));
    } else if value.chars().count() > MAX_NAME_LEN {
        state.add_model_error(
            key,
            format!("{} must be at most {} characters", label, MAX_NAME_LEN),
        );
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    digits.chars().all(|c| c.is_ascii_digit())
        && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn thai() -> PersonModel {
        PersonModel {
            id: 1,
            first_name: "Thai".to_string(),
            last_name: "Do Van".to_string(),
            gender: "Male".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 2, 15).unwrap(),
            phone_number: "0989479615".to_string(),
            address: "Thai Binh".to_string(),
        }
    }

    #[test]
    fn test_valid_person() {
        let mut state = ModelState::new();
        thai().validate_at(today(), &mut state);
        assert!(state.is_valid(), "unexpected errors: {:?}", state);
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let person = PersonModel {
            gender: String::new(),
            phone_number: String::new(),
            address: String::new(),
            ..thai()
        };
        let mut state = ModelState::new();
        person.validate_at(today(), &mut state);
        assert!(state.is_valid());
    }

    #[test]
    fn test_names_required() {
        let person = PersonModel {
            first_name: "  ".to_string(),
            last_name: String::new(),
            ..thai()
        };
        let mut state = ModelState::new();
        person.validate_at(today(), &mut state);
        assert_eq!(state.error_count(), 2);
        assert_eq!(state.get("firstName").unwrap(), &["First name is required"]);
        assert_eq!(state.get("lastName").unwrap(), &["Last name is required"]);
    }

    #[test]
    fn test_name_too_long() {
        let person = PersonModel {
            last_name: "x".repeat(MAX_NAME_LEN + 1),
            ..thai()
        };
        let mut state = ModelState::new();
        person.validate_at(today(), &mut state);
        assert_eq!(state.error_count(), 1);
        assert!(state.get("lastName").is_some());
    }

    #[test]
    fn test_phone_number_rules() {
        for phone in ["+84989479615", "0989479615", "1234567"] {
            let person = PersonModel {
                phone_number: phone.to_string(),
                ..thai()
            };
            let mut state = ModelState::new();
            person.validate_at(today(), &mut state);
            assert!(state.is_valid(), "{} should be accepted", phone);
        }

        for phone in ["098-947-9615", "123", "1234567890123456", "+", "phone"] {
            let person = PersonModel {
                phone_number: phone.to_string(),
                ..thai()
            };
            let mut state = ModelState::new();
            person.validate_at(today(), &mut state);
            assert!(state.get("phoneNumber").is_some(), "{} should be rejected", phone);
        }
    }

    #[test]
    fn test_date_of_birth_in_future() {
        let person = PersonModel {
            date_of_birth: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            ..thai()
        };
        let mut state = ModelState::new();
        person.validate_at(today(), &mut state);
        assert_eq!(
            state.get("dateOfBirth").unwrap(),
            &["Date of birth cannot be in the future"]
        );
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(thai()).unwrap();
        assert_eq!(json["firstName"], "Thai");
        assert_eq!(json["dateOfBirth"], "2001-02-15");

        let parsed: PersonModel = serde_json::from_value(serde_json::json!({
            "id": 4,
            "firstName": "Mang",
            "lastName": "Nguyen Ba",
            "dateOfBirth": "2001-02-15",
            "address": "Ha Noi"
        }))
        .unwrap();
        assert_eq!(parsed.id, 4);
        assert!(parsed.gender.is_empty());
        assert_eq!(parsed.full_name(), "Mang Nguyen Ba");
    }

    #[test]
    fn test_date_of_birth_required_in_json() {
        let result: Result<PersonModel, _> = serde_json::from_value(serde_json::json!({
            "id": 4,
            "firstName": "Mang",
            "lastName": "Nguyen Ba"
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("dateOfBirth"), "unexpected error: {}", err);
    }
}
