//! Field-by-field validation of a [`BookingDraft`].
//!
//! Each input has its own check returning the normalized value or the
//! constraint it violated. [`validate`] runs all of them and reports every
//! failing field at once, in form order.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use validator::ValidateEmail;

use super::models::{BookingDraft, BookingField, BookingRecord, PetType, ServiceType};

pub const MIN_PHONE_LEN: usize = 6;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "min")]
pub enum Constraint {
    Required,
    MinLength(usize),
    Email,
    OneOf,
    Date,
}

impl Constraint {
    pub fn code(self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::MinLength(_) => "min_length",
            Constraint::Email => "email",
            Constraint::OneOf => "one_of",
            Constraint::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: BookingField,
    pub constraint: Constraint,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: BookingField, constraint: Constraint) -> Self {
        Self {
            field,
            constraint,
            message: message_for(field),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn message_for(field: BookingField) -> &'static str {
    match field {
        BookingField::Name => "請輸入聯絡人姓名",
        BookingField::Phone => "請輸入有效電話",
        BookingField::Email => "請輸入正確 Email",
        BookingField::PetType => "請選擇寵物類型",
        BookingField::ServiceType => "請選擇服務類型",
        BookingField::Date => "請輸入正確日期",
        BookingField::Notes => "請確認備註內容",
    }
}

/// Every field that failed validation, in form order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) need correction", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = BookingField> + '_ {
        self.0.iter().map(|error| error.field)
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.fields().any(|f| f == field)
    }

    pub fn get(&self, field: BookingField) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }
}

/// Any non-empty input counts; the value is stored exactly as typed.
pub fn validate_name(value: &str) -> Result<String, FieldError> {
    if value.is_empty() {
        return Err(FieldError::new(BookingField::Name, Constraint::Required));
    }
    Ok(value.to_string())
}

/// Length is counted in characters on the raw input, padding included.
pub fn validate_phone(value: &str) -> Result<String, FieldError> {
    if value.chars().count() < MIN_PHONE_LEN {
        return Err(FieldError::new(
            BookingField::Phone,
            Constraint::MinLength(MIN_PHONE_LEN),
        ));
    }
    Ok(value.to_string())
}

/// Blank means "not given"; anything else has to look like an address.
pub fn validate_email(value: &str) -> Result<Option<String>, FieldError> {
    let Some(email) = non_blank(value) else {
        return Ok(None);
    };
    if !email.validate_email() {
        return Err(FieldError::new(BookingField::Email, Constraint::Email));
    }
    Ok(Some(email))
}

pub fn validate_pet_type(value: &str) -> Result<PetType, FieldError> {
    match value.trim() {
        "" => Err(FieldError::new(BookingField::PetType, Constraint::Required)),
        other => PetType::parse(other)
            .ok_or_else(|| FieldError::new(BookingField::PetType, Constraint::OneOf)),
    }
}

pub fn validate_service_type(value: &str) -> Result<ServiceType, FieldError> {
    match value.trim() {
        "" => Err(FieldError::new(BookingField::ServiceType, Constraint::Required)),
        other => ServiceType::parse(other)
            .ok_or_else(|| FieldError::new(BookingField::ServiceType, Constraint::OneOf)),
    }
}

pub fn validate_date(value: &str) -> Result<Option<NaiveDate>, FieldError> {
    let Some(date) = non_blank(value) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&date, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FieldError::new(BookingField::Date, Constraint::Date))
}

pub fn normalize_notes(value: &str) -> Option<String> {
    non_blank(value)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Run every field check; the draft itself is never touched.
pub fn validate(draft: &BookingDraft) -> Result<BookingRecord, ValidationErrors> {
    let mut errors = Vec::new();

    let name = keep(validate_name(&draft.name), &mut errors);
    let phone = keep(validate_phone(&draft.phone), &mut errors);
    let email = keep(validate_email(&draft.email), &mut errors);
    let pet_type = keep(validate_pet_type(&draft.pet_type), &mut errors);
    let service_type = keep(validate_service_type(&draft.service_type), &mut errors);
    let date = keep(validate_date(&draft.date), &mut errors);

    match (name, phone, email, pet_type, service_type, date) {
        (Some(name), Some(phone), Some(email), Some(pet_type), Some(service_type), Some(date)) => {
            Ok(BookingRecord {
                name,
                phone,
                email,
                pet_type,
                service_type,
                date,
                notes: normalize_notes(&draft.notes),
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

fn keep<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    result.map_err(|error| errors.push(error)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> BookingDraft {
        BookingDraft {
            name: "王小明".to_string(),
            phone: "0912345678".to_string(),
            ..BookingDraft::default()
        }
    }

    #[test]
    fn minimal_valid_draft_normalizes_blanks_to_none() {
        let record = validate(&valid_draft()).unwrap();
        assert_eq!(record.name, "王小明");
        assert_eq!(record.phone, "0912345678");
        assert_eq!(record.email, None);
        assert_eq!(record.date, None);
        assert_eq!(record.notes, None);
        assert_eq!(record.pet_type, PetType::Dog);
        assert_eq!(record.service_type, ServiceType::Basic);
    }

    #[test]
    fn empty_name_is_required() {
        let draft = BookingDraft {
            name: String::new(),
            ..valid_draft()
        };
        let errors = validate(&draft).unwrap_err();
        assert_eq!(errors.get(BookingField::Name).unwrap().constraint, Constraint::Required);
    }

    #[test]
    fn name_is_kept_as_typed() {
        assert_eq!(validate_name(" 王小明 ").unwrap(), " 王小明 ");
        assert_eq!(validate_name("   ").unwrap(), "   ");
    }

    #[test]
    fn short_phone_is_rejected() {
        for phone in ["", "12345", "1234 ", "〇九一二三"] {
            let draft = BookingDraft {
                phone: phone.to_string(),
                ..valid_draft()
            };
            let errors = validate(&draft).unwrap_err();
            assert_eq!(
                errors.get(BookingField::Phone).unwrap().constraint,
                Constraint::MinLength(MIN_PHONE_LEN),
                "phone {phone:?}"
            );
        }
        assert!(validate_phone("02-1234").is_ok());
        assert_eq!(validate_phone("12345 ").unwrap(), "12345 ");
        assert_eq!(validate_phone("  1234  ").unwrap(), "  1234  ");
        assert!(validate_phone("〇九一二三四").is_ok());
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        assert_eq!(validate_email("").unwrap(), None);
        assert_eq!(validate_email("  ").unwrap(), None);
        assert_eq!(
            validate_email("you@example.com").unwrap().as_deref(),
            Some("you@example.com")
        );

        for bad in ["not-an-email", "you@", "@example.com", "a b@example.com"] {
            let draft = BookingDraft {
                email: bad.to_string(),
                ..valid_draft()
            };
            let errors = validate(&draft).unwrap_err();
            assert!(errors.contains(BookingField::Email), "email {bad:?}");
        }
    }

    #[test]
    fn pet_type_must_be_a_known_option() {
        let unset = validate_pet_type("").unwrap_err();
        assert_eq!(unset.constraint, Constraint::Required);

        for bad in ["bird", "Dog", "dogs"] {
            let draft = BookingDraft {
                pet_type: bad.to_string(),
                ..valid_draft()
            };
            let errors = validate(&draft).unwrap_err();
            assert_eq!(errors.get(BookingField::PetType).unwrap().constraint, Constraint::OneOf);
        }
        assert_eq!(validate_pet_type("cat").unwrap(), PetType::Cat);
        assert_eq!(validate_pet_type("other").unwrap(), PetType::Other);
    }

    #[test]
    fn service_type_must_be_a_known_option() {
        assert!(validate_service_type("").is_err());
        assert!(validate_service_type("deluxe").is_err());
        assert_eq!(validate_service_type("style").unwrap(), ServiceType::Style);
        assert_eq!(validate_service_type("care").unwrap(), ServiceType::Care);
    }

    #[test]
    fn date_must_be_well_formed_when_given() {
        assert_eq!(validate_date("").unwrap(), None);
        assert_eq!(
            validate_date("2025-12-24").unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 24)
        );
        assert!(validate_date("2025-02-30").is_err());
        assert!(validate_date("24/12/2025").is_err());
    }

    #[test]
    fn all_failures_are_reported_in_form_order() {
        let draft = BookingDraft {
            name: String::new(),
            phone: "123".to_string(),
            email: "nope".to_string(),
            pet_type: String::new(),
            service_type: "spa".to_string(),
            date: "tomorrow".to_string(),
            notes: "anything goes".to_string(),
        };

        let errors = validate(&draft).unwrap_err();
        let fields: Vec<BookingField> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                BookingField::Name,
                BookingField::Phone,
                BookingField::Email,
                BookingField::PetType,
                BookingField::ServiceType,
                BookingField::Date,
            ]
        );
        assert!(errors.0.iter().all(|e| !e.message.is_empty()));
    }

    #[test]
    fn validation_is_idempotent() {
        let draft = BookingDraft {
            phone: "12".to_string(),
            email: "x@".to_string(),
            ..BookingDraft::default()
        };
        let before = draft.clone();

        let first = validate(&draft).unwrap_err();
        let second = validate(&draft).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(draft, before);

        let ok = valid_draft();
        assert_eq!(validate(&ok), validate(&ok));
    }
}
