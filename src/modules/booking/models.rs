use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Form state exactly as the user typed or selected it.
///
/// Every field is a plain string so that blank or unknown selections can be
/// represented and rejected by validation instead of by deserialization.
/// Fields missing from a JSON payload are blank, not the form defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub pet_type: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            pet_type: PetType::Dog.as_str().to_string(),
            service_type: ServiceType::Basic.as_str().to_string(),
            date: String::new(),
            notes: String::new(),
        }
    }
}

impl BookingDraft {
    pub fn field(&self, field: BookingField) -> &str {
        match field {
            BookingField::Name => &self.name,
            BookingField::Phone => &self.phone,
            BookingField::Email => &self.email,
            BookingField::PetType => &self.pet_type,
            BookingField::ServiceType => &self.service_type,
            BookingField::Date => &self.date,
            BookingField::Notes => &self.notes,
        }
    }

    pub(crate) fn field_mut(&mut self, field: BookingField) -> &mut String {
        match field {
            BookingField::Name => &mut self.name,
            BookingField::Phone => &mut self.phone,
            BookingField::Email => &mut self.email,
            BookingField::PetType => &mut self.pet_type,
            BookingField::ServiceType => &mut self.service_type,
            BookingField::Date => &mut self.date,
            BookingField::Notes => &mut self.notes,
        }
    }
}

/// The seven inputs of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    Name,
    Phone,
    Email,
    PetType,
    ServiceType,
    Date,
    Notes,
}

impl BookingField {
    pub const ALL: [BookingField; 7] = [
        BookingField::Name,
        BookingField::Phone,
        BookingField::Email,
        BookingField::PetType,
        BookingField::ServiceType,
        BookingField::Date,
        BookingField::Notes,
    ];

    /// Name of the input as used by the form and its JSON payload.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::Phone => "phone",
            BookingField::Email => "email",
            BookingField::PetType => "petType",
            BookingField::ServiceType => "serviceType",
            BookingField::Date => "date",
            BookingField::Notes => "notes",
        }
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for BookingField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
    Other,
}

impl PetType {
    pub const ALL: [PetType; 3] = [PetType::Dog, PetType::Cat, PetType::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            PetType::Dog => "dog",
            PetType::Cat => "cat",
            PetType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PetType::Dog => "狗狗",
            PetType::Cat => "貓咪",
            PetType::Other => "其他",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pet| pet.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Basic,
    Style,
    Care,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [ServiceType::Basic, ServiceType::Style, ServiceType::Care];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Basic => "basic",
            ServiceType::Style => "style",
            ServiceType::Care => "care",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceType::Basic => "基礎清潔",
            ServiceType::Style => "美容造型",
            ServiceType::Care => "深層保養",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| service.as_str() == value)
    }
}

/// A validated booking, normalized for the remote store.
///
/// Optional inputs left blank are `None` and go over the wire as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub pet_type: PetType,
    pub service_type: ServiceType,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// One option of a select input.
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn pet_options() -> Vec<SelectOption> {
    PetType::ALL
        .into_iter()
        .map(|pet| SelectOption {
            value: pet.as_str(),
            label: pet.label(),
        })
        .collect()
}

pub fn service_options() -> Vec<SelectOption> {
    ServiceType::ALL
        .into_iter()
        .map(|service| SelectOption {
            value: service.as_str(),
            label: service.label(),
        })
        .collect()
}
