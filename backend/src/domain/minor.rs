//! Minors (jeunes) followed by a structure and their case-file metadata.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::form_rules::{self, FieldError};
use super::{MinorId, StructureId};

/// First and last name pair used in alert wording and list search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

impl PersonName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Category tag attached to a case file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CaseCategory {
    Administrative,
    Educational,
    Medical,
    Schooling,
    /// Structure-specific tag, stored trimmed and lower-cased.
    Custom(String),
}

impl CaseCategory {
    /// Built-in categories in presentation order.
    pub const BUILT_IN: [Self; 4] = [
        Self::Administrative,
        Self::Educational,
        Self::Medical,
        Self::Schooling,
    ];

    /// Parse a wire tag; unknown tags become [`CaseCategory::Custom`].
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let tag = raw.trim().to_lowercase();
        match tag.as_str() {
            "" => Err(FieldError::new(
                "dossiers",
                "empty_category",
                "case categories must not be blank",
            )),
            "administratif" => Ok(Self::Administrative),
            "éducatif" | "educatif" => Ok(Self::Educational),
            "médical" | "medical" => Ok(Self::Medical),
            "scolaire" => Ok(Self::Schooling),
            _ => Ok(Self::Custom(tag)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Administrative => "administratif",
            Self::Educational => "éducatif",
            Self::Medical => "médical",
            Self::Schooling => "scolaire",
            Self::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CaseCategory {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CaseCategory> for String {
    fn from(value: CaseCategory) -> Self {
        value.as_str().to_owned()
    }
}

/// A persisted minor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinorRecord {
    pub id: MinorId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub structure_id: StructureId,
    pub case_complete: bool,
    pub categories: Vec<CaseCategory>,
    pub created_at: DateTime<Utc>,
}

impl MinorRecord {
    #[must_use]
    pub fn name(&self) -> PersonName {
        PersonName::new(self.first_name.clone(), self.last_name.clone())
    }
}

/// Unvalidated creation form for a minor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinorForm {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    /// Only honoured for super-admins; everyone else writes their own.
    pub structure_id: Option<StructureId>,
    pub categories: Vec<String>,
}

/// Validated minor fields awaiting a canonical structure reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinorDraft {
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    categories: Vec<CaseCategory>,
}

impl MinorDraft {
    /// Validate the form; categories are de-duplicated preserving order.
    pub fn try_from_form(form: &MinorForm) -> Result<Self, FieldError> {
        let first_name = form_rules::min_chars("prenom", &form.first_name, 1)?;
        let last_name = form_rules::min_chars("nom", &form.last_name, 1)?;
        let birth_date = form.birth_date.ok_or_else(|| {
            FieldError::new(
                "dateNaissance",
                "required",
                "dateNaissance must be provided",
            )
        })?;
        let mut categories: Vec<CaseCategory> = Vec::with_capacity(form.categories.len());
        for raw in &form.categories {
            let category = CaseCategory::parse(raw)?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(Self {
            first_name,
            last_name,
            birth_date,
            categories,
        })
    }

    /// New records always start with an incomplete case file.
    #[must_use]
    pub fn into_record(
        self,
        id: MinorId,
        structure_id: StructureId,
        created_at: DateTime<Utc>,
    ) -> MinorRecord {
        MinorRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            structure_id,
            case_complete: false,
            categories: self.categories,
            created_at,
        }
    }
}
