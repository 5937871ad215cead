//! Structures (institutions) and their creation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::form_rules::{self, FieldError};
use super::StructureId;

/// Largest staff quota a structure may be created with.
pub const MAX_USERS_CEILING: u32 = 500;

/// Staff quota presets offered when creating a structure.
pub const USER_LIMIT_PRESETS: [u32; 6] = [10, 25, 50, 100, 250, 500];

/// Kind of institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureType {
    #[serde(rename = "MECS")]
    Mecs,
    #[serde(rename = "SISEIP")]
    Siseip,
    #[serde(rename = "ITEP")]
    Itep,
    #[serde(rename = "Autre")]
    Other,
}

impl StructureType {
    /// Every structure type in presentation order.
    pub const ALL: [Self; 4] = [Self::Mecs, Self::Siseip, Self::Itep, Self::Other];

    /// Short label shown in pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mecs => "MECS",
            Self::Siseip => "SISEIP",
            Self::Itep => "ITEP",
            Self::Other => "Autre",
        }
    }

    /// Long description of the institution kind.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Mecs => "Maison d'Enfants à Caractère Social",
            Self::Siseip => "Service d'Intervention Sociale et Éducative en Placement",
            Self::Itep => "Institut Thérapeutique, Éducatif et Pédagogique",
            Self::Other => "Autre type de structure",
        }
    }
}

/// A persisted structure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    pub id: StructureId,
    pub name: String,
    #[serde(rename = "type")]
    pub structure_type: StructureType,
    pub city: String,
    pub logo_url: Option<String>,
    pub max_users: u32,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Public summary shown on the invitation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureSummary {
    pub id: StructureId,
    pub name: String,
    pub city: String,
}

impl From<&Structure> for StructureSummary {
    fn from(value: &Structure) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            city: value.city.clone(),
        }
    }
}

/// Unvalidated creation form for a structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureForm {
    pub name: String,
    pub structure_type: StructureType,
    pub city: String,
    pub email: String,
    pub max_users: u32,
}

/// Validated structure fields awaiting an identifier and logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureDraft {
    name: String,
    structure_type: StructureType,
    city: String,
    email: String,
    max_users: u32,
}

impl StructureDraft {
    /// Validate a creation form.
    ///
    /// # Examples
    /// ```
    /// use gensys_console::domain::{StructureDraft, StructureForm, StructureType};
    ///
    /// let draft = StructureDraft::try_from_form(StructureForm {
    ///     name: "MECS Les Tilleuls".into(),
    ///     structure_type: StructureType::Mecs,
    ///     city: "Lyon".into(),
    ///     email: "contact@tilleuls.fr".into(),
    ///     max_users: 25,
    /// })
    /// .expect("valid form");
    /// assert_eq!(draft.max_users(), 25);
    /// ```
    pub fn try_from_form(form: StructureForm) -> Result<Self, FieldError> {
        let name = form_rules::min_chars("name", &form.name, 2)?;
        let city = form_rules::min_chars("city", &form.city, 2)?;
        let email = form_rules::email("email", &form.email)?;
        if !(1..=MAX_USERS_CEILING).contains(&form.max_users) {
            return Err(FieldError::new(
                "maxUsers",
                "out_of_range",
                format!("maxUsers must be between 1 and {MAX_USERS_CEILING}"),
            ));
        }
        Ok(Self {
            name,
            structure_type: form.structure_type,
            city,
            email,
            max_users: form.max_users,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn max_users(&self) -> u32 {
        self.max_users
    }

    /// Materialise the record once the identifier and logo URL are known.
    #[must_use]
    pub fn into_structure(
        self,
        id: StructureId,
        logo_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Structure {
        Structure {
            id,
            name: self.name,
            structure_type: self.structure_type,
            city: self.city,
            logo_url,
            max_users: self.max_users,
            email: self.email,
            created_at,
        }
    }

    /// The fallback structure created when none exist yet.
    #[must_use]
    pub fn default_structure() -> Self {
        Self {
            name: "Structure par défaut".to_owned(),
            structure_type: StructureType::Mecs,
            city: "Paris".to_owned(),
            email: "contact@structure-par-defaut.fr".to_owned(),
            max_users: 50,
        }
    }
}

/// Image formats accepted for structure logos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Png,
    Svg,
}

impl LogoFormat {
    fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/svg+xml" => Some(Self::Svg),
            _ => None,
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// A validated logo file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoUpload {
    format: LogoFormat,
    bytes: Vec<u8>,
}

impl LogoUpload {
    /// Validate a logo by content type and size.
    pub fn new(content_type: &str, bytes: Vec<u8>) -> Result<Self, FieldError> {
        let format = LogoFormat::from_content_type(content_type).ok_or_else(|| {
            FieldError::new(
                "logo",
                "unsupported_format",
                "logo must be a PNG or SVG image",
            )
        })?;
        if bytes.is_empty() {
            return Err(FieldError::new("logo", "required", "logo must not be empty"));
        }
        Ok(Self { format, bytes })
    }

    #[must_use]
    pub const fn format(&self) -> LogoFormat {
        self.format
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Object path inside the storage bucket: `logos/{id}.{ext}`.
    #[must_use]
    pub fn object_path(&self, structure_id: &StructureId) -> String {
        format!("logos/{structure_id}.{}", self.format.extension())
    }
}

/// Registration link handed to a structure's future staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteLink {
    pub url: String,
    pub structure: StructureSummary,
}

impl InviteLink {
    /// Build `{base}/inscription?structure_id={id}`.
    pub fn build(base: &Url, structure: StructureSummary) -> Result<Self, url::ParseError> {
        let mut url = base.join("inscription")?;
        url.query_pairs_mut()
            .clear()
            .append_pair("structure_id", &structure.id.to_string());
        Ok(Self {
            url: url.to_string(),
            structure,
        })
    }
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
