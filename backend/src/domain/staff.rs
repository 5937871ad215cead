//! Staff members (éducateurs), their roles and the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StaffId, StructureId};

/// Staff role ordered by privilege: `User < Educator < Admin < SuperAdmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Limited access to basic features.
    User,
    /// Access to the data of their own structure.
    #[serde(rename = "educateur")]
    Educator,
    /// Manages staff and data of their own structure.
    Admin,
    /// Manages every structure and every user.
    SuperAdmin,
}

impl StaffRole {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "Utilisateur",
            Self::Educator => "Éducateur",
            Self::Admin => "Administrateur",
            Self::SuperAdmin => "Super Admin",
        }
    }

    /// Wire name stored in the record store and identity metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Educator => "educateur",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether this role may manage staff and invitations.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

/// Account mode of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffMode {
    Normal,
    Test,
    Demo,
}

impl StaffMode {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Normal => "Accès complet aux fonctionnalités",
            Self::Test => "Compte de test avec données fictives",
            Self::Demo => "Compte de démonstration avec accès limité",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Test => "test",
            Self::Demo => "demo",
        }
    }
}

/// A persisted staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub structure_id: StructureId,
    pub role: StaffRole,
    pub mode: Option<StaffMode>,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Authenticated staff member as carried by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: StaffId,
    pub email: String,
    pub display_name: String,
    pub role: StaffRole,
    pub structure_id: StructureId,
}

impl Principal {
    #[must_use]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self.role, StaffRole::SuperAdmin)
    }
}

impl From<&StaffMember> for Principal {
    fn from(value: &StaffMember) -> Self {
        Self {
            id: value.id,
            email: value.email.clone(),
            display_name: value.display_name(),
            role: value.role,
            structure_id: value.structure_id,
        }
    }
}
