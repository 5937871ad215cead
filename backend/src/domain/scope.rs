//! Visibility scope applied to every record query.

use serde::{Deserialize, Serialize};

use super::{Error, Principal, StructureId};

/// How far a query may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    /// Every structure is visible.
    AllStructures,
    /// Only records of `structure_id` are visible.
    OwnStructure,
}

/// Structure identifier plus permission level, passed explicitly to every
/// aggregation and repository call.
///
/// # Examples
/// ```
/// use gensys_console::domain::{ScopeFilter, StructureId};
///
/// let id = StructureId::random();
/// assert_eq!(ScopeFilter::structure(id).restriction(), Some(&id));
/// assert_eq!(ScopeFilter::all_structures(id).restriction(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeFilter {
    structure_id: StructureId,
    level: PermissionLevel,
}

impl ScopeFilter {
    /// Scope restricted to a single structure.
    #[must_use]
    pub const fn structure(structure_id: StructureId) -> Self {
        Self {
            structure_id,
            level: PermissionLevel::OwnStructure,
        }
    }

    /// Unrestricted scope anchored on the caller's home structure.
    #[must_use]
    pub const fn all_structures(home: StructureId) -> Self {
        Self {
            structure_id: home,
            level: PermissionLevel::AllStructures,
        }
    }

    /// Derive the scope for an authenticated principal.
    #[must_use]
    pub const fn for_principal(principal: &Principal) -> Self {
        if principal.is_super_admin() {
            Self::all_structures(principal.structure_id)
        } else {
            Self::structure(principal.structure_id)
        }
    }

    /// Derive the scope for a principal that asked to focus on `focus`.
    ///
    /// Super-admins may focus on any structure; everyone else may only
    /// "focus" on their own.
    pub fn focused(principal: &Principal, focus: Option<StructureId>) -> Result<Self, Error> {
        match focus {
            None => Ok(Self::for_principal(principal)),
            Some(id) if principal.is_super_admin() || id == principal.structure_id => {
                Ok(Self::structure(id))
            }
            Some(_) => Err(Error::forbidden(
                "access to another structure requires the super_admin role",
            )),
        }
    }

    /// Home structure of the scope.
    #[must_use]
    pub const fn structure_id(&self) -> &StructureId {
        &self.structure_id
    }

    #[must_use]
    pub const fn level(&self) -> PermissionLevel {
        self.level
    }

    /// Structure to filter on, or `None` when unrestricted.
    #[must_use]
    pub const fn restriction(&self) -> Option<&StructureId> {
        match self.level {
            PermissionLevel::AllStructures => None,
            PermissionLevel::OwnStructure => Some(&self.structure_id),
        }
    }

    /// Whether a record owned by `owner` is visible in this scope.
    #[must_use]
    pub fn permits(&self, owner: &StructureId) -> bool {
        self.restriction().is_none_or(|id| id == owner)
    }
}
