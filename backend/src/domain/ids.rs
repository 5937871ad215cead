//! Typed record identifiers.
//!
//! Every collection in the record store is keyed by a UUID. Wrapping each key
//! in its own newtype keeps a minor identifier from being passed where a
//! structure identifier is expected.

use std::fmt;

use uuid::Uuid;

/// Validation errors raised when parsing a record identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdValidationError {
    #[error("{kind} identifier must not be empty")]
    Empty { kind: &'static str },
    #[error("{kind} identifier must be a valid UUID")]
    Invalid { kind: &'static str },
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Validate and construct an identifier from text.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, RecordIdValidationError> {
                parse_uuid(raw.as_ref(), $kind).map(Self)
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = RecordIdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = RecordIdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

fn parse_uuid(raw: &str, kind: &'static str) -> Result<Uuid, RecordIdValidationError> {
    if raw.is_empty() {
        return Err(RecordIdValidationError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(RecordIdValidationError::Invalid { kind });
    }
    Uuid::parse_str(raw).map_err(|_| RecordIdValidationError::Invalid { kind })
}

define_record_id!(
    /// Identifier of a structure (institution). Assigned once at creation.
    StructureId => "structure"
);
define_record_id!(
    /// Identifier of a staff member; shared with the hosted auth user id.
    StaffId => "staff"
);
define_record_id!(
    /// Identifier of a minor's case file.
    MinorId => "minor"
);
define_record_id!(
    /// Identifier of a follow-up note.
    NoteId => "note"
);
define_record_id!(
    /// Identifier of an interview transcription.
    TranscriptionId => "transcription"
);
define_record_id!(
    /// Identifier of a calendar event.
    EventId => "event"
);
