//! Shared error vocabulary for the record-store ports.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::{
    EventRepository, MinorRepository, NoteRepository, StaffRepository, StructureRepository,
    TranscriptionRepository, define_port_error,
};

define_port_error! {
    /// Errors raised by record-store adapters.
    pub enum RecordStoreError {
        /// The store could not be reached.
        Connection { message: String } =>
            "record store connection failed: {message}",
        /// The store rejected or failed the query.
        Query { message: String } =>
            "record store query failed: {message}",
        /// The response could not be decoded into domain records.
        Decode { message: String } =>
            "record store payload could not be decoded: {message}",
        /// A write conflicted with existing data.
        Conflict { message: String } =>
            "record store rejected a conflicting write: {message}",
    }
}

/// Remote collections reachable through the record-store ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Structures,
    #[serde(rename = "jeunes")]
    Minors,
    Notes,
    Transcriptions,
    #[serde(rename = "evenements")]
    Events,
    #[serde(rename = "educateurs")]
    Staff,
}

impl Collection {
    /// Remote table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Structures => "structures",
            Self::Minors => "jeunes",
            Self::Notes => "notes",
            Self::Transcriptions => "transcriptions",
            Self::Events => "evenements",
            Self::Staff => "educateurs",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Parameter object bundling every record-store port.
#[derive(Clone)]
pub struct RecordPorts {
    pub structures: Arc<dyn StructureRepository>,
    pub staff: Arc<dyn StaffRepository>,
    pub minors: Arc<dyn MinorRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub transcriptions: Arc<dyn TranscriptionRepository>,
    pub events: Arc<dyn EventRepository>,
}
