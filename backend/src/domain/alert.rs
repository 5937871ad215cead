//! Derived dashboard alerts and statistics. Never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Event, MinorId, MinorRecord, PersonName, StructureId, Transcription};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Category of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// An interview transcription awaits validation.
    #[serde(rename = "transcription")]
    TranscriptionPending,
    /// A minor's case file is flagged incomplete.
    #[serde(rename = "dossier")]
    CaseIncomplete,
    /// A deadline is close and no recent note exists.
    #[serde(rename = "note")]
    NoteDue,
}

impl AlertKind {
    /// Prefix of the synthetic alert identifier.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::TranscriptionPending => "transcription",
            Self::CaseIncomplete => "dossier",
            Self::NoteDue => "note",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::TranscriptionPending => "Transcription à valider",
            Self::CaseIncomplete => "Dossier incomplet",
            Self::NoteDue => "Note à générer",
        }
    }
}

/// Navigation target inside the console.
///
/// # Examples
/// ```
/// use gensys_console::domain::{AlertLink, MinorId};
///
/// let minor = MinorId::random();
/// assert_eq!(
///     AlertLink::minor(&minor).as_str(),
///     format!("/mes-jeunes/{minor}")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertLink(String);

impl AlertLink {
    /// `/mes-jeunes/{minor}`
    #[must_use]
    pub fn minor(minor: &MinorId) -> Self {
        Self(format!("/mes-jeunes/{minor}"))
    }

    /// `/mes-jeunes/{minor}/transcriptions/{transcription}`
    #[must_use]
    pub fn transcription(transcription: &Transcription) -> Self {
        Self(format!(
            "/mes-jeunes/{}/transcriptions/{}",
            transcription.minor_id, transcription.id
        ))
    }

    /// `/mes-jeunes/{minor}/notes/nouvelle`
    #[must_use]
    pub fn new_note(minor: &MinorId) -> Self {
        Self(format!("/mes-jeunes/{minor}/notes/nouvelle"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A derived notice prompting staff action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: AlertKind,
    pub at: DateTime<Utc>,
    pub link: AlertLink,
    pub minor_id: MinorId,
    pub structure_id: StructureId,
}

impl Alert {
    /// Alert for a transcription awaiting validation.
    #[must_use]
    pub fn transcription_pending(transcription: &Transcription, minor: &PersonName) -> Self {
        let kind = AlertKind::TranscriptionPending;
        Self {
            id: format!("{}-{}", kind.id_prefix(), transcription.id),
            title: kind.title().to_owned(),
            description: format!(
                "Entretien avec {minor} du {}",
                transcription.interviewed_at.format(DATE_FORMAT)
            ),
            kind,
            at: transcription.interviewed_at,
            link: AlertLink::transcription(transcription),
            minor_id: transcription.minor_id,
            structure_id: transcription.structure_id,
        }
    }

    /// Alert for an incomplete case file, stamped with the evaluation time.
    #[must_use]
    pub fn case_incomplete(minor: &MinorRecord, now: DateTime<Utc>) -> Self {
        let kind = AlertKind::CaseIncomplete;
        Self {
            id: format!("{}-{}", kind.id_prefix(), minor.id),
            title: kind.title().to_owned(),
            description: format!("Le dossier de {} est incomplet", minor.name()),
            kind,
            at: now,
            link: AlertLink::minor(&minor.id),
            minor_id: minor.id,
            structure_id: minor.structure_id,
        }
    }

    /// Alert for a deadline with no recent note.
    #[must_use]
    pub fn note_due(event: &Event, minor: &PersonName) -> Self {
        let kind = AlertKind::NoteDue;
        Self {
            id: format!("{}-{}", kind.id_prefix(), event.id),
            title: kind.title().to_owned(),
            description: format!("Échéance le {} pour {minor}", event.at.format(DATE_FORMAT)),
            kind,
            at: event.at,
            link: AlertLink::new_note(&event.minor_id),
            minor_id: event.minor_id,
            structure_id: event.structure_id,
        }
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub minor_count: u64,
    pub note_count: u64,
    pub alert_count: u64,
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
