//! Notes, interview transcriptions and calendar events attached to a minor.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::form_rules::{self, FieldError};
use super::{EventId, MinorId, NoteId, PersonName, StaffId, StructureId, TranscriptionId};

/// Follow-up note written by a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub minor_id: MinorId,
    pub author_id: StaffId,
    pub structure_id: StructureId,
}

/// Interview transcription awaiting or past validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcription {
    pub id: TranscriptionId,
    pub body: String,
    pub interviewed_at: DateTime<Utc>,
    pub validated: bool,
    pub minor_id: MinorId,
    pub author_id: StaffId,
    pub structure_id: StructureId,
}

/// Unvalidated transcription joined with its minor's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranscription {
    pub transcription: Transcription,
    pub minor: PersonName,
}

/// Kind of calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[serde(rename = "rdv")]
    Appointment,
    #[serde(rename = "anniversaire")]
    Birthday,
    /// Deadline that calls for a recent note.
    #[serde(rename = "echeance")]
    Deadline,
    #[serde(rename = "autre")]
    Other,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Appointment => "rdv",
            Self::Birthday => "anniversaire",
            Self::Deadline => "echeance",
            Self::Other => "autre",
        }
    }
}

/// Calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub at: DateTime<Utc>,
    pub kind: EventKind,
    pub minor_id: MinorId,
    pub structure_id: StructureId,
}

/// Event joined with its minor's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    #[serde(flatten)]
    pub event: Event,
    pub minor: PersonName,
}

impl ScheduledEvent {
    /// Exact calendar-day match on the UTC date.
    #[must_use]
    pub fn falls_on(&self, day: NaiveDate) -> bool {
        self.event.at.date_naive() == day
    }
}

/// Inclusive time window used for range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateWindow {
    /// `[now, now + days]`.
    #[must_use]
    pub fn next_days(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            from: now,
            to: now + Duration::days(days),
        }
    }

    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }
}

/// Unvalidated note form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub body: String,
}

impl NoteForm {
    /// Validate and stamp a note for `minor`.
    pub fn into_note(
        self,
        minor_id: MinorId,
        structure_id: StructureId,
        author_id: StaffId,
        created_at: DateTime<Utc>,
    ) -> Result<Note, FieldError> {
        let title = form_rules::min_chars("titre", &self.title, 1)?;
        let body = form_rules::min_chars("contenu", &self.body, 1)?;
        Ok(Note {
            id: NoteId::random(),
            title,
            body,
            created_at,
            minor_id,
            author_id,
            structure_id,
        })
    }
}

/// Unvalidated transcription form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionForm {
    pub body: String,
    pub interviewed_at: DateTime<Utc>,
}

impl TranscriptionForm {
    /// Validate and stamp a transcription; new transcriptions are unvalidated.
    pub fn into_transcription(
        self,
        minor_id: MinorId,
        structure_id: StructureId,
        author_id: StaffId,
    ) -> Result<Transcription, FieldError> {
        let body = form_rules::min_chars("contenu", &self.body, 1)?;
        Ok(Transcription {
            id: TranscriptionId::random(),
            body,
            interviewed_at: self.interviewed_at,
            validated: false,
            minor_id,
            author_id,
            structure_id,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(at(1, 9), true)]
    #[case(at(8, 9), true)]
    #[case(at(8, 10), false)]
    #[case(at(1, 8), false)]
    fn next_days_window_is_inclusive(#[case] candidate: DateTime<Utc>, #[case] inside: bool) {
        let window = DateWindow::next_days(at(1, 9), 7);
        assert_eq!(window.contains(candidate), inside);
    }

    #[rstest]
    fn event_kind_uses_french_wire_names() {
        let json = serde_json::to_string(&EventKind::Deadline).expect("serialise");
        assert_eq!(json, "\"echeance\"");
        assert_eq!(EventKind::Deadline.as_str(), "echeance");
    }

    #[rstest]
    fn notes_require_title_and_body() {
        let err = NoteForm {
            title: "Bilan".to_owned(),
            body: "  ".to_owned(),
        }
        .into_note(
            MinorId::random(),
            StructureId::random(),
            StaffId::random(),
            at(1, 9),
        )
        .expect_err("blank body rejected");
        assert_eq!(err.field, "contenu");
    }

    #[rstest]
    fn new_transcriptions_are_unvalidated() {
        let transcription = TranscriptionForm {
            body: "Entretien mensuel".to_owned(),
            interviewed_at: at(2, 14),
        }
        .into_transcription(MinorId::random(), StructureId::random(), StaffId::random())
        .expect("valid transcription");
        assert!(!transcription.validated);
    }
}
