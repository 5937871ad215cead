//! Row shapes of the hosted tables.
//!
//! Column names are the remote (French) ones. Rows decode first, then map
//! into domain records in one pass; mapping failures become decode errors.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CaseCategory, Event, EventId, EventKind, MinorId, MinorRecord, Note, NoteId,
    PendingTranscription, PersonName, ScheduledEvent, StaffId, StaffMember, StaffMode, StaffRole,
    Structure, StructureId, StructureType, Transcription, TranscriptionId,
};

/// Columns embedded by `jeunes(prenom,nom)`.
#[derive(Debug, Clone, Deserialize)]
pub struct MinorNameRow {
    pub prenom: String,
    pub nom: String,
}

impl From<MinorNameRow> for PersonName {
    fn from(row: MinorNameRow) -> Self {
        Self::new(row.prenom, row.nom)
    }
}

fn joined_name(
    row: Option<MinorNameRow>,
    owner: &dyn std::fmt::Display,
) -> Result<PersonName, String> {
    row.map(PersonName::from)
        .ok_or_else(|| format!("{owner} is missing its joined minor"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRow {
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

impl From<StructureRow> for Structure {
    fn from(row: StructureRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            structure_type: row.structure_type,
            city: row.city,
            logo_url: row.logo_url,
            max_users: row.max_users,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

impl From<&Structure> for StructureRow {
    fn from(structure: &Structure) -> Self {
        Self {
            id: structure.id,
            name: structure.name.clone(),
            structure_type: structure.structure_type,
            city: structure.city.clone(),
            logo_url: structure.logo_url.clone(),
            max_users: structure.max_users,
            email: structure.email.clone(),
            created_at: structure.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRow {
    pub id: StaffId,
    pub email: String,
    pub prenom: String,
    pub nom: String,
    pub structure_id: StructureId,
    pub role: StaffRole,
    #[serde(default)]
    pub mode: Option<StaffMode>,
    pub created_at: DateTime<Utc>,
}

impl From<StaffRow> for StaffMember {
    fn from(row: StaffRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.prenom,
            last_name: row.nom,
            structure_id: row.structure_id,
            role: row.role,
            mode: row.mode,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinorRow {
    pub id: MinorId,
    pub prenom: String,
    pub nom: String,
    pub date_naissance: NaiveDate,
    pub structure_id: StructureId,
    #[serde(default)]
    pub dossier_complet: bool,
    #[serde(default)]
    pub dossiers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl MinorRow {
    pub fn into_domain(self) -> Result<MinorRecord, String> {
        let categories = self
            .dossiers
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| CaseCategory::parse(raw).map_err(|error| error.message))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MinorRecord {
            id: self.id,
            first_name: self.prenom,
            last_name: self.nom,
            birth_date: self.date_naissance,
            structure_id: self.structure_id,
            case_complete: self.dossier_complet,
            categories,
            created_at: self.created_at,
        })
    }
}

impl From<&MinorRecord> for MinorRow {
    fn from(minor: &MinorRecord) -> Self {
        Self {
            id: minor.id,
            prenom: minor.first_name.clone(),
            nom: minor.last_name.clone(),
            date_naissance: minor.birth_date,
            structure_id: minor.structure_id,
            dossier_complet: minor.case_complete,
            dossiers: minor
                .categories
                .iter()
                .map(|category| category.as_str().to_owned())
                .collect(),
            created_at: minor.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRow {
    pub id: NoteId,
    pub titre: String,
    pub contenu: String,
    pub date_creation: DateTime<Utc>,
    pub jeune_id: MinorId,
    pub educateur_id: StaffId,
    pub structure_id: StructureId,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.titre,
            body: row.contenu,
            created_at: row.date_creation,
            minor_id: row.jeune_id,
            author_id: row.educateur_id,
            structure_id: row.structure_id,
        }
    }
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            titre: note.title.clone(),
            contenu: note.body.clone(),
            date_creation: note.created_at,
            jeune_id: note.minor_id,
            educateur_id: note.author_id,
            structure_id: note.structure_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionRow {
    pub id: TranscriptionId,
    pub contenu: String,
    pub date_entretien: DateTime<Utc>,
    #[serde(default)]
    pub validee: bool,
    pub jeune_id: MinorId,
    pub educateur_id: StaffId,
    pub structure_id: StructureId,
    #[serde(default, skip_serializing)]
    pub jeunes: Option<MinorNameRow>,
}

impl TranscriptionRow {
    fn split(self) -> (Transcription, Option<MinorNameRow>) {
        let transcription = Transcription {
            id: self.id,
            body: self.contenu,
            interviewed_at: self.date_entretien,
            validated: self.validee,
            minor_id: self.jeune_id,
            author_id: self.educateur_id,
            structure_id: self.structure_id,
        };
        (transcription, self.jeunes)
    }

    pub fn into_domain(self) -> Transcription {
        self.split().0
    }

    pub fn into_pending(self) -> Result<PendingTranscription, String> {
        let (transcription, minor) = self.split();
        let minor = joined_name(minor, &format!("transcription {}", transcription.id))?;
        Ok(PendingTranscription { transcription, minor })
    }
}

impl From<&Transcription> for TranscriptionRow {
    fn from(transcription: &Transcription) -> Self {
        Self {
            id: transcription.id,
            contenu: transcription.body.clone(),
            date_entretien: transcription.interviewed_at,
            validee: transcription.validated,
            jeune_id: transcription.minor_id,
            educateur_id: transcription.author_id,
            structure_id: transcription.structure_id,
            jeunes: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    pub id: EventId,
    pub titre: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub jeune_id: MinorId,
    pub structure_id: StructureId,
    #[serde(default)]
    pub jeunes: Option<MinorNameRow>,
}

impl EventRow {
    fn split(self) -> (Event, Option<MinorNameRow>) {
        let event = Event {
            id: self.id,
            title: self.titre,
            description: self.description.unwrap_or_default(),
            at: self.date,
            kind: self.kind,
            minor_id: self.jeune_id,
            structure_id: self.structure_id,
        };
        (event, self.jeunes)
    }

    pub fn into_domain(self) -> Event {
        self.split().0
    }

    pub fn into_scheduled(self) -> Result<ScheduledEvent, String> {
        let (event, minor) = self.split();
        let minor = joined_name(minor, &format!("event {}", event.id))?;
        Ok(ScheduledEvent { event, minor })
    }
}
