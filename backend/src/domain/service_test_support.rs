//! Fixtures shared by the domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use super::ports::{
    MockEventRepository, MockMinorRepository, MockNoteRepository, MockStaffRepository,
    MockStructureRepository, MockTranscriptionRepository, RecordPorts,
};
use super::{
    Event, EventId, EventKind, MinorId, MinorRecord, PersonName, Principal, ScheduledEvent,
    StaffId, StaffMember, StaffRole, Structure, StructureId, StructureType, Transcription,
    TranscriptionId,
};

pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

/// Mock set whose unconfigured methods panic when called.
#[derive(Default)]
pub struct RecordMocks {
    pub structures: MockStructureRepository,
    pub staff: MockStaffRepository,
    pub minors: MockMinorRepository,
    pub notes: MockNoteRepository,
    pub transcriptions: MockTranscriptionRepository,
    pub events: MockEventRepository,
}

impl RecordMocks {
    pub fn into_ports(self) -> RecordPorts {
        RecordPorts {
            structures: Arc::new(self.structures),
            staff: Arc::new(self.staff),
            minors: Arc::new(self.minors),
            notes: Arc::new(self.notes),
            transcriptions: Arc::new(self.transcriptions),
            events: Arc::new(self.events),
        }
    }
}

pub fn structure(id: StructureId, name: &str) -> Structure {
    Structure {
        id,
        name: name.to_owned(),
        structure_type: StructureType::Mecs,
        city: "Lyon".to_owned(),
        logo_url: None,
        max_users: 10,
        email: "contact@mecs.fr".to_owned(),
        created_at: fixture_now() - Duration::days(90),
    }
}

pub fn principal(role: StaffRole, structure_id: StructureId) -> Principal {
    Principal {
        id: StaffId::random(),
        email: "camille@mecs.fr".to_owned(),
        display_name: "Camille Martin".to_owned(),
        role,
        structure_id,
    }
}

pub fn staff_member(role: StaffRole, structure_id: StructureId) -> StaffMember {
    StaffMember {
        id: StaffId::random(),
        email: "sam@mecs.fr".to_owned(),
        first_name: "Sam".to_owned(),
        last_name: "Bernard".to_owned(),
        structure_id,
        role,
        mode: None,
        created_at: fixture_now() - Duration::days(10),
    }
}

pub fn minor(structure_id: StructureId, first: &str, last: &str, complete: bool) -> MinorRecord {
    MinorRecord {
        id: MinorId::random(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        birth_date: NaiveDate::from_ymd_opt(2009, 6, 1).expect("valid date"),
        structure_id,
        case_complete: complete,
        categories: Vec::new(),
        created_at: fixture_now() - Duration::days(30),
    }
}

pub fn transcription(minor: &MinorRecord, interviewed_at: DateTime<Utc>) -> Transcription {
    Transcription {
        id: TranscriptionId::random(),
        body: "Entretien".to_owned(),
        interviewed_at,
        validated: false,
        minor_id: minor.id,
        author_id: StaffId::random(),
        structure_id: minor.structure_id,
    }
}

pub fn scheduled(minor: &MinorRecord, kind: EventKind, at: DateTime<Utc>) -> ScheduledEvent {
    ScheduledEvent {
        event: Event {
            id: EventId::random(),
            title: "Audience".to_owned(),
            description: String::new(),
            at,
            kind,
            minor_id: minor.id,
            structure_id: minor.structure_id,
        },
        minor: PersonName::new(&minor.first_name, &minor.last_name),
    }
}
