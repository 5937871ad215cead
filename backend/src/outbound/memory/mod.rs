//! In-process adapter implementing every driven port.
//!
//! Used for demo mode when no hosted backend is configured, and by the
//! behaviour tests. Failures can be injected per collection to exercise the
//! fail-fast paths.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{
    Collection, EventRepository, IdentityProvider, IdentityProviderError, LogoStorage,
    LogoStorageError, MinorQuery, MinorRepository, NoteRepository, RecordPorts, RecordStoreError,
    SignUpRequest, StaffMetadataUpdate, StaffRepository, StructureRepository,
    TranscriptionRepository,
};
use crate::domain::{
    DateWindow, Event, EventKind, MinorId, MinorRecord, Note, PendingTranscription, PersonName,
    ScheduledEvent, ScopeFilter, StaffId, StaffMember, StaffMode, StaffRole, Structure,
    StructureId, Transcription, TranscriptionId,
};

#[derive(Debug, Clone)]
struct Account {
    id: StaffId,
    password: String,
}

#[derive(Default)]
struct State {
    structures: Vec<Structure>,
    staff: Vec<StaffMember>,
    minors: Vec<MinorRecord>,
    notes: Vec<Note>,
    transcriptions: Vec<Transcription>,
    events: Vec<Event>,
    accounts: HashMap<String, Account>,
    logos: HashMap<String, Vec<u8>>,
    failures: HashMap<Collection, RecordStoreError>,
}

impl State {
    fn check(&self, collection: Collection) -> Result<(), RecordStoreError> {
        self.failures
            .get(&collection)
            .map_or(Ok(()), |failure| Err(failure.clone()))
    }

    fn minor_name(&self, id: &MinorId) -> Result<PersonName, RecordStoreError> {
        self.minors
            .iter()
            .find(|minor| minor.id == *id)
            .map(MinorRecord::name)
            .ok_or_else(|| RecordStoreError::decode(format!("minor {id} is missing")))
    }
}

/// Shared in-memory record store.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

fn as_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

impl InMemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every record-store port backed by this store.
    pub fn record_ports(&self) -> RecordPorts {
        RecordPorts {
            structures: Arc::new(self.clone()),
            staff: Arc::new(self.clone()),
            minors: Arc::new(self.clone()),
            notes: Arc::new(self.clone()),
            transcriptions: Arc::new(self.clone()),
            events: Arc::new(self.clone()),
        }
    }

    /// Make every call against `collection` fail with `error`.
    pub fn fail(&self, collection: Collection, error: RecordStoreError) {
        self.state().failures.insert(collection, error);
    }

    pub fn heal(&self, collection: Collection) {
        self.state().failures.remove(&collection);
    }

    /// Register a staff member together with a login account.
    pub fn seed_account(&self, member: StaffMember, password: &str) {
        let mut state = self.state();
        state.accounts.insert(
            member.email.to_lowercase(),
            Account {
                id: member.id,
                password: password.to_owned(),
            },
        );
        state.staff.retain(|existing| existing.id != member.id);
        state.staff.push(member);
    }

    /// Events have no write port; seed them directly.
    pub fn add_event(&self, event: Event) {
        self.state().events.push(event);
    }

    pub fn stored_logo(&self, object_path: &str) -> Option<Vec<u8>> {
        self.state().logos.get(object_path).cloned()
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

#[async_trait]
impl StructureRepository for InMemoryStore {
    async fn find(&self, id: &StructureId) -> Result<Option<Structure>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Structures)?;
        Ok(state.structures.iter().find(|s| s.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Structure>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Structures)?;
        let mut structures = state.structures.clone();
        structures.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(structures)
    }

    async fn count(&self) -> Result<u64, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Structures)?;
        Ok(as_count(state.structures.len()))
    }

    async fn insert(&self, structure: &Structure) -> Result<(), RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Structures)?;
        if state.structures.iter().any(|s| s.id == structure.id) {
            return Err(RecordStoreError::conflict(format!("structure {} exists", structure.id)));
        }
        state.structures.push(structure.clone());
        Ok(())
    }
}

#[async_trait]
impl StaffRepository for InMemoryStore {
    async fn list(&self, scope: &ScopeFilter) -> Result<Vec<StaffMember>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Staff)?;
        let mut members: Vec<_> = state
            .staff
            .iter()
            .filter(|m| scope.permits(&m.structure_id))
            .cloned()
            .collect();
        members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(members)
    }

    async fn find(&self, id: &StaffId) -> Result<Option<StaffMember>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Staff)?;
        Ok(state.staff.iter().find(|m| m.id == *id).cloned())
    }

    async fn count_in_structure(&self, structure: &StructureId) -> Result<u64, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Staff)?;
        Ok(as_count(
            state.staff.iter().filter(|m| m.structure_id == *structure).count(),
        ))
    }

    async fn update_role(&self, id: &StaffId, role: StaffRole) -> Result<bool, RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Staff)?;
        Ok(state
            .staff
            .iter_mut()
            .find(|m| m.id == *id)
            .map(|m| m.role = role)
            .is_some())
    }

    async fn update_mode(&self, id: &StaffId, mode: StaffMode) -> Result<bool, RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Staff)?;
        Ok(state
            .staff
            .iter_mut()
            .find(|m| m.id == *id)
            .map(|m| m.mode = Some(mode))
            .is_some())
    }
}

#[async_trait]
impl MinorRepository for InMemoryStore {
    async fn list(
        &self,
        scope: &ScopeFilter,
        query: MinorQuery,
    ) -> Result<Vec<MinorRecord>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Minors)?;
        let mut minors: Vec<_> = state
            .minors
            .iter()
            .filter(|m| scope.permits(&m.structure_id))
            .filter(|m| query.case_complete.is_none_or(|complete| m.case_complete == complete))
            .cloned()
            .collect();
        minors.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        Ok(minors)
    }

    async fn count(&self, scope: &ScopeFilter) -> Result<u64, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Minors)?;
        Ok(as_count(
            state.minors.iter().filter(|m| scope.permits(&m.structure_id)).count(),
        ))
    }

    async fn find(&self, id: &MinorId) -> Result<Option<MinorRecord>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Minors)?;
        Ok(state.minors.iter().find(|m| m.id == *id).cloned())
    }

    async fn insert(&self, minor: &MinorRecord) -> Result<(), RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Minors)?;
        state.minors.push(minor.clone());
        Ok(())
    }

    async fn mark_case_complete(&self, id: &MinorId) -> Result<bool, RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Minors)?;
        Ok(state
            .minors
            .iter_mut()
            .find(|m| m.id == *id)
            .map(|m| m.case_complete = true)
            .is_some())
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn count_since(
        &self,
        scope: &ScopeFilter,
        since: DateTime<Utc>,
    ) -> Result<u64, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Notes)?;
        Ok(as_count(
            state
                .notes
                .iter()
                .filter(|n| scope.permits(&n.structure_id) && n.created_at >= since)
                .count(),
        ))
    }

    async fn count_for_minor_since(
        &self,
        minor: &MinorId,
        since: DateTime<Utc>,
    ) -> Result<u64, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Notes)?;
        Ok(as_count(
            state
                .notes
                .iter()
                .filter(|n| n.minor_id == *minor && n.created_at >= since)
                .count(),
        ))
    }

    async fn list_for_minor(&self, minor: &MinorId) -> Result<Vec<Note>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Notes)?;
        let mut notes: Vec<_> = state
            .notes
            .iter()
            .filter(|n| n.minor_id == *minor)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn insert(&self, note: &Note) -> Result<(), RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Notes)?;
        state.notes.push(note.clone());
        Ok(())
    }
}

#[async_trait]
impl TranscriptionRepository for InMemoryStore {
    async fn list_pending(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<PendingTranscription>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Transcriptions)?;
        let mut pending = state
            .transcriptions
            .iter()
            .filter(|t| !t.validated && scope.permits(&t.structure_id))
            .map(|t| {
                Ok(PendingTranscription {
                    transcription: t.clone(),
                    minor: state.minor_name(&t.minor_id)?,
                })
            })
            .collect::<Result<Vec<_>, RecordStoreError>>()?;
        pending.sort_by_key(|p| p.transcription.interviewed_at);
        Ok(pending)
    }

    async fn list_for_minor(
        &self,
        minor: &MinorId,
    ) -> Result<Vec<Transcription>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Transcriptions)?;
        let mut items: Vec<_> = state
            .transcriptions
            .iter()
            .filter(|t| t.minor_id == *minor)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.interviewed_at.cmp(&a.interviewed_at));
        Ok(items)
    }

    async fn insert(&self, transcription: &Transcription) -> Result<(), RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Transcriptions)?;
        state.transcriptions.push(transcription.clone());
        Ok(())
    }

    async fn mark_validated(
        &self,
        minor: &MinorId,
        id: &TranscriptionId,
    ) -> Result<bool, RecordStoreError> {
        let mut state = self.state();
        state.check(Collection::Transcriptions)?;
        Ok(state
            .transcriptions
            .iter_mut()
            .find(|t| t.id == *id && t.minor_id == *minor)
            .map(|t| t.validated = true)
            .is_some())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn list_between(
        &self,
        scope: &ScopeFilter,
        window: DateWindow,
        kind: Option<EventKind>,
    ) -> Result<Vec<ScheduledEvent>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Events)?;
        let mut events = state
            .events
            .iter()
            .filter(|e| scope.permits(&e.structure_id) && window.contains(e.at))
            .filter(|e| kind.is_none_or(|wanted| e.kind == wanted))
            .map(|e| {
                Ok(ScheduledEvent {
                    event: e.clone(),
                    minor: state.minor_name(&e.minor_id)?,
                })
            })
            .collect::<Result<Vec<_>, RecordStoreError>>()?;
        events.sort_by_key(|s| s.event.at);
        Ok(events)
    }

    async fn list_for_minor(&self, minor: &MinorId) -> Result<Vec<Event>, RecordStoreError> {
        let state = self.state();
        state.check(Collection::Events)?;
        let mut events: Vec<_> = state
            .events
            .iter()
            .filter(|e| e.minor_id == *minor)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.at);
        Ok(events)
    }
}

#[async_trait]
impl LogoStorage for InMemoryStore {
    async fn upload(
        &self,
        object_path: &str,
        _content_type: &str,
        bytes: &[u8],
    ) -> Result<String, LogoStorageError> {
        self.state().logos.insert(object_path.to_owned(), bytes.to_vec());
        Ok(format!("memory://{object_path}"))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryStore {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<StaffId, IdentityProviderError> {
        let created_at = self.now();
        let mut state = self.state();
        let email = request.email.to_lowercase();
        if state.accounts.contains_key(&email) {
            return Err(IdentityProviderError::already_registered(email));
        }
        let id = StaffId::random();
        state.accounts.insert(
            email.clone(),
            Account {
                id,
                password: request.password.clone(),
            },
        );
        state.staff.push(StaffMember {
            id,
            email,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            structure_id: request.structure_id,
            role: request.role,
            mode: None,
            created_at,
        });
        Ok(id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<StaffId, IdentityProviderError> {
        self.state()
            .accounts
            .get(&email.to_lowercase())
            .filter(|account| account.password == password)
            .map(|account| account.id)
            .ok_or_else(IdentityProviderError::invalid_credentials)
    }

    async fn update_metadata(
        &self,
        id: &StaffId,
        _update: StaffMetadataUpdate,
    ) -> Result<(), IdentityProviderError> {
        if self.state().accounts.values().any(|account| account.id == *id) {
            Ok(())
        } else {
            Err(IdentityProviderError::rejected(format!("no account for {id}")))
        }
    }

    async fn delete_user(&self, id: &StaffId) -> Result<(), IdentityProviderError> {
        let mut state = self.state();
        state.accounts.retain(|_, account| account.id != *id);
        state.staff.retain(|member| member.id != *id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
