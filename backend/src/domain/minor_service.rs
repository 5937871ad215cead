//! Minors' case files: listing, creation, notes, transcriptions and events.
//!
//! Every operation on an existing minor first checks the record is visible
//! in the caller's scope. Records outside it are reported as not found.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::form_rules::FieldError;
use super::guards::{record_error, require_role};
use super::ports::{
    Collection, EventRepository, MinorCaseFiles, MinorQuery, MinorRepository, NoteRepository,
    RecordPorts, StructureRepository, TranscriptionRepository,
};
use super::{
    Error, Event, ListFilter, MinorDraft, MinorForm, MinorId, MinorListFilter, MinorRecord, Note,
    NoteForm, Principal, ScopeFilter, StaffRole, StructureId, Transcription, TranscriptionForm,
    TranscriptionId,
};

/// Case-file use-cases.
#[derive(Clone)]
pub struct MinorService {
    structures: Arc<dyn StructureRepository>,
    minors: Arc<dyn MinorRepository>,
    notes: Arc<dyn NoteRepository>,
    transcriptions: Arc<dyn TranscriptionRepository>,
    events: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
}

impl MinorService {
    pub fn new(records: &RecordPorts, clock: Arc<dyn Clock>) -> Self {
        Self {
            structures: Arc::clone(&records.structures),
            minors: Arc::clone(&records.minors),
            notes: Arc::clone(&records.notes),
            transcriptions: Arc::clone(&records.transcriptions),
            events: Arc::clone(&records.events),
            clock,
        }
    }

    async fn visible_minor(
        &self,
        principal: &Principal,
        id: &MinorId,
    ) -> Result<MinorRecord, Error> {
        let found = self
            .minors
            .find(id)
            .await
            .map_err(record_error(Collection::Minors))?;
        match found {
            Some(minor) if ScopeFilter::for_principal(principal).permits(&minor.structure_id) => {
                Ok(minor)
            }
            Some(minor) => {
                info!(
                    staff_id = %principal.id,
                    minor_id = %id,
                    owner = %minor.structure_id,
                    "minor outside caller scope"
                );
                Err(not_found(id))
            }
            None => Err(not_found(id)),
        }
    }

    /// Structure a new minor is written to.
    ///
    /// Non-super-admins always write their own structure. Super-admins must
    /// name an existing one.
    async fn canonical_structure(
        &self,
        principal: &Principal,
        requested: Option<StructureId>,
    ) -> Result<StructureId, Error> {
        if !principal.is_super_admin() {
            return Ok(principal.structure_id);
        }
        let id = requested.ok_or_else(|| {
            FieldError::new("structureId", "required", "structureId must be provided")
        })?;
        let exists = self
            .structures
            .find(&id)
            .await
            .map_err(record_error(Collection::Structures))?
            .is_some();
        if !exists {
            return Err(FieldError::new(
                "structureId",
                "unknown_structure",
                format!("structure {id} does not exist"),
            )
            .into());
        }
        Ok(id)
    }
}

fn not_found(id: &MinorId) -> Error {
    Error::not_found(format!("minor {id} not found"))
}

#[async_trait]
impl MinorCaseFiles for MinorService {
    async fn list_minors(
        &self,
        principal: &Principal,
        filter: MinorListFilter,
    ) -> Result<Vec<MinorRecord>, Error> {
        let minors = self
            .minors
            .list(&ScopeFilter::for_principal(principal), MinorQuery::default())
            .await
            .map_err(record_error(Collection::Minors))?;
        let filter = ListFilter::with_current(MinorListFilter::default(), filter);
        Ok(filter
            .apply(&minors, MinorListFilter::matches)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn get_minor(
        &self,
        principal: &Principal,
        minor: &MinorId,
    ) -> Result<MinorRecord, Error> {
        self.visible_minor(principal, minor).await
    }

    async fn create_minor(
        &self,
        principal: &Principal,
        form: MinorForm,
    ) -> Result<MinorRecord, Error> {
        require_role(principal, StaffRole::Educator, "creating a minor")?;
        let draft = MinorDraft::try_from_form(&form)?;
        let structure_id = self.canonical_structure(principal, form.structure_id).await?;
        let record = draft.into_record(MinorId::random(), structure_id, self.clock.utc());
        self.minors
            .insert(&record)
            .await
            .map_err(record_error(Collection::Minors))?;
        info!(
            minor_id = %record.id,
            structure_id = %structure_id,
            created_by = %principal.id,
            "minor created"
        );
        Ok(record)
    }

    async fn mark_case_complete(
        &self,
        principal: &Principal,
        minor: &MinorId,
    ) -> Result<MinorRecord, Error> {
        require_role(principal, StaffRole::Educator, "completing a case file")?;
        let mut record = self.visible_minor(principal, minor).await?;
        let updated = self
            .minors
            .mark_case_complete(minor)
            .await
            .map_err(record_error(Collection::Minors))?;
        if !updated {
            return Err(not_found(minor));
        }
        record.case_complete = true;
        Ok(record)
    }

    async fn notes(&self, principal: &Principal, minor: &MinorId) -> Result<Vec<Note>, Error> {
        self.visible_minor(principal, minor).await?;
        self.notes
            .list_for_minor(minor)
            .await
            .map_err(record_error(Collection::Notes))
    }

    async fn create_note(
        &self,
        principal: &Principal,
        minor: &MinorId,
        form: NoteForm,
    ) -> Result<Note, Error> {
        require_role(principal, StaffRole::Educator, "writing a note")?;
        let record = self.visible_minor(principal, minor).await?;
        let note = form.into_note(record.id, record.structure_id, principal.id, self.clock.utc())?;
        self.notes
            .insert(&note)
            .await
            .map_err(record_error(Collection::Notes))?;
        Ok(note)
    }

    async fn transcriptions(
        &self,
        principal: &Principal,
        minor: &MinorId,
    ) -> Result<Vec<Transcription>, Error> {
        self.visible_minor(principal, minor).await?;
        self.transcriptions
            .list_for_minor(minor)
            .await
            .map_err(record_error(Collection::Transcriptions))
    }

    async fn create_transcription(
        &self,
        principal: &Principal,
        minor: &MinorId,
        form: TranscriptionForm,
    ) -> Result<Transcription, Error> {
        require_role(principal, StaffRole::Educator, "recording a transcription")?;
        let record = self.visible_minor(principal, minor).await?;
        let transcription = form.into_transcription(record.id, record.structure_id, principal.id)?;
        self.transcriptions
            .insert(&transcription)
            .await
            .map_err(record_error(Collection::Transcriptions))?;
        Ok(transcription)
    }

    async fn validate_transcription(
        &self,
        principal: &Principal,
        minor: &MinorId,
        transcription: &TranscriptionId,
    ) -> Result<(), Error> {
        require_role(principal, StaffRole::Educator, "validating a transcription")?;
        self.visible_minor(principal, minor).await?;
        let updated = self
            .transcriptions
            .mark_validated(minor, transcription)
            .await
            .map_err(record_error(Collection::Transcriptions))?;
        if !updated {
            return Err(Error::not_found(format!(
                "transcription {transcription} not found"
            )));
        }
        info!(
            %transcription,
            minor_id = %minor,
            validated_by = %principal.id,
            "transcription validated"
        );
        Ok(())
    }

    async fn events(&self, principal: &Principal, minor: &MinorId) -> Result<Vec<Event>, Error> {
        self.visible_minor(principal, minor).await?;
        self.events
            .list_for_minor(minor)
            .await
            .map_err(record_error(Collection::Events))
    }
}

#[cfg(test)]
#[path = "minor_service_tests.rs"]
mod tests;
