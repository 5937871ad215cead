//! Driving port for minors' case files.

use async_trait::async_trait;

use crate::domain::{
    Error, Event, MinorForm, MinorId, MinorListFilter, MinorRecord, Note, NoteForm, Principal,
    Transcription, TranscriptionForm, TranscriptionId,
};

/// Case-file use-cases. Every call is checked against the caller's scope.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MinorCaseFiles: Send + Sync {
    async fn list_minors(
        &self,
        principal: &Principal,
        filter: MinorListFilter,
    ) -> Result<Vec<MinorRecord>, Error>;

    async fn get_minor(&self, principal: &Principal, minor: &MinorId) -> Result<MinorRecord, Error>;

    async fn create_minor(&self, principal: &Principal, form: MinorForm)
    -> Result<MinorRecord, Error>;

    async fn mark_case_complete(
        &self,
        principal: &Principal,
        minor: &MinorId,
    ) -> Result<MinorRecord, Error>;

    async fn notes(&self, principal: &Principal, minor: &MinorId) -> Result<Vec<Note>, Error>;

    async fn create_note(
        &self,
        principal: &Principal,
        minor: &MinorId,
        form: NoteForm,
    ) -> Result<Note, Error>;

    async fn transcriptions(
        &self,
        principal: &Principal,
        minor: &MinorId,
    ) -> Result<Vec<Transcription>, Error>;

    async fn create_transcription(
        &self,
        principal: &Principal,
        minor: &MinorId,
        form: TranscriptionForm,
    ) -> Result<Transcription, Error>;

    async fn validate_transcription(
        &self,
        principal: &Principal,
        minor: &MinorId,
        transcription: &TranscriptionId,
    ) -> Result<(), Error>;

    async fn events(&self, principal: &Principal, minor: &MinorId) -> Result<Vec<Event>, Error>;
}
