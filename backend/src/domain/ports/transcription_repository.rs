//! Port for the `transcriptions` collection.

use async_trait::async_trait;

use crate::domain::{MinorId, PendingTranscription, ScopeFilter, Transcription, TranscriptionId};

use super::RecordStoreError;

/// Read and write access to interview transcriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptionRepository: Send + Sync {
    /// Unvalidated transcriptions in `scope`, joined with the minor's name.
    async fn list_pending(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<PendingTranscription>, RecordStoreError>;

    /// Transcriptions for `minor`, most recent interview first.
    async fn list_for_minor(&self, minor: &MinorId)
    -> Result<Vec<Transcription>, RecordStoreError>;

    /// Insert a new transcription.
    async fn insert(&self, transcription: &Transcription) -> Result<(), RecordStoreError>;

    /// Validate the transcription `id` belonging to `minor`.
    ///
    /// Returns `false` when no matching record exists.
    async fn mark_validated(
        &self,
        minor: &MinorId,
        id: &TranscriptionId,
    ) -> Result<bool, RecordStoreError>;
}
