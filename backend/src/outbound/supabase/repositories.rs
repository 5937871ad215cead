//! PostgREST-backed record-store adapters.
//!
//! One [`SupabaseRecordStore`] implements every record-store port. Scope
//! restrictions become `structure_id=eq.` filters and counts use
//! `Prefer: count=exact` HEAD requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::client::{HttpFailure, RawResponse, SupabaseClient, execute};
use super::dto::{EventRow, MinorRow, NoteRow, StaffRow, StructureRow, TranscriptionRow};
use super::rest::{RestQuery, content_range_total};
use crate::domain::ports::{
    Collection, EventRepository, MinorQuery, MinorRepository, NoteRepository, RecordStoreError,
    StaffRepository, StructureRepository, TranscriptionRepository,
};
use crate::domain::{
    DateWindow, Event, EventKind, MinorId, MinorRecord, Note, PendingTranscription, ScheduledEvent,
    ScopeFilter, StaffId, StaffMember, StaffMode, StaffRole, Structure, StructureId, Transcription,
    TranscriptionId,
};

const WITH_MINOR_NAME: &str = "*,jeunes(prenom,nom)";

fn map_http_error(collection: Collection, failure: HttpFailure) -> RecordStoreError {
    let message = format!("{collection}: {}", failure.message());
    if failure.is_unavailable() {
        return RecordStoreError::connection(message);
    }
    match failure {
        HttpFailure::Status {
            status: StatusCode::CONFLICT,
            ..
        } => RecordStoreError::conflict(message),
        _ => RecordStoreError::query(message),
    }
}

fn decode_error(collection: Collection) -> impl FnOnce(String) -> RecordStoreError {
    move |message| RecordStoreError::decode(format!("{collection}: {message}"))
}

/// Record store adapter over the hosted REST API.
#[derive(Clone)]
pub struct SupabaseRecordStore {
    client: SupabaseClient,
}

impl SupabaseRecordStore {
    pub const fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        method: Method,
        query: &RestQuery,
        prefer: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, RecordStoreError> {
        let collection = query.collection();
        let url = self
            .client
            .endpoint(&query.path())
            .map_err(|failure| map_http_error(collection, failure))?;
        let mut builder = self
            .client
            .request(method, url)
            .query(query.params())
            .header("Prefer", prefer);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        execute(builder)
            .await
            .map_err(|failure| map_http_error(collection, failure))
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        query: &RestQuery,
    ) -> Result<Vec<R>, RecordStoreError> {
        let raw = self.send(Method::GET, query, "return=representation", None).await?;
        serde_json::from_slice(&raw.body)
            .map_err(|error| decode_error(query.collection())(error.to_string()))
    }

    async fn fetch_one<R: DeserializeOwned>(
        &self,
        query: RestQuery,
    ) -> Result<Option<R>, RecordStoreError> {
        let rows = self.fetch::<R>(&query).await?;
        Ok(rows.into_iter().next())
    }

    async fn exact_count(&self, query: &RestQuery) -> Result<u64, RecordStoreError> {
        let raw = self.send(Method::HEAD, query, "count=exact", None).await?;
        content_range_total(&raw.headers)
            .ok_or_else(|| decode_error(query.collection())("missing exact count".to_owned()))
    }

    async fn insert_row<T: Serialize + Sync>(
        &self,
        collection: Collection,
        row: &T,
    ) -> Result<(), RecordStoreError> {
        let body = serde_json::to_value(row)
            .map_err(|error| RecordStoreError::query(format!("{collection}: {error}")))?;
        self.send(Method::POST, &RestQuery::from(collection), "return=minimal", Some(body))
            .await?;
        Ok(())
    }

    /// Patch matching rows; `true` when at least one row changed.
    async fn patch(&self, query: RestQuery, changes: Value) -> Result<bool, RecordStoreError> {
        let query = query.select("id");
        let raw = self
            .send(Method::PATCH, &query, "return=representation", Some(changes))
            .await?;
        let rows: Vec<Value> = serde_json::from_slice(&raw.body)
            .map_err(|error| decode_error(query.collection())(error.to_string()))?;
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl StructureRepository for SupabaseRecordStore {
    async fn find(&self, id: &StructureId) -> Result<Option<Structure>, RecordStoreError> {
        let query = RestQuery::from(Collection::Structures).select("*").eq("id", id);
        let row = self.fetch_one::<StructureRow>(query).await?;
        Ok(row.map(Structure::from))
    }

    async fn list(&self) -> Result<Vec<Structure>, RecordStoreError> {
        let query = RestQuery::from(Collection::Structures)
            .select("*")
            .order("name", true);
        let rows = self.fetch::<StructureRow>(&query).await?;
        Ok(rows.into_iter().map(Structure::from).collect())
    }

    async fn count(&self) -> Result<u64, RecordStoreError> {
        self.exact_count(&RestQuery::from(Collection::Structures).select("id")).await
    }

    async fn insert(&self, structure: &Structure) -> Result<(), RecordStoreError> {
        self.insert_row(Collection::Structures, &StructureRow::from(structure))
            .await
    }
}

#[async_trait]
impl StaffRepository for SupabaseRecordStore {
    async fn list(&self, scope: &ScopeFilter) -> Result<Vec<StaffMember>, RecordStoreError> {
        let rows = self
            .fetch::<StaffRow>(
                &RestQuery::from(Collection::Staff)
                    .select("*")
                    .scoped(scope)
                    .order("created_at", false),
            )
            .await?;
        Ok(rows.into_iter().map(StaffMember::from).collect())
    }

    async fn find(&self, id: &StaffId) -> Result<Option<StaffMember>, RecordStoreError> {
        let row = self
            .fetch_one::<StaffRow>(RestQuery::from(Collection::Staff).select("*").eq("id", id))
            .await?;
        Ok(row.map(StaffMember::from))
    }

    async fn count_in_structure(&self, structure: &StructureId) -> Result<u64, RecordStoreError> {
        self.exact_count(
            &RestQuery::from(Collection::Staff)
                .select("id")
                .eq("structure_id", structure),
        )
        .await
    }

    async fn update_role(&self, id: &StaffId, role: StaffRole) -> Result<bool, RecordStoreError> {
        self.patch(
            RestQuery::from(Collection::Staff).eq("id", id),
            json!({ "role": role.as_str() }),
        )
        .await
    }

    async fn update_mode(&self, id: &StaffId, mode: StaffMode) -> Result<bool, RecordStoreError> {
        self.patch(
            RestQuery::from(Collection::Staff).eq("id", id),
            json!({ "mode": mode.as_str() }),
        )
        .await
    }
}

#[async_trait]
impl MinorRepository for SupabaseRecordStore {
    async fn list(
        &self,
        scope: &ScopeFilter,
        query: MinorQuery,
    ) -> Result<Vec<MinorRecord>, RecordStoreError> {
        let mut rest = RestQuery::from(Collection::Minors).select("*").scoped(scope);
        if let Some(complete) = query.case_complete {
            rest = rest.eq("dossier_complet", complete);
        }
        let rows = self.fetch::<MinorRow>(&rest.order("nom", true)).await?;
        rows.into_iter()
            .map(MinorRow::into_domain)
            .collect::<Result<_, _>>()
            .map_err(decode_error(Collection::Minors))
    }

    async fn count(&self, scope: &ScopeFilter) -> Result<u64, RecordStoreError> {
        self.exact_count(&RestQuery::from(Collection::Minors).select("id").scoped(scope)).await
    }

    async fn find(&self, id: &MinorId) -> Result<Option<MinorRecord>, RecordStoreError> {
        self.fetch_one::<MinorRow>(RestQuery::from(Collection::Minors).select("*").eq("id", id))
            .await?
            .map(MinorRow::into_domain)
            .transpose()
            .map_err(decode_error(Collection::Minors))
    }

    async fn insert(&self, minor: &MinorRecord) -> Result<(), RecordStoreError> {
        self.insert_row(Collection::Minors, &MinorRow::from(minor)).await
    }

    async fn mark_case_complete(&self, id: &MinorId) -> Result<bool, RecordStoreError> {
        self.patch(
            RestQuery::from(Collection::Minors).eq("id", id),
            json!({ "dossier_complet": true }),
        )
        .await
    }
}

#[async_trait]
impl NoteRepository for SupabaseRecordStore {
    async fn count_since(
        &self,
        scope: &ScopeFilter,
        since: DateTime<Utc>,
    ) -> Result<u64, RecordStoreError> {
        self.exact_count(
            &RestQuery::from(Collection::Notes)
                .select("id")
                .scoped(scope)
                .gte("date_creation", since),
        )
        .await
    }

    async fn count_for_minor_since(
        &self,
        minor: &MinorId,
        since: DateTime<Utc>,
    ) -> Result<u64, RecordStoreError> {
        self.exact_count(
            &RestQuery::from(Collection::Notes)
                .select("id")
                .eq("jeune_id", minor)
                .gte("date_creation", since),
        )
        .await
    }

    async fn list_for_minor(&self, minor: &MinorId) -> Result<Vec<Note>, RecordStoreError> {
        let rows = self
            .fetch::<NoteRow>(
                &RestQuery::from(Collection::Notes)
                    .select("*")
                    .eq("jeune_id", minor)
                    .order("date_creation", false),
            )
            .await?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn insert(&self, note: &Note) -> Result<(), RecordStoreError> {
        self.insert_row(Collection::Notes, &NoteRow::from(note)).await
    }
}

#[async_trait]
impl TranscriptionRepository for SupabaseRecordStore {
    async fn list_pending(
        &self,
        scope: &ScopeFilter,
    ) -> Result<Vec<PendingTranscription>, RecordStoreError> {
        let rows = self
            .fetch::<TranscriptionRow>(
                &RestQuery::from(Collection::Transcriptions)
                    .select(WITH_MINOR_NAME)
                    .scoped(scope)
                    .eq("validee", false)
                    .order("date_entretien", true),
            )
            .await?;
        rows.into_iter()
            .map(TranscriptionRow::into_pending)
            .collect::<Result<_, _>>()
            .map_err(decode_error(Collection::Transcriptions))
    }

    async fn list_for_minor(
        &self,
        minor: &MinorId,
    ) -> Result<Vec<Transcription>, RecordStoreError> {
        let rows = self
            .fetch::<TranscriptionRow>(
                &RestQuery::from(Collection::Transcriptions)
                    .select("*")
                    .eq("jeune_id", minor)
                    .order("date_entretien", false),
            )
            .await?;
        Ok(rows.into_iter().map(TranscriptionRow::into_domain).collect())
    }

    async fn insert(&self, transcription: &Transcription) -> Result<(), RecordStoreError> {
        self.insert_row(Collection::Transcriptions, &TranscriptionRow::from(transcription))
            .await
    }

    async fn mark_validated(
        &self,
        minor: &MinorId,
        id: &TranscriptionId,
    ) -> Result<bool, RecordStoreError> {
        self.patch(
            RestQuery::from(Collection::Transcriptions)
                .eq("id", id)
                .eq("jeune_id", minor),
            json!({ "validee": true }),
        )
        .await
    }
}

#[async_trait]
impl EventRepository for SupabaseRecordStore {
    async fn list_between(
        &self,
        scope: &ScopeFilter,
        window: DateWindow,
        kind: Option<EventKind>,
    ) -> Result<Vec<ScheduledEvent>, RecordStoreError> {
        let mut rest = RestQuery::from(Collection::Events)
            .select(WITH_MINOR_NAME)
            .scoped(scope)
            .gte("date", window.from)
            .lte("date", window.to);
        if let Some(kind) = kind {
            rest = rest.eq("type", kind.as_str());
        }
        let rows = self.fetch::<EventRow>(&rest.order("date", true)).await?;
        rows.into_iter()
            .map(EventRow::into_scheduled)
            .collect::<Result<_, _>>()
            .map_err(decode_error(Collection::Events))
    }

    async fn list_for_minor(&self, minor: &MinorId) -> Result<Vec<Event>, RecordStoreError> {
        let rows = self
            .fetch::<EventRow>(
                &RestQuery::from(Collection::Events)
                    .select("*")
                    .eq("jeune_id", minor)
                    .order("date", true),
            )
            .await?;
        Ok(rows.into_iter().map(EventRow::into_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.
    use rstest::rstest;

    use super::*;
    use crate::outbound::supabase::client::map_status_error;

    #[rstest]
    #[case(StatusCode::SERVICE_UNAVAILABLE, "Connection")]
    #[case(StatusCode::CONFLICT, "Conflict")]
    #[case(StatusCode::BAD_REQUEST, "Query")]
    fn statuses_map_to_record_store_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_http_error(Collection::Notes, map_status_error(status, b"{}"));
        let matched = match expected {
            "Connection" => matches!(error, RecordStoreError::Connection { .. }),
            "Conflict" => matches!(error, RecordStoreError::Conflict { .. }),
            "Query" => matches!(error, RecordStoreError::Query { .. }),
            _ => panic!("unsupported expectation: {expected}"),
        };
        assert!(matched, "{status} should map to {expected}, got {error:?}");
    }

    #[test]
    fn transport_failures_are_connection_errors() {
        let failure = HttpFailure::Transport {
            message: "connection refused".to_owned(),
            timed_out: false,
        };
        let error = map_http_error(Collection::Minors, failure);
        assert_eq!(error, RecordStoreError::connection("jeunes: connection refused"));
    }
}
