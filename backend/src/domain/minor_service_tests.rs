//! Regression coverage for this module.

use chrono::{Duration, NaiveDate};
use rstest::rstest;

use super::*;
use crate::domain::service_test_support::{
    RecordMocks, fixture_clock, fixture_now, minor, principal, structure,
};
use crate::domain::ErrorCode;

fn service(mocks: RecordMocks) -> MinorService {
    MinorService::new(&mocks.into_ports(), fixture_clock())
}

fn form(structure_id: Option<StructureId>) -> MinorForm {
    MinorForm {
        first_name: "Lina".to_owned(),
        last_name: "Morel".to_owned(),
        birth_date: NaiveDate::from_ymd_opt(2010, 4, 2),
        structure_id,
        categories: vec!["scolaire".to_owned()],
    }
}

#[tokio::test]
async fn educator_writes_are_pinned_to_their_structure() {
    let home = StructureId::random();
    let mut mocks = RecordMocks::default();
    mocks.structures.expect_find().times(0);
    mocks
        .minors
        .expect_insert()
        .withf(move |record| record.structure_id == home && !record.case_complete)
        .times(1)
        .return_once(|_| Ok(()));

    let created = service(mocks)
        .create_minor(&principal(StaffRole::Educator, home), form(Some(StructureId::random())))
        .await
        .expect("created");

    assert_eq!(created.structure_id, home);
    assert_eq!(created.created_at, fixture_now());
}

#[rstest]
#[case::missing(None, "required")]
#[case::unknown(Some(StructureId::random()), "unknown_structure")]
#[tokio::test]
async fn super_admins_must_name_an_existing_structure(
    #[case] requested: Option<StructureId>,
    #[case] code: &str,
) {
    let mut mocks = RecordMocks::default();
    mocks.structures.expect_find().returning(|_| Ok(None));
    mocks.minors.expect_insert().times(0);

    let error = service(mocks)
        .create_minor(&principal(StaffRole::SuperAdmin, StructureId::random()), form(requested))
        .await
        .expect_err("structure required");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!(code))
    );
}

#[tokio::test]
async fn super_admin_writes_to_the_named_structure() {
    let target = StructureId::random();
    let mut mocks = RecordMocks::default();
    mocks
        .structures
        .expect_find()
        .return_once(move |id| Ok(Some(structure(*id, "SISEIP Nord"))));
    mocks.minors.expect_insert().return_once(|_| Ok(()));

    let created = service(mocks)
        .create_minor(&principal(StaffRole::SuperAdmin, StructureId::random()), form(Some(target)))
        .await
        .expect("created");

    assert_eq!(created.structure_id, target);
}

#[tokio::test]
async fn minors_outside_scope_are_not_found() {
    let other = minor(StructureId::random(), "Noah", "Petit", false);
    let id = other.id;
    let mut mocks = RecordMocks::default();
    mocks.minors.expect_find().return_once(move |_| Ok(Some(other)));
    mocks.notes.expect_list_for_minor().times(0);

    let error = service(mocks)
        .notes(&principal(StaffRole::Admin, StructureId::random()), &id)
        .await
        .expect_err("hidden");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn note_is_stamped_with_author_and_structure() {
    let home = StructureId::random();
    let subject = minor(home, "Lina", "Morel", false);
    let id = subject.id;
    let caller = principal(StaffRole::Educator, home);
    let author = caller.id;
    let mut mocks = RecordMocks::default();
    mocks.minors.expect_find().return_once(move |_| Ok(Some(subject)));
    mocks
        .notes
        .expect_insert()
        .withf(move |note| note.author_id == author && note.structure_id == home)
        .times(1)
        .return_once(|_| Ok(()));

    let note = service(mocks)
        .create_note(
            &caller,
            &id,
            NoteForm {
                title: "Point hebdo".to_owned(),
                body: "RAS".to_owned(),
            },
        )
        .await
        .expect("note created");

    assert_eq!(note.minor_id, id);
}

#[tokio::test]
async fn validating_an_unknown_transcription_is_not_found() {
    let home = StructureId::random();
    let subject = minor(home, "Lina", "Morel", false);
    let id = subject.id;
    let mut mocks = RecordMocks::default();
    mocks.minors.expect_find().return_once(move |_| Ok(Some(subject)));
    mocks
        .transcriptions
        .expect_mark_validated()
        .return_once(|_, _| Ok(false));

    let error = service(mocks)
        .validate_transcription(
            &principal(StaffRole::Educator, home),
            &id,
            &TranscriptionId::random(),
        )
        .await
        .expect_err("missing transcription");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_applies_the_status_filter() {
    let home = StructureId::random();
    let open = minor(home, "Lina", "Morel", false);
    let closed = minor(home, "Noah", "Petit", true);
    let mut mocks = RecordMocks::default();
    mocks
        .minors
        .expect_list()
        .return_once(move |_, _| Ok(vec![open, closed]));

    let listed = service(mocks)
        .list_minors(
            &principal(StaffRole::Educator, home),
            MinorListFilter {
                status: Some(crate::domain::CaseStatus::Complete),
                ..MinorListFilter::default()
            },
        )
        .await
        .expect("listed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].first_name, "Noah");
}

#[tokio::test]
async fn users_cannot_write_transcriptions() {
    let error = service(RecordMocks::default())
        .create_transcription(
            &principal(StaffRole::User, StructureId::random()),
            &MinorId::random(),
            TranscriptionForm {
                body: "Entretien".to_owned(),
                interviewed_at: fixture_now() - Duration::hours(1),
            },
        )
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}
