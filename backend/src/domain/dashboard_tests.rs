//! Regression coverage for this module.

use chrono::Duration;
use rstest::rstest;

use super::*;
use crate::domain::ports::RecordStoreError;
use crate::domain::service_test_support::{
    RecordMocks, fixture_clock, fixture_now, minor, scheduled, structure,
};
use crate::domain::{ErrorCode, EventKind, StructureId};

fn populated(structure_id: StructureId) -> RecordMocks {
    let lina = minor(structure_id, "Lina", "Morel", false);
    let now = fixture_now();
    let upcoming = vec![
        scheduled(&lina, EventKind::Appointment, now + Duration::hours(2)),
        scheduled(&lina, EventKind::Birthday, now + Duration::days(2)),
    ];
    let home = structure(structure_id, "MECS Les Tilleuls");

    let mut mocks = RecordMocks::default();
    mocks.transcriptions.expect_list_pending().returning(|_| Ok(Vec::new()));
    mocks
        .minors
        .expect_list()
        .times(1)
        .return_once(move |_, _| Ok(vec![lina]));
    mocks.minors.expect_count().return_once(|_| Ok(5));
    mocks.notes.expect_count_since().return_once(|_, _| Ok(9));
    mocks
        .events
        .expect_list_between()
        .withf(|_, _, kind| kind.is_some())
        .returning(|_, _, _| Ok(Vec::new()));
    mocks
        .events
        .expect_list_between()
        .withf(|_, _, kind| kind.is_none())
        .return_once(move |_, _, _| Ok(upcoming));
    mocks
        .structures
        .expect_find()
        .return_once(move |_| Ok(Some(home)));
    mocks
}

#[tokio::test]
async fn compose_runs_one_aggregation_and_keeps_counts_consistent() {
    let structure_id = StructureId::random();
    let service = DashboardService::new(&populated(structure_id).into_ports(), fixture_clock());

    let view = service
        .compose(&ScopeFilter::structure(structure_id))
        .await
        .expect("dashboard composed");

    assert_eq!(view.alerts.len(), 1);
    assert_eq!(view.stats.alert_count, 1);
    assert_eq!(view.stats.minor_count, 5);
    assert_eq!(view.stats.note_count, 9);
    assert_eq!(view.upcoming_events.len(), 2);
    assert_eq!(
        view.structure.map(|s| s.name),
        Some("MECS Les Tilleuls".to_owned())
    );
}

#[rstest]
#[case(0, 1)]
#[case(2, 1)]
#[case(5, 0)]
#[tokio::test]
async fn events_on_selects_the_calendar_day(#[case] offset_days: i64, #[case] expected: usize) {
    let structure_id = StructureId::random();
    let service = DashboardService::new(&populated(structure_id).into_ports(), fixture_clock());
    let view = service
        .compose(&ScopeFilter::structure(structure_id))
        .await
        .expect("dashboard composed");

    let day = (fixture_now() + Duration::days(offset_days)).date_naive();
    assert_eq!(view.events_on(day).len(), expected);
}

#[tokio::test]
async fn failed_upcoming_events_fetch_surfaces_as_unavailable() {
    let structure_id = StructureId::random();
    let mut mocks = RecordMocks::default();
    mocks.transcriptions.expect_list_pending().returning(|_| Ok(Vec::new()));
    mocks.minors.expect_list().returning(|_, _| Ok(Vec::new()));
    mocks.minors.expect_count().returning(|_| Ok(0));
    mocks.notes.expect_count_since().returning(|_, _| Ok(0));
    mocks
        .events
        .expect_list_between()
        .returning(|_, _, _| Err(RecordStoreError::connection("refused")));
    mocks.structures.expect_find().returning(|_| Ok(None));

    let service = DashboardService::new(&mocks.into_ports(), fixture_clock());
    let error = service
        .dashboard(&ScopeFilter::structure(structure_id))
        .await
        .expect_err("dashboard fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(
        error.details().and_then(|d| d.get("collection")),
        Some(&serde_json::json!("evenements"))
    );
}

#[tokio::test]
async fn missing_structure_is_not_an_error() {
    let structure_id = StructureId::random();
    let mut mocks = RecordMocks::default();
    mocks.transcriptions.expect_list_pending().returning(|_| Ok(Vec::new()));
    mocks.minors.expect_list().returning(|_, _| Ok(Vec::new()));
    mocks.minors.expect_count().returning(|_| Ok(0));
    mocks.notes.expect_count_since().returning(|_, _| Ok(0));
    mocks.events.expect_list_between().returning(|_, _, _| Ok(Vec::new()));
    mocks.structures.expect_find().returning(|_| Ok(None));

    let service = DashboardService::new(&mocks.into_ports(), fixture_clock());
    let view = service
        .dashboard(&ScopeFilter::structure(structure_id))
        .await
        .expect("dashboard composed");

    assert!(view.structure.is_none());
    assert_eq!(view.stats, DashboardStats::default());
}
