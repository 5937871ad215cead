//! Behaviour tests for dashboard alert aggregation over the in-memory store.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use gensys_console::domain::ports::{
    Collection, MinorRepository, NoteRepository, RecordStoreError, TranscriptionRepository,
};
use gensys_console::domain::{
    AggregationFailed, Alert, AlertAggregator, AlertKind, DashboardScreen, DashboardService,
    DashboardView, Event, EventId, EventKind, MinorId, MinorRecord, Note, NoteId, ScopeFilter,
    StaffId, StructureId, Transcription, TranscriptionId,
};
use gensys_console::outbound::memory::InMemoryStore;
use mockable::Clock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

struct DashboardWorld {
    runtime: Runtime,
    now: RefCell<DateTime<Utc>>,
    store: RefCell<Option<InMemoryStore>>,
    structure: StructureId,
    minors: RefCell<HashMap<String, MinorRecord>>,
    deadline: RefCell<Option<Event>>,
    runs: RefCell<Vec<Result<Vec<Alert>, AggregationFailed>>>,
    view: RefCell<Option<DashboardView>>,
    screen_kept_result: RefCell<Option<bool>>,
}

impl DashboardWorld {
    fn new() -> Self {
        Self {
            runtime: tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("test runtime"),
            now: RefCell::new(Utc::now()),
            store: RefCell::new(None),
            structure: StructureId::random(),
            minors: RefCell::new(HashMap::new()),
            deadline: RefCell::new(None),
            runs: RefCell::new(Vec::new()),
            view: RefCell::new(None),
            screen_kept_result: RefCell::new(None),
        }
    }

    fn clock(&self) -> Arc<dyn Clock> {
        Arc::new(FixedClock(*self.now.borrow()))
    }

    fn store(&self) -> InMemoryStore {
        self.store.borrow().clone().expect("store initialised")
    }

    fn scope(&self) -> ScopeFilter {
        ScopeFilter::structure(self.structure)
    }

    fn minor(&self, name: &str) -> MinorRecord {
        self.minors
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("minor {name} not seeded"))
    }

    fn add_minor(&self, name: &str, complete: bool) {
        let minor = MinorRecord {
            id: MinorId::random(),
            first_name: name.to_owned(),
            last_name: "Martin".to_owned(),
            birth_date: NaiveDate::from_ymd_opt(2010, 4, 2).expect("valid date"),
            structure_id: self.structure,
            case_complete: complete,
            categories: Vec::new(),
            created_at: *self.now.borrow() - Duration::days(60),
        };
        let store = self.store();
        self.runtime
            .block_on(MinorRepository::insert(&store, &minor))
            .expect("insert minor");
        self.minors.borrow_mut().insert(name.to_owned(), minor);
    }

    fn add_transcription(&self, name: &str, day: &str, validated: bool) {
        let minor = self.minor(name);
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").expect("YYYY-MM-DD date");
        let transcription = Transcription {
            id: TranscriptionId::random(),
            body: "Entretien".to_owned(),
            interviewed_at: Utc.from_utc_datetime(&date.and_hms_opt(14, 0, 0).expect("valid time")),
            validated,
            minor_id: minor.id,
            author_id: StaffId::random(),
            structure_id: minor.structure_id,
        };
        let store = self.store();
        self.runtime
            .block_on(TranscriptionRepository::insert(&store, &transcription))
            .expect("insert transcription");
    }

    fn compute_alerts(&self) {
        let aggregator = AlertAggregator::new(&self.store().record_ports(), self.clock());
        let result = self.runtime.block_on(aggregator.compute_alerts(&self.scope()));
        self.runs.borrow_mut().push(result);
    }

    fn alerts(&self) -> Vec<Alert> {
        self.runs
            .borrow()
            .last()
            .expect("alerts computed")
            .clone()
            .expect("aggregation succeeded")
    }
}

fn collection_named(name: &str) -> Collection {
    match name {
        "structures" => Collection::Structures,
        "jeunes" | "minors" => Collection::Minors,
        "notes" => Collection::Notes,
        "transcriptions" => Collection::Transcriptions,
        "evenements" | "events" => Collection::Events,
        "educateurs" | "staff" => Collection::Staff,
        other => panic!("unknown collection {other}"),
    }
}

#[fixture]
fn world() -> DashboardWorld {
    DashboardWorld::new()
}

#[given("a structure observed at {instant}")]
fn a_structure_observed_at(world: &DashboardWorld, instant: String) {
    let now = DateTime::parse_from_rfc3339(&instant)
        .expect("RFC 3339 instant")
        .with_timezone(&Utc);
    *world.now.borrow_mut() = now;
    *world.store.borrow_mut() = Some(InMemoryStore::new(world.clock()));
}

#[given("a minor named {name} with a complete case file")]
fn a_minor_with_a_complete_case_file(world: &DashboardWorld, name: String) {
    world.add_minor(&name, true);
}

#[given("a minor named {name} with an incomplete case file")]
fn a_minor_with_an_incomplete_case_file(world: &DashboardWorld, name: String) {
    world.add_minor(&name, false);
}

#[given("an unvalidated transcription for {name} dated {day}")]
fn an_unvalidated_transcription(world: &DashboardWorld, name: String, day: String) {
    world.add_transcription(&name, &day, false);
}

#[given("a validated transcription for {name} dated {day}")]
fn a_validated_transcription(world: &DashboardWorld, name: String, day: String) {
    world.add_transcription(&name, &day, true);
}

#[given("a deadline for {name} in {days} days")]
fn a_deadline_in_days(world: &DashboardWorld, name: String, days: i64) {
    let minor = world.minor(&name);
    let event = Event {
        id: EventId::random(),
        title: "Audience".to_owned(),
        description: String::new(),
        at: *world.now.borrow() + Duration::days(days),
        kind: EventKind::Deadline,
        minor_id: minor.id,
        structure_id: minor.structure_id,
    };
    world.store().add_event(event.clone());
    *world.deadline.borrow_mut() = Some(event);
}

#[given("a note for {name} written {days} days ago")]
fn a_note_written_days_ago(world: &DashboardWorld, name: String, days: i64) {
    let minor = world.minor(&name);
    let note = Note {
        id: NoteId::random(),
        title: "Suivi".to_owned(),
        body: "Point mensuel".to_owned(),
        created_at: *world.now.borrow() - Duration::days(days),
        minor_id: minor.id,
        author_id: StaffId::random(),
        structure_id: minor.structure_id,
    };
    let store = world.store();
    world
        .runtime
        .block_on(NoteRepository::insert(&store, &note))
        .expect("insert note");
}

#[given("the {collection} collection is unavailable")]
fn the_collection_is_unavailable(world: &DashboardWorld, collection: String) {
    world.store().fail(
        collection_named(&collection),
        RecordStoreError::connection("upstream offline"),
    );
}

#[when("the alerts are computed")]
fn the_alerts_are_computed(world: &DashboardWorld) {
    world.compute_alerts();
}

#[when("the alerts are computed twice")]
fn the_alerts_are_computed_twice(world: &DashboardWorld) {
    world.compute_alerts();
    world.compute_alerts();
}

#[when("the dashboard is composed")]
fn the_dashboard_is_composed(world: &DashboardWorld) {
    let service = DashboardService::new(&world.store().record_ports(), world.clock());
    let view = world
        .runtime
        .block_on(service.compose(&world.scope()))
        .expect("dashboard composed");
    *world.view.borrow_mut() = Some(view);
}

#[when("the dashboard screen closes before its load completes")]
fn the_screen_closes_before_its_load_completes(world: &DashboardWorld) {
    let service = DashboardService::new(&world.store().record_ports(), world.clock());
    let mut screen = DashboardScreen::mount(world.now.borrow().date_naive());
    let ticket = screen.begin_load().expect("mounted screen issues a ticket");
    screen.unmount();
    let result = world.runtime.block_on(service.compose(&world.scope()));
    *world.screen_kept_result.borrow_mut() = Some(screen.complete(ticket, result));
}

#[then("{count} alerts are returned")]
fn alerts_are_returned(world: &DashboardWorld, count: usize) {
    assert_eq!(world.alerts().len(), count);
}

#[then("alert {position} is a transcription alert dated {day}")]
fn alert_is_a_transcription_alert(world: &DashboardWorld, position: usize, day: String) {
    let alerts = world.alerts();
    let alert = alerts.get(position - 1).expect("alert at position");
    assert_eq!(alert.kind, AlertKind::TranscriptionPending);
    assert_eq!(alert.at.date_naive().format("%Y-%m-%d").to_string(), day);
}

#[then("alert {position} is a case-incomplete alert for {name}")]
fn alert_is_a_case_incomplete_alert(world: &DashboardWorld, position: usize, name: String) {
    let alerts = world.alerts();
    let alert = alerts.get(position - 1).expect("alert at position");
    assert_eq!(alert.kind, AlertKind::CaseIncomplete);
    assert_eq!(alert.minor_id, world.minor(&name).id);
}

#[then("no note-due alert references {name}")]
fn no_note_due_alert_references(world: &DashboardWorld, name: String) {
    let minor = world.minor(&name);
    assert!(
        !world
            .alerts()
            .iter()
            .any(|alert| alert.kind == AlertKind::NoteDue && alert.minor_id == minor.id)
    );
}

#[then("exactly one note-due alert references {name}")]
fn exactly_one_note_due_alert_references(world: &DashboardWorld, name: String) {
    let minor = world.minor(&name);
    let matching = world
        .alerts()
        .into_iter()
        .filter(|alert| alert.kind == AlertKind::NoteDue && alert.minor_id == minor.id)
        .count();
    assert_eq!(matching, 1);
}

#[then("that alert mentions the deadline date")]
fn that_alert_mentions_the_deadline_date(world: &DashboardWorld) {
    let deadline = world.deadline.borrow().clone().expect("deadline seeded");
    let alert = world
        .alerts()
        .into_iter()
        .find(|alert| alert.kind == AlertKind::NoteDue)
        .expect("note-due alert");
    let expected = deadline.at.format("%d/%m/%Y").to_string();
    assert!(alert.description.contains(&expected), "{}", alert.description);
    assert_eq!(alert.at, deadline.at);
}

#[then("the aggregation fails naming the {collection} collection")]
fn the_aggregation_fails(world: &DashboardWorld, collection: String) {
    let runs = world.runs.borrow();
    let failure = runs
        .last()
        .expect("alerts computed")
        .as_ref()
        .expect_err("aggregation should fail");
    assert_eq!(failure.collection(), collection_named(&collection));
}

#[then("the alert count equals the number of alerts")]
fn the_alert_count_equals_the_number_of_alerts(world: &DashboardWorld) {
    let view = world.view.borrow();
    let view = view.as_ref().expect("dashboard composed");
    assert_eq!(view.stats.alert_count, view.alerts.len() as u64);
    assert!(view.alerts.windows(2).all(|pair| pair[0].at <= pair[1].at));
}

#[then("both runs return the same alerts")]
fn both_runs_return_the_same_alerts(world: &DashboardWorld) {
    let runs = world.runs.borrow();
    let [first, second] = runs.as_slice() else {
        panic!("expected two runs, got {}", runs.len());
    };
    assert_eq!(
        first.as_ref().expect("first run"),
        second.as_ref().expect("second run")
    );
}

#[then("the screen keeps no result")]
fn the_screen_keeps_no_result(world: &DashboardWorld) {
    assert_eq!(*world.screen_kept_result.borrow(), Some(false));
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Pending transcriptions sort before the case-incomplete alert"
)]
fn pending_transcriptions_sort_before_the_case_incomplete_alert(world: DashboardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "A recent note satisfies an upcoming deadline"
)]
fn a_recent_note_satisfies_an_upcoming_deadline(world: DashboardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "A deadline without a recent note raises one alert"
)]
fn a_deadline_without_a_recent_note_raises_one_alert(world: DashboardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Validated transcriptions raise nothing"
)]
fn validated_transcriptions_raise_nothing(world: DashboardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "A failing fetch aborts the whole aggregation"
)]
fn a_failing_fetch_aborts_the_whole_aggregation(world: DashboardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Statistics count exactly the composed alerts"
)]
fn statistics_count_exactly_the_composed_alerts(world: DashboardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Recomputing without writes yields the same alerts"
)]
fn recomputing_without_writes_yields_the_same_alerts(world: DashboardWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "A load finishing after the screen closes is dropped"
)]
fn a_load_finishing_after_the_screen_closes_is_dropped(world: DashboardWorld) {
    drop(world);
}
