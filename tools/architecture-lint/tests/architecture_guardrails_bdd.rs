//! Behaviour tests for the console's hexagonal guardrails.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use architecture_lint::{ArchitectureLintError, LintSource, Violation};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

const INBOUND_HANDLER: &str = "inbound/http/minors.rs";
const DOMAIN_MODULE: &str = "domain/dashboard.rs";
const OUTBOUND_MODULE: &str = "outbound/memory/store.rs";

#[derive(Default)]
struct LintWorld {
    sources: RefCell<Vec<LintSource>>,
    result: RefCell<Option<Result<(), ArchitectureLintError>>>,
}

impl LintWorld {
    fn add(&self, file: &str, contents: &str) {
        self.sources.borrow_mut().push(LintSource {
            file: PathBuf::from(file),
            contents: contents.to_owned(),
        });
    }

    fn violations(&self) -> Vec<Violation> {
        match self.result.borrow().as_ref().expect("lint must have run") {
            Ok(()) => panic!("expected violations, lint succeeded"),
            Err(ArchitectureLintError::Violations(violations)) => violations.clone(),
            Err(other) => panic!("expected violations error, got: {other:?}"),
        }
    }

    fn assert_violation(&self, file: &str, fragment: &str) {
        let expected = PathBuf::from(file);
        let violations = self.violations();
        assert!(
            violations
                .iter()
                .any(|v| v.file == expected && v.message.contains(fragment)),
            "expected violation in {file} mentioning {fragment}, got: {violations:?}"
        );
    }

    fn add_valid_modules(&self) {
        self.add(
            DOMAIN_MODULE,
            "use crate::domain::ports::RecordPorts; pub struct DashboardService { ports: RecordPorts }",
        );
        self.add(
            INBOUND_HANDLER,
            "use crate::domain::MinorId; fn handler() { let _ = MinorId::random(); }",
        );
        self.add(
            OUTBOUND_MODULE,
            "use crate::domain::MinorRecord; pub struct InMemoryStore { minors: Vec<MinorRecord> }",
        );
    }
}

#[fixture]
fn world() -> LintWorld {
    LintWorld::default()
}

#[given("valid domain, inbound, and outbound modules")]
fn valid_modules(world: &LintWorld) {
    world.add_valid_modules();
}

#[given("an inbound module that imports the outbound layer")]
fn inbound_imports_outbound(world: &LintWorld) {
    world.add(
        INBOUND_HANDLER,
        "use gensys_console::outbound::memory::InMemoryStore; fn handler() { let _ = InMemoryStore::default(); }",
    );
}

#[given("an inbound module that imports the HTTP client")]
fn inbound_imports_http_client(world: &LintWorld) {
    world.add(
        INBOUND_HANDLER,
        "use reqwest::Client; fn handler() { let _ = Client::new(); }",
    );
}

#[given("a domain module that imports Actix Web")]
fn domain_imports_actix(world: &LintWorld) {
    world.add(
        DOMAIN_MODULE,
        "use actix_web::HttpResponse; fn render() { let _ = HttpResponse::Ok(); }",
    );
}

#[given("an outbound module that imports the inbound layer")]
fn outbound_imports_inbound(world: &LintWorld) {
    world.add(
        OUTBOUND_MODULE,
        "use crate::inbound::http::ApiResult; fn store() {}",
    );
}

#[given("valid modules mixed with multiple boundary violations")]
fn valid_modules_with_violations(world: &LintWorld) {
    world.add_valid_modules();
    world.add(
        "inbound/http/structures.rs",
        "use crate::outbound::supabase::SupabaseLogoStorage; fn upload() {}",
    );
    world.add(
        "domain/alert.rs",
        "use utoipa::ToSchema; #[derive(ToSchema)] pub struct Alert;",
    );
}

#[when("the architecture lint runs")]
fn run_architecture_lint(world: &LintWorld) {
    let temp_dir = TempDir::new().expect("tempdir");
    let backend_dir = temp_dir.path().join("backend");
    let src_dir = backend_dir.join("src");
    for source in world.sources.borrow().iter() {
        let path = src_dir.join(&source.file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, &source.contents).expect("write source file");
    }
    let result = architecture_lint::lint_backend_sources(&backend_dir);
    *world.result.borrow_mut() = Some(result);
}

#[then("the lint succeeds")]
fn lint_succeeds(world: &LintWorld) {
    let result = world.result.borrow();
    let outcome = result.as_ref().expect("lint must have run");
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

#[then("the lint fails")]
fn lint_fails(world: &LintWorld) {
    let result = world.result.borrow();
    let outcome = result.as_ref().expect("lint must have run");
    assert!(outcome.is_err(), "expected failure, got: {outcome:?}");
}

#[then("the lint fails due to outbound access from inbound")]
fn fails_outbound_from_inbound(world: &LintWorld) {
    world.assert_violation(INBOUND_HANDLER, "crate::outbound");
}

#[then("the lint fails due to HTTP client usage in inbound")]
fn fails_http_client_in_inbound(world: &LintWorld) {
    world.assert_violation(INBOUND_HANDLER, "external crate `reqwest`");
}

#[then("the lint fails due to framework crate usage in the domain")]
fn fails_framework_in_domain(world: &LintWorld) {
    world.assert_violation(DOMAIN_MODULE, "external crate `actix_web`");
}

#[then("the lint fails due to inbound access from outbound")]
fn fails_inbound_from_outbound(world: &LintWorld) {
    world.assert_violation(OUTBOUND_MODULE, "crate::inbound");
}

#[then("all boundary violations are reported")]
fn all_violations_reported(world: &LintWorld) {
    assert!(world.violations().len() >= 2);
    world.assert_violation("inbound/http/structures.rs", "crate::outbound");
    world.assert_violation("domain/alert.rs", "external crate `utoipa`");
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Well-layered modules pass the lint"
)]
fn well_layered_modules_pass_the_lint(world: LintWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "An HTTP handler reaching into the record store adapters"
)]
fn an_http_handler_reaching_into_the_record_store_adapters(world: LintWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "An HTTP handler calling the hosted backend directly"
)]
fn an_http_handler_calling_the_hosted_backend_directly(world: LintWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Domain code depending on the web framework"
)]
fn domain_code_depending_on_the_web_framework(world: LintWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "A record store adapter depending on HTTP handlers"
)]
fn a_record_store_adapter_depending_on_http_handlers(world: LintWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Every violation is reported in one run"
)]
fn every_violation_is_reported_in_one_run(world: LintWorld) {
    drop(world);
}
