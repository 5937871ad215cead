//! Adapter selection and driving-port wiring.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use gensys_console::domain::ports::{IdentityProvider, LogoStorage, RecordPorts};
use gensys_console::domain::{
    DashboardService, Error, MinorService, RegistrationService, SessionLoginService, StaffId,
    StaffMember, StaffRole, StaffService, Structure, StructureService,
};
use gensys_console::inbound::http::health::RecordBackend;
use gensys_console::inbound::http::state::HttpState;
use gensys_console::outbound::invite_links::UrlInviteLinkIssuer;
use gensys_console::outbound::memory::InMemoryStore;
use gensys_console::outbound::supabase::{
    SupabaseClient, SupabaseConfig, SupabaseIdentityProvider, SupabaseLogoStorage,
    SupabaseRecordStore,
};

use super::config::{BackendConfig, DemoAdmin};
use super::ServerConfig;

/// Driven adapters for one backend.
struct Adapters {
    records: RecordPorts,
    identity: Arc<dyn IdentityProvider>,
    logos: Arc<dyn LogoStorage>,
    demo: Option<(InMemoryStore, DemoAdmin)>,
    backend: RecordBackend,
}

fn supabase_adapters(
    config: &SupabaseConfig,
    storage_bucket: &str,
) -> std::io::Result<Adapters> {
    let client = SupabaseClient::new(config)
        .map_err(|error| std::io::Error::other(format!("HTTP client setup failed: {error}")))?;
    let store = Arc::new(SupabaseRecordStore::new(client.clone()));
    info!(project = %config.base_url, "using hosted record backend");
    Ok(Adapters {
        records: RecordPorts {
            structures: store.clone(),
            staff: store.clone(),
            minors: store.clone(),
            notes: store.clone(),
            transcriptions: store.clone(),
            events: store,
        },
        identity: Arc::new(SupabaseIdentityProvider::new(client.clone())),
        logos: Arc::new(SupabaseLogoStorage::new(client, storage_bucket)),
        demo: None,
        backend: RecordBackend::Supabase,
    })
}

fn demo_adapters(clock: Arc<dyn Clock>, admin: &DemoAdmin) -> Adapters {
    let store = InMemoryStore::new(clock);
    warn!("no hosted backend configured; serving the in-memory demo store");
    Adapters {
        records: store.record_ports(),
        identity: Arc::new(store.clone()),
        logos: Arc::new(store.clone()),
        demo: Some((store, admin.clone())),
        backend: RecordBackend::Memory,
    }
}

/// Seed the demo super-admin into the default structure.
fn seed_demo_admin(
    store: &InMemoryStore,
    admin: &DemoAdmin,
    structure: &Structure,
    clock: &dyn Clock,
) {
    let member = StaffMember {
        id: StaffId::random(),
        email: admin.email.clone(),
        first_name: "Admin".to_owned(),
        last_name: "Démo".to_owned(),
        structure_id: structure.id,
        role: StaffRole::SuperAdmin,
        mode: None,
        created_at: clock.utc(),
    };
    store.seed_account(member, &admin.password);
    info!(email = %admin.email, structure_id = %structure.id, "demo super-admin seeded");
}

/// Wire the driving ports over the selected backend.
///
/// Creates the default structure when the store holds none. In demo mode a
/// super-admin is seeded into it so the console is usable straight away.
///
/// # Errors
///
/// Returns an I/O error when the HTTP client cannot be built, or when the
/// demo store cannot be seeded.
pub(crate) async fn build_http_state(
    config: &ServerConfig,
) -> std::io::Result<(web::Data<HttpState>, RecordBackend)> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let adapters = match &config.backend {
        BackendConfig::Supabase {
            config,
            storage_bucket,
        } => supabase_adapters(config, storage_bucket)?,
        BackendConfig::Demo(admin) => demo_adapters(Arc::clone(&clock), admin),
    };
    let Adapters {
        records,
        identity,
        logos,
        demo,
        backend,
    } = adapters;

    let invites = Arc::new(UrlInviteLinkIssuer::new(config.invite_base_url.clone()));
    let structures = StructureService::new(&records, logos, invites, Arc::clone(&clock));
    match structures.ensure_default_structure().await {
        Ok(created) => {
            if let Some((store, admin)) = &demo {
                let structure = created.ok_or_else(|| {
                    std::io::Error::other("demo store unexpectedly held a structure")
                })?;
                seed_demo_admin(store, admin, &structure, clock.as_ref());
            }
        }
        Err(error) if demo.is_some() => return Err(startup_error(&error)),
        Err(error) => warn!(%error, "default structure check failed; continuing"),
    }

    let state = HttpState {
        login: Arc::new(SessionLoginService::new(
            Arc::clone(&identity),
            Arc::clone(&records.staff),
        )),
        dashboard: Arc::new(DashboardService::new(&records, Arc::clone(&clock))),
        structures: Arc::new(structures),
        registration: Arc::new(RegistrationService::new(&records, Arc::clone(&identity))),
        staff: Arc::new(StaffService::new(&records, identity)),
        minors: Arc::new(MinorService::new(&records, clock)),
    };
    Ok((web::Data::new(state), backend))
}

fn startup_error(error: &Error) -> std::io::Error {
    std::io::Error::other(format!("demo store seeding failed: {error}"))
}
