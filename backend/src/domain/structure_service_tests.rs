//! Regression coverage for this module.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockInviteLinkIssuer, MockLogoStorage, RecordStoreError};
use crate::domain::service_test_support::{RecordMocks, fixture_clock, principal, structure};
use crate::domain::{ErrorCode, StructureForm, StructureType};

fn form() -> StructureForm {
    StructureForm {
        name: "MECS Les Tilleuls".to_owned(),
        structure_type: StructureType::Mecs,
        city: "Lyon".to_owned(),
        email: "Contact@Tilleuls.fr".to_owned(),
        max_users: 25,
    }
}

fn request() -> CreateStructureRequest {
    CreateStructureRequest {
        form: form(),
        logo_content_type: "image/png".to_owned(),
        logo: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

fn invite_for(summary: &StructureSummary) -> InviteLink {
    InviteLink {
        url: format!("https://console.example/inscription?structure_id={}", summary.id),
        structure: summary.clone(),
    }
}

fn service(
    mocks: RecordMocks,
    logos: MockLogoStorage,
    invites: MockInviteLinkIssuer,
) -> StructureService {
    StructureService::new(
        &mocks.into_ports(),
        Arc::new(logos),
        Arc::new(invites),
        fixture_clock(),
    )
}

#[tokio::test]
async fn super_admin_creates_structure_with_logo_and_invite() {
    let mut mocks = RecordMocks::default();
    mocks
        .structures
        .expect_insert()
        .withf(|s| {
            s.email == "contact@tilleuls.fr"
                && s.logo_url.as_deref() == Some("https://cdn/logo.png")
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut logos = MockLogoStorage::new();
    logos
        .expect_upload()
        .withf(|path, content_type, bytes| {
            path.starts_with("logos/")
                && path.ends_with(".png")
                && content_type == "image/png"
                && bytes.len() == 4
        })
        .times(1)
        .return_once(|_, _, _| Ok("https://cdn/logo.png".to_owned()));
    let mut invites = MockInviteLinkIssuer::new();
    invites.expect_issue().times(1).returning(|summary| Ok(invite_for(summary)));

    let caller = principal(StaffRole::SuperAdmin, StructureId::random());
    let created = service(mocks, logos, invites)
        .create_structure(&caller, request())
        .await
        .expect("structure created");

    assert_eq!(created.structure.name, "MECS Les Tilleuls");
    assert_eq!(created.invite.structure.id, created.structure.id);
    assert!(created.invite.url.ends_with(&created.structure.id.to_string()));
}

#[rstest]
#[case(StaffRole::Admin)]
#[case(StaffRole::Educator)]
#[tokio::test]
async fn only_super_admins_create_structures(#[case] role: StaffRole) {
    let mut logos = MockLogoStorage::new();
    logos.expect_upload().times(0);
    let caller = principal(role, StructureId::random());

    let error = service(RecordMocks::default(), logos, MockInviteLinkIssuer::new())
        .create_structure(&caller, request())
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn unsupported_logo_is_rejected_before_upload() {
    let mut logos = MockLogoStorage::new();
    logos.expect_upload().times(0);
    let caller = principal(StaffRole::SuperAdmin, StructureId::random());
    let mut bad = request();
    bad.logo_content_type = "image/gif".to_owned();

    let error = service(RecordMocks::default(), logos, MockInviteLinkIssuer::new())
        .create_structure(&caller, bad)
        .await
        .expect_err("invalid logo");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("field")),
        Some(&serde_json::json!("logo"))
    );
}

#[tokio::test]
async fn failed_insert_aborts_before_invite() {
    let mut mocks = RecordMocks::default();
    mocks
        .structures
        .expect_insert()
        .return_once(|_| Err(RecordStoreError::connection("refused")));
    let mut logos = MockLogoStorage::new();
    logos.expect_upload().return_once(|_, _, _| Ok("https://cdn/logo.png".to_owned()));
    let mut invites = MockInviteLinkIssuer::new();
    invites.expect_issue().times(0);

    let caller = principal(StaffRole::SuperAdmin, StructureId::random());
    let error = service(mocks, logos, invites)
        .create_structure(&caller, request())
        .await
        .expect_err("insert fails");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn admins_only_invite_to_their_own_structure() {
    let home = StructureId::random();
    let admin = principal(StaffRole::Admin, home);

    let error = service(RecordMocks::default(), MockLogoStorage::new(), MockInviteLinkIssuer::new())
        .issue_invite(&admin, &StructureId::random())
        .await
        .expect_err("other structure");
    assert_eq!(error.code(), ErrorCode::Forbidden);

    let mut mocks = RecordMocks::default();
    mocks
        .structures
        .expect_find()
        .return_once(move |id| Ok(Some(structure(*id, "MECS Les Tilleuls"))));
    let mut invites = MockInviteLinkIssuer::new();
    invites.expect_issue().returning(|summary| Ok(invite_for(summary)));
    let link = service(mocks, MockLogoStorage::new(), invites)
        .issue_invite(&admin, &home)
        .await
        .expect("own structure");
    assert_eq!(link.structure.id, home);
}

#[tokio::test]
async fn invite_for_unknown_structure_is_not_found() {
    let mut mocks = RecordMocks::default();
    mocks.structures.expect_find().return_once(|_| Ok(None));
    let caller = principal(StaffRole::SuperAdmin, StructureId::random());

    let error = service(mocks, MockLogoStorage::new(), MockInviteLinkIssuer::new())
        .issue_invite(&caller, &StructureId::random())
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(9, false)]
#[case(10, true)]
#[case(11, true)]
#[tokio::test]
async fn quota_is_reached_at_max_users(#[case] staff: u64, #[case] exceeded: bool) {
    let home = structure(StructureId::random(), "MECS");
    let mut mocks = RecordMocks::default();
    mocks.staff.expect_count_in_structure().return_once(move |_| Ok(staff));

    let outcome = service(mocks, MockLogoStorage::new(), MockInviteLinkIssuer::new())
        .quota_exceeded(&home)
        .await
        .expect("count succeeds");

    assert_eq!(outcome, exceeded);
}

#[tokio::test]
async fn default_structure_is_created_only_when_empty() {
    let mut mocks = RecordMocks::default();
    mocks.structures.expect_count().return_once(|| Ok(0));
    mocks
        .structures
        .expect_insert()
        .withf(|s| s.name == "Structure par défaut" && s.max_users == 50 && s.city == "Paris")
        .times(1)
        .return_once(|_| Ok(()));
    let created = service(mocks, MockLogoStorage::new(), MockInviteLinkIssuer::new())
        .ensure_default_structure()
        .await
        .expect("bootstrap succeeds");
    assert!(created.is_some());

    let mut mocks = RecordMocks::default();
    mocks.structures.expect_count().return_once(|| Ok(3));
    mocks.structures.expect_insert().times(0);
    let created = service(mocks, MockLogoStorage::new(), MockInviteLinkIssuer::new())
        .ensure_default_structure()
        .await
        .expect("bootstrap succeeds");
    assert!(created.is_none());
}

#[tokio::test]
async fn non_super_admins_list_only_their_structure() {
    let home = StructureId::random();
    let mut mocks = RecordMocks::default();
    mocks.structures.expect_list().times(0);
    mocks
        .structures
        .expect_find()
        .return_once(move |id| Ok(Some(structure(*id, "MECS"))));

    let listed = service(mocks, MockLogoStorage::new(), MockInviteLinkIssuer::new())
        .list_structures(&principal(StaffRole::Educator, home))
        .await
        .expect("list succeeds");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, home);
}
