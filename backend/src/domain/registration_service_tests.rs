//! Regression coverage for this module.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockIdentityProvider;
use crate::domain::service_test_support::{RecordMocks, structure};
use crate::domain::{ErrorCode, StaffId};

#[fixture]
fn form() -> RegistrationForm {
    RegistrationForm {
        structure_id: StructureId::random(),
        first_name: "Camille".to_owned(),
        last_name: "Martin".to_owned(),
        email: "Camille.Martin@mecs.fr".to_owned(),
        password: "s3cret-pass".to_owned(),
        password_confirmation: "s3cret-pass".to_owned(),
        accepted_terms: true,
    }
}

#[rstest]
fn valid_form_becomes_an_educator_sign_up(form: RegistrationForm) {
    let request = validate_registration(&form).expect("valid form");
    assert_eq!(request.role, StaffRole::Educator);
    assert_eq!(request.email, "camille.martin@mecs.fr");
    assert_eq!(request.structure_id, form.structure_id);
}

#[rstest]
#[case::short_first_name(
    |f: &mut RegistrationForm| f.first_name = "C".to_owned(),
    "prenom",
    "too_short",
)]
#[case::blank_last_name(
    |f: &mut RegistrationForm| f.last_name = "  ".to_owned(),
    "nom",
    "required",
)]
#[case::bad_email(
    |f: &mut RegistrationForm| f.email = "camille".to_owned(),
    "email",
    "invalid_email",
)]
#[case::short_password(
    |f: &mut RegistrationForm| f.password = "short".to_owned(),
    "password",
    "too_short",
)]
#[case::mismatch(
    |f: &mut RegistrationForm| f.password_confirmation = "s3cret-pasS".to_owned(),
    "passwordConfirmation",
    "mismatch",
)]
#[case::terms(|f: &mut RegistrationForm| f.accepted_terms = false, "acceptedTerms", "required")]
fn invalid_forms_name_the_field(
    mut form: RegistrationForm,
    #[case] change: fn(&mut RegistrationForm),
    #[case] field: &str,
    #[case] code: &str,
) {
    change(&mut form);
    let error = validate_registration(&form).expect_err("invalid form");
    assert_eq!(error.field, field);
    assert_eq!(error.code, code);
}

fn mocks_with_structure(id: StructureId, attached: u64) -> RecordMocks {
    let mut mocks = RecordMocks::default();
    mocks
        .structures
        .expect_find()
        .returning(move |_| Ok(Some(structure(id, "MECS Les Tilleuls"))));
    mocks
        .staff
        .expect_count_in_structure()
        .returning(move |_| Ok(attached));
    mocks
}

#[rstest]
#[tokio::test]
async fn registration_signs_up_through_the_identity_provider(form: RegistrationForm) {
    let staff_id = StaffId::random();
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_sign_up()
        .withf(|request| request.role == StaffRole::Educator)
        .times(1)
        .return_once(move |_| Ok(staff_id));

    let service = RegistrationService::new(
        &mocks_with_structure(form.structure_id, 3).into_ports(),
        Arc::new(identity),
    );
    let account = service.register(form.clone()).await.expect("registered");

    assert_eq!(account.staff_id, staff_id);
    assert_eq!(account.structure.id, form.structure_id);
}

#[rstest]
#[tokio::test]
async fn full_structure_refuses_registration(form: RegistrationForm) {
    let mut identity = MockIdentityProvider::new();
    identity.expect_sign_up().times(0);

    let service = RegistrationService::new(
        &mocks_with_structure(form.structure_id, 10).into_ports(),
        Arc::new(identity),
    );
    let error = service.register(form).await.expect_err("quota reached");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn unknown_structure_is_an_invalid_invitation(form: RegistrationForm) {
    let mut mocks = RecordMocks::default();
    mocks.structures.expect_find().returning(|_| Ok(None));
    let service =
        RegistrationService::new(&mocks.into_ports(), Arc::new(MockIdentityProvider::new()));

    let error = service
        .lookup_invite(&form.structure_id)
        .await
        .expect_err("unknown structure");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "invalid invitation link");
}

#[rstest]
#[tokio::test]
async fn duplicate_account_is_a_conflict(form: RegistrationForm) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_sign_up()
        .return_once(|request| {
            Err(IdentityProviderError::already_registered(request.email.clone()))
        });

    let service = RegistrationService::new(
        &mocks_with_structure(form.structure_id, 0).into_ports(),
        Arc::new(identity),
    );
    let error = service.register(form).await.expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
}
