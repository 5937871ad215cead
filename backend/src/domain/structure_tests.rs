//! Regression coverage for this module.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn form() -> StructureForm {
    StructureForm {
        name: "MECS Les Tilleuls".to_owned(),
        structure_type: StructureType::Mecs,
        city: "Lyon".to_owned(),
        email: "Contact@Tilleuls.fr".to_owned(),
        max_users: 25,
    }
}

#[rstest]
fn valid_form_normalises_email(form: StructureForm) {
    let draft = StructureDraft::try_from_form(form).expect("valid form");
    let structure = draft.into_structure(StructureId::random(), None, chrono::Utc::now());
    assert_eq!(structure.email, "contact@tilleuls.fr");
    assert_eq!(structure.name, "MECS Les Tilleuls");
}

#[rstest]
#[case::short_name(|f: &mut StructureForm| f.name = "M".to_owned(), "name")]
#[case::blank_city(|f: &mut StructureForm| f.city = "  ".to_owned(), "city")]
#[case::bad_email(|f: &mut StructureForm| f.email = "contact".to_owned(), "email")]
#[case::zero_users(|f: &mut StructureForm| f.max_users = 0, "maxUsers")]
#[case::too_many_users(|f: &mut StructureForm| f.max_users = 501, "maxUsers")]
fn invalid_forms_name_the_field(
    mut form: StructureForm,
    #[case] mutate: fn(&mut StructureForm),
    #[case] field: &str,
) {
    mutate(&mut form);
    let err = StructureDraft::try_from_form(form).expect_err("form rejected");
    assert_eq!(err.field, field);
}

#[rstest]
#[case("image/png", "png")]
#[case("image/svg+xml", "svg")]
#[case("IMAGE/PNG", "png")]
fn logo_paths_follow_format(#[case] content_type: &str, #[case] ext: &str) {
    let logo = LogoUpload::new(content_type, vec![1, 2, 3]).expect("valid logo");
    let id = StructureId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id");
    assert_eq!(
        logo.object_path(&id),
        format!("logos/3fa85f64-5717-4562-b3fc-2c963f66afa6.{ext}")
    );
}

#[rstest]
#[case("image/jpeg", vec![1], "unsupported_format")]
#[case("image/png", Vec::new(), "required")]
fn logo_rejects_unsupported_uploads(
    #[case] content_type: &str,
    #[case] bytes: Vec<u8>,
    #[case] code: &str,
) {
    let err = LogoUpload::new(content_type, bytes).expect_err("logo rejected");
    assert_eq!(err.code, code);
}

#[rstest]
fn invite_link_targets_registration_page() {
    let base = Url::parse("https://console.gensys.fr/").expect("base url");
    let id = StructureId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id");
    let link = InviteLink::build(
        &base,
        StructureSummary {
            id,
            name: "MECS".to_owned(),
            city: "Lyon".to_owned(),
        },
    )
    .expect("link builds");
    assert_eq!(
        link.url,
        "https://console.gensys.fr/inscription?structure_id=3fa85f64-5717-4562-b3fc-2c963f66afa6"
    );
}

#[rstest]
fn structure_type_serialises_to_wire_names() {
    let names: Vec<String> = StructureType::ALL
        .iter()
        .map(|kind| serde_json::to_value(kind).expect("serialise"))
        .filter_map(|value| value.as_str().map(str::to_owned))
        .collect();
    assert_eq!(names, ["MECS", "SISEIP", "ITEP", "Autre"]);
}
