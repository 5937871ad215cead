//! Regression coverage for this module.

use super::*;
use crate::domain::{MinorId, StaffId, StaffRole, StructureId};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

fn minor(
    first: &str,
    last: &str,
    complete: bool,
    day: u32,
    categories: Vec<CaseCategory>,
) -> MinorRecord {
    MinorRecord {
        id: MinorId::random(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        birth_date: NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date"),
        structure_id: StructureId::random(),
        case_complete: complete,
        categories,
        created_at: Utc
            .with_ymd_and_hms(2024, 2, day, 8, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[fixture]
fn minors() -> Vec<MinorRecord> {
    vec![
        minor("Lina", "Morel", false, 1, vec![CaseCategory::Schooling]),
        minor("Noah", "Petit", true, 2, vec![CaseCategory::Medical]),
        minor("Linaëlle", "Durand", true, 1, Vec::new()),
    ]
}

fn names(items: &[&MinorRecord]) -> Vec<String> {
    items.iter().map(|m| m.first_name.clone()).collect()
}

#[rstest]
fn empty_criteria_keep_everything(minors: Vec<MinorRecord>) {
    let filter = ListFilter::new(MinorListFilter::default());
    assert_eq!(filter.apply(&minors, MinorListFilter::matches).len(), 3);
    assert!(!filter.has_active_filters());
}

#[rstest]
fn search_matches_full_name_case_insensitively(minors: Vec<MinorRecord>) {
    let mut filter = ListFilter::new(MinorListFilter::default());
    filter.update(|criteria| criteria.search = "lina mo".to_owned());
    assert_eq!(names(&filter.apply(&minors, MinorListFilter::matches)), ["Lina"]);
    assert!(filter.has_active_filters());
}

#[rstest]
#[case::category(|c: &mut MinorListFilter| c.category = Some(CaseCategory::Medical), vec!["Noah"])]
#[case::status(|c: &mut MinorListFilter| c.status = Some(CaseStatus::Incomplete), vec!["Lina"])]
#[case::entry_date(
    |c: &mut MinorListFilter| c.entry_date = NaiveDate::from_ymd_opt(2024, 2, 1),
    vec!["Lina", "Linaëlle"],
)]
fn structured_criteria_narrow_the_list(
    minors: Vec<MinorRecord>,
    #[case] change: fn(&mut MinorListFilter),
    #[case] expected: Vec<&str>,
) {
    let mut filter = ListFilter::new(MinorListFilter::default());
    filter.update(change);
    assert_eq!(names(&filter.apply(&minors, MinorListFilter::matches)), expected);
}

#[rstest]
fn reset_restores_initial_criteria(minors: Vec<MinorRecord>) {
    let mut filter = ListFilter::new(MinorListFilter::default());
    filter.update(|criteria| criteria.status = Some(CaseStatus::Complete));
    filter.reset();
    assert!(!filter.has_active_filters());
    assert_eq!(filter.apply(&minors, MinorListFilter::matches).len(), 3);
}

#[rstest]
fn blank_search_is_not_active() {
    let mut filter = ListFilter::new(StaffListFilter::default());
    filter.update(|criteria| criteria.search = "   ".to_owned());
    assert!(!filter.has_active_filters());
}

#[rstest]
#[case("martin", true)]
#[case("CAMILLE", true)]
#[case("mecs.fr", true)]
#[case("dupont", false)]
fn staff_search_covers_names_and_email(#[case] search: &str, #[case] expected: bool) {
    let member = StaffMember {
        id: StaffId::random(),
        email: "c.martin@mecs.fr".to_owned(),
        first_name: "Camille".to_owned(),
        last_name: "Martin".to_owned(),
        structure_id: StructureId::random(),
        role: StaffRole::Educator,
        mode: None,
        created_at: Utc::now(),
    };
    let criteria = StaffListFilter {
        search: search.to_owned(),
    };
    assert_eq!(StaffListFilter::matches(&member, &criteria), expected);
}
