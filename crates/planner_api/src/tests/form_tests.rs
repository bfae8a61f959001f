use super::*;
use shared::{domain::Quarter, error::ErrorCode};

const EDUCATION: &str = "School of Education";
const EDUCATION_MAJOR: &str = "Education, Society, and Human Development";
const CNAS: &str = "College of Natural and Agricultural Sciences";
const CHASS: &str = "College of Humanities, Arts, and Social Sciences";

fn profile() -> StudentProfile {
    initial_profile(&Catalog::ucr()).expect("profile")
}

#[test]
fn initial_profile_uses_first_options() {
    let profile = profile();
    assert_eq!(profile.name, "");
    assert_eq!(
        profile.school,
        "Marlan and Rosemary Bourns College of Engineering"
    );
    assert_eq!(profile.major, "Bioengineering");
    assert_eq!(profile.specialization, None);
    assert_eq!(profile.academic_year.get(), 1);
    assert_eq!(profile.quarter, Quarter::Fall);
    assert!(profile.transcript.is_none());
}

#[test]
fn initial_profile_fails_on_empty_catalog() {
    assert_eq!(
        initial_profile(&Catalog::new(&[])),
        Err(CatalogError::Empty)
    );
}

#[test]
fn selecting_school_of_education_resets_inner_choices() {
    let catalog = Catalog::ucr();
    let profile = select_school(&catalog, profile(), EDUCATION).expect("school");
    assert_eq!(profile.school, EDUCATION);
    assert_eq!(profile.major, EDUCATION_MAJOR);
    assert_eq!(
        profile.specialization.as_deref(),
        Some("Community Leadership, Policy, and Social Justice")
    );
    assert_eq!(
        specialization_step(&catalog, EDUCATION, EDUCATION_MAJOR),
        Some(SpecializationStep::Choose(&[
            "Community Leadership, Policy, and Social Justice",
            "Learning and Behavioral Studies",
            "Student-Designed Comparative Concentration",
        ]))
    );
}

#[test]
fn reselecting_the_same_school_keeps_inner_choices() {
    let catalog = Catalog::ucr();
    let profile = select_school(&catalog, profile(), CHASS).expect("school");
    let profile = select_major(&catalog, profile, "Political Science").expect("major");
    let profile =
        select_specialization(&catalog, profile, "Public Service").expect("specialization");

    let again = select_school(&catalog, profile.clone(), CHASS).expect("school");
    assert_eq!(again, profile);
}

#[test]
fn changing_school_drops_major_even_when_the_name_exists_there() {
    let catalog = Catalog::ucr();
    let profile = select_school(&catalog, profile(), CHASS).expect("school");
    let profile = select_major(&catalog, profile, "Neuroscience").expect("major");
    let profile = select_school(&catalog, profile, CNAS).expect("school");
    assert_eq!(profile.major, "Biochemistry");
}

#[test]
fn biology_skips_the_specialization_step() {
    let catalog = Catalog::ucr();
    let profile = select_school(&catalog, profile(), CNAS).expect("school");
    let profile = select_major(&catalog, profile, "Biology").expect("major");
    assert_eq!(profile.specialization, None);
    assert_eq!(
        specialization_step(&catalog, CNAS, "Biology"),
        Some(SpecializationStep::NotApplicable)
    );

    let err = select_specialization(&catalog, profile, "Genetics").expect_err("no step");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn changing_major_resets_specialization_to_first_option() {
    let catalog = Catalog::ucr();
    let profile = select_school(&catalog, profile(), CHASS).expect("school");
    let profile = select_major(&catalog, profile, "Art History").expect("major");
    assert_eq!(
        profile.specialization.as_deref(),
        Some("Administrative Studies")
    );
    let profile = select_major(&catalog, profile, "Dance").expect("major");
    assert_eq!(profile.specialization, None);
}

#[test]
fn major_must_belong_to_current_school() {
    let err = select_major(&Catalog::ucr(), profile(), "Biology").expect_err("wrong school");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn unknown_specialization_is_rejected() {
    let catalog = Catalog::ucr();
    let profile = select_school(&catalog, profile(), EDUCATION).expect("school");
    let err = select_specialization(&catalog, profile, "Finance").expect_err("not offered");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn update_applies_outer_selection_before_inner() {
    let catalog = Catalog::ucr();
    let update = ProfileUpdate {
        name: Some("Scotty".into()),
        school: Some("School of Business".into()),
        major: Some("Business Administration".into()),
        specialization: Some("Finance".into()),
        academic_year: Some(3),
        quarter: Some(Quarter::Winter),
    };
    let profile = apply_update(&catalog, profile(), update).expect("update");
    assert_eq!(profile.name, "Scotty");
    assert_eq!(profile.school, "School of Business");
    assert_eq!(profile.major, "Business Administration");
    assert_eq!(profile.specialization.as_deref(), Some("Finance"));
    assert_eq!(profile.academic_year.get(), 3);
    assert_eq!(profile.quarter, Quarter::Winter);
}

#[test]
fn update_rejects_year_outside_range() {
    let update = ProfileUpdate {
        academic_year: Some(5),
        ..ProfileUpdate::default()
    };
    let err = apply_update(&Catalog::ucr(), profile(), update).expect_err("year 5");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn update_rejects_years_beyond_a_byte() {
    for year in [300, -1] {
        let update = ProfileUpdate {
            academic_year: Some(year),
            ..ProfileUpdate::default()
        };
        let err = apply_update(&Catalog::ucr(), profile(), update).expect_err("wide year");
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(err.message.contains(&year.to_string()));
    }
}

#[test]
fn empty_update_changes_nothing() {
    let before = profile();
    let after = apply_update(&Catalog::ucr(), before.clone(), ProfileUpdate::default())
        .expect("update");
    assert_eq!(after, before);
}
