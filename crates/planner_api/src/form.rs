//! Cascading school → major → specialization selection.
//!
//! Every function takes the profile by value and hands back the next one, so
//! a rejected edit never leaves a half-applied profile behind.

use shared::{
    domain::{AcademicYear, StudentProfile},
    error::ApiError,
    protocol::ProfileUpdate,
};

use crate::catalog::{Catalog, CatalogError, MajorEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecializationStep {
    /// The major has no specializations; the control is not shown.
    NotApplicable,
    Choose(&'static [&'static str]),
}

pub fn specialization_step(
    catalog: &Catalog,
    school: &str,
    major: &str,
) -> Option<SpecializationStep> {
    let specializations = catalog.specializations_for(school, major)?;
    Some(if specializations.is_empty() {
        SpecializationStep::NotApplicable
    } else {
        SpecializationStep::Choose(specializations)
    })
}

pub fn initial_profile(catalog: &Catalog) -> Result<StudentProfile, CatalogError> {
    let school = catalog.first_school().ok_or(CatalogError::Empty)?;
    let major = school
        .majors
        .first()
        .ok_or(CatalogError::SchoolWithoutMajors(school.name))?;
    Ok(StudentProfile {
        name: String::new(),
        school: school.name.to_string(),
        major: major.name.to_string(),
        specialization: first_specialization(major),
        academic_year: AcademicYear::default(),
        quarter: Default::default(),
        transcript: None,
    })
}

pub fn select_school(
    catalog: &Catalog,
    mut profile: StudentProfile,
    school: &str,
) -> Result<StudentProfile, ApiError> {
    if profile.school == school {
        return Ok(profile);
    }
    let entry = catalog
        .school(school)
        .ok_or_else(|| ApiError::validation(format!("unknown school '{school}'")))?;
    let major = entry
        .majors
        .first()
        .ok_or_else(|| ApiError::validation(format!("school '{school}' offers no majors")))?;
    profile.school = entry.name.to_string();
    profile.major = major.name.to_string();
    profile.specialization = first_specialization(major);
    Ok(profile)
}

pub fn select_major(
    catalog: &Catalog,
    mut profile: StudentProfile,
    major: &str,
) -> Result<StudentProfile, ApiError> {
    if profile.major == major {
        return Ok(profile);
    }
    let entry = catalog.major(&profile.school, major).ok_or_else(|| {
        ApiError::validation(format!(
            "major '{major}' is not offered by '{}'",
            profile.school
        ))
    })?;
    profile.major = entry.name.to_string();
    profile.specialization = first_specialization(entry);
    Ok(profile)
}

pub fn select_specialization(
    catalog: &Catalog,
    mut profile: StudentProfile,
    specialization: &str,
) -> Result<StudentProfile, ApiError> {
    match specialization_step(catalog, &profile.school, &profile.major) {
        Some(SpecializationStep::Choose(options)) if options.contains(&specialization) => {
            profile.specialization = Some(specialization.to_string());
            Ok(profile)
        }
        Some(SpecializationStep::Choose(_)) => Err(ApiError::validation(format!(
            "specialization '{specialization}' is not offered for '{}'",
            profile.major
        ))),
        Some(SpecializationStep::NotApplicable) => Err(ApiError::validation(format!(
            "major '{}' has no specializations",
            profile.major
        ))),
        None => Err(ApiError::validation(format!(
            "major '{}' is not offered by '{}'",
            profile.major, profile.school
        ))),
    }
}

/// Applies name, school, major, specialization, year and quarter in that
/// order so inner selections are checked against the new outer ones.
pub fn apply_update(
    catalog: &Catalog,
    mut profile: StudentProfile,
    update: ProfileUpdate,
) -> Result<StudentProfile, ApiError> {
    if let Some(name) = update.name {
        profile.name = name;
    }
    if let Some(school) = update.school.as_deref() {
        profile = select_school(catalog, profile, school)?;
    }
    if let Some(major) = update.major.as_deref() {
        profile = select_major(catalog, profile, major)?;
    }
    if let Some(specialization) = update.specialization.as_deref() {
        profile = select_specialization(catalog, profile, specialization)?;
    }
    if let Some(year) = update.academic_year {
        profile.academic_year =
            AcademicYear::try_from(year).map_err(|err| ApiError::validation(err.to_string()))?;
    }
    if let Some(quarter) = update.quarter {
        profile.quarter = quarter;
    }
    Ok(profile)
}

fn first_specialization(major: &MajorEntry) -> Option<String> {
    major.specializations.first().map(|name| name.to_string())
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
