use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::features::{CategoricalField, FeatureAssembler, FeatureRow, MultiSelectField};

use super::estimator::SalaryError;

pub const MAX_YEARS_EXPERIENCE: u32 = 50;

const WORK_ENVIRONMENTS: [&str; 4] = [
    "Remote",
    "In-person",
    "Hybrid (some remote, some in-person)",
    "Other",
];

const DEVELOPER_ROLES: [&str; 10] = [
    "Developer, back-end",
    "Developer, front-end",
    "Developer, full-stack",
    "Developer, mobile",
    "Developer, desktop or enterprise apps",
    "Data scientist or machine learning specialist",
    "Engineer, data",
    "Engineer, site reliability",
    "Academic researcher",
    "Student",
];

const LANGUAGES: [&str; 10] = [
    "JavaScript",
    "HTML/CSS",
    "SQL",
    "Python",
    "TypeScript",
    "Bash/Shell (all shells)",
    "Java",
    "C#",
    "C++",
    "C",
];

/// Answers submitted through the salary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryProfile {
    pub education: String,
    pub years_experience: u32,
    pub country: String,
    pub work_environment: String,
    #[serde(default)]
    pub has_certification: bool,
    #[serde(default)]
    pub developer_roles: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Option groups offered by the salary form that are not backed by a trained encoder.
#[derive(Debug, Clone)]
pub struct SalaryForm {
    pub work_environment: MultiSelectField,
    pub developer_roles: MultiSelectField,
    pub languages: MultiSelectField,
}

/// Everything a client needs to render the form.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryFormOptions {
    pub education_levels: Vec<String>,
    pub countries: Vec<String>,
    pub work_environments: Vec<String>,
    pub developer_roles: Vec<String>,
    pub languages: Vec<String>,
    pub years_experience: RangeInclusive<u32>,
}

impl SalaryForm {
    pub fn standard() -> Self {
        Self {
            work_environment: MultiSelectField::with_prefix(
                "work environment",
                "Remote",
                WORK_ENVIRONMENTS,
            ),
            developer_roles: MultiSelectField::new("developer role", DEVELOPER_ROLES),
            languages: MultiSelectField::new("language", LANGUAGES),
        }
    }

    pub fn options(
        &self,
        education: &CategoricalField,
        country: &CategoricalField,
    ) -> SalaryFormOptions {
        SalaryFormOptions {
            education_levels: education.labels().to_vec(),
            countries: country.labels().to_vec(),
            work_environments: self.work_environment.options().to_vec(),
            developer_roles: self.developer_roles.options().to_vec(),
            languages: self.languages.options().to_vec(),
            years_experience: 0..=MAX_YEARS_EXPERIENCE,
        }
    }

    /// Encode a profile as
    /// `EdLevel, YearsCodePro, Country, HasCertification, Remote_*, roles..., languages...`.
    pub fn assemble(
        &self,
        education: &CategoricalField,
        country: &CategoricalField,
        profile: &SalaryProfile,
    ) -> Result<FeatureRow, SalaryError> {
        if profile.years_experience > MAX_YEARS_EXPERIENCE {
            return Err(SalaryError::ExperienceOutOfRange(profile.years_experience));
        }

        let row = FeatureAssembler::new()
            .code("EdLevel", education, &profile.education)?
            .scalar("YearsCodePro", f64::from(profile.years_experience))?
            .code("Country", country, &profile.country)?
            .flag("HasCertification", profile.has_certification)?
            .flags(
                &self.work_environment,
                std::slice::from_ref(&profile.work_environment),
            )?
            .flags(&self.developer_roles, &profile.developer_roles)?
            .flags(&self.languages, &profile.languages)?
            .finish();

        Ok(row)
    }
}
