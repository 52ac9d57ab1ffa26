use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::features::{CategoricalField, FeatureAssembler, FeatureError, FeatureRow};

pub const AGE_RANGE: RangeInclusive<u32> = 18..=90;
pub const EDUCATION_RANGE: RangeInclusive<u32> = 1..=16;
pub const HOURS_RANGE: RangeInclusive<u32> = 1..=99;

#[derive(Debug, thiserror::Error)]
pub enum IncomeError {
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Census-style answers collected by the income form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub age: u32,
    pub education_num: u32,
    #[serde(default)]
    pub capital_gain: i64,
    #[serde(default)]
    pub capital_loss: i64,
    pub hours_per_week: u32,
    pub workclass: String,
    pub marital_status: String,
    pub occupation: String,
    pub relationship: String,
    pub race: String,
    pub sex: String,
    pub native_country: String,
}

/// Fixed ordinal tables for the seven categorical census answers.
#[derive(Debug, Clone)]
pub struct IncomeForm {
    pub workclass: CategoricalField,
    pub marital_status: CategoricalField,
    pub occupation: CategoricalField,
    pub relationship: CategoricalField,
    pub race: CategoricalField,
    pub sex: CategoricalField,
    pub native_country: CategoricalField,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeFormOptions {
    pub age: RangeInclusive<u32>,
    pub education_num: RangeInclusive<u32>,
    pub hours_per_week: RangeInclusive<u32>,
    pub workclass: Vec<String>,
    pub marital_status: Vec<String>,
    pub occupation: Vec<String>,
    pub relationship: Vec<String>,
    pub race: Vec<String>,
    pub sex: Vec<String>,
    pub native_country: Vec<String>,
}

impl IncomeForm {
    pub fn standard() -> Result<Self, FeatureError> {
        Ok(Self {
            workclass: CategoricalField::from_table(
                "workclass",
                &[
                    ("Private", 0),
                    ("Self-emp-not-inc", 1),
                    ("Local-gov", 2),
                    ("State-gov", 3),
                    ("Other", 4),
                ],
            )?,
            marital_status: CategoricalField::from_table(
                "marital_status",
                &[
                    ("Never-married", 0),
                    ("Married-civ-spouse", 1),
                    ("Divorced", 2),
                    ("Other", 3),
                ],
            )?,
            occupation: CategoricalField::from_table(
                "occupation",
                &[
                    ("Tech-support", 0),
                    ("Craft-repair", 1),
                    ("Other-service", 2),
                    ("Exec-managerial", 3),
                    ("Other", 4),
                ],
            )?,
            relationship: CategoricalField::from_table(
                "relationship",
                &[
                    ("Not-in-family", 0),
                    ("Husband", 1),
                    ("Wife", 2),
                    ("Own-child", 3),
                    ("Other", 4),
                ],
            )?,
            race: CategoricalField::from_table(
                "race",
                &[
                    ("White", 0),
                    ("Black", 1),
                    ("Asian-Pac-Islander", 2),
                    ("Other", 3),
                ],
            )?,
            sex: CategoricalField::from_table("sex", &[("Male", 0), ("Female", 1)])?,
            native_country: CategoricalField::from_table(
                "native_country",
                &[
                    ("United-States", 0),
                    ("India", 1),
                    ("Philippines", 2),
                    ("Other", 3),
                ],
            )?,
        })
    }

    pub fn options(&self) -> IncomeFormOptions {
        IncomeFormOptions {
            age: AGE_RANGE,
            education_num: EDUCATION_RANGE,
            hours_per_week: HOURS_RANGE,
            workclass: self.workclass.labels().to_vec(),
            marital_status: self.marital_status.labels().to_vec(),
            occupation: self.occupation.labels().to_vec(),
            relationship: self.relationship.labels().to_vec(),
            race: self.race.labels().to_vec(),
            sex: self.sex.labels().to_vec(),
            native_country: self.native_country.labels().to_vec(),
        }
    }

    /// Encode the answers into the twelve census columns, numeric fields first.
    pub fn assemble(&self, profile: &IncomeProfile) -> Result<FeatureRow, IncomeError> {
        check_range("age", profile.age, AGE_RANGE)?;
        check_range("education_num", profile.education_num, EDUCATION_RANGE)?;
        check_range("hours_per_week", profile.hours_per_week, HOURS_RANGE)?;

        let row = FeatureAssembler::new()
            .scalar("age", f64::from(profile.age))?
            .scalar("education_num", f64::from(profile.education_num))?
            .scalar("capital_gain", profile.capital_gain as f64)?
            .scalar("capital_loss", profile.capital_loss as f64)?
            .scalar("hours_per_week", f64::from(profile.hours_per_week))?
            .code("workclass", &self.workclass, &profile.workclass)?
            .code("marital_status", &self.marital_status, &profile.marital_status)?
            .code("occupation", &self.occupation, &profile.occupation)?
            .code("relationship", &self.relationship, &profile.relationship)?
            .code("race", &self.race, &profile.race)?
            .code("sex", &self.sex, &profile.sex)?
            .code("native_country", &self.native_country, &profile.native_country)?
            .finish();

        Ok(row)
    }
}

fn check_range(
    field: &'static str,
    value: u32,
    range: RangeInclusive<u32>,
) -> Result<(), IncomeError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(IncomeError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
