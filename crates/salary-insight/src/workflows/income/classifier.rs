use serde::Serialize;
use tracing::info;

use super::form::{IncomeError, IncomeForm, IncomeFormOptions, IncomeProfile};
use crate::features::FeatureRow;

/// Income bracket reported by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IncomeClass {
    #[serde(rename = "<=50K")]
    AtMostFiftyThousand,
    #[serde(rename = ">50K")]
    AboveFiftyThousand,
}

impl IncomeClass {
    pub fn label(self) -> &'static str {
        match self {
            IncomeClass::AtMostFiftyThousand => "<=50K",
            IncomeClass::AboveFiftyThousand => ">50K",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            IncomeClass::AtMostFiftyThousand => 0,
            IncomeClass::AboveFiftyThousand => 1,
        }
    }
}

/// `>50K` exactly when education level exceeds 9 and weekly hours exceed 40.
pub fn threshold_rule(education_num: u32, hours_per_week: u32) -> IncomeClass {
    if education_num > 9 && hours_per_week > 40 {
        IncomeClass::AboveFiftyThousand
    } else {
        IncomeClass::AtMostFiftyThousand
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeClassification {
    pub class: IncomeClass,
    pub prediction: u8,
    pub message: String,
    pub features: FeatureRow,
    pub recap: Vec<String>,
}

impl IncomeClassification {
    pub fn render(&self) -> String {
        let mut out = format!("{}\n\nBased on:\n", self.message);
        for line in &self.recap {
            out.push_str("- ");
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

pub struct IncomeClassifier {
    form: IncomeForm,
}

impl IncomeClassifier {
    pub fn new(form: IncomeForm) -> Self {
        Self { form }
    }

    /// Classifier over the built-in census answer tables.
    pub fn standard() -> Result<Self, IncomeError> {
        Ok(Self::new(IncomeForm::standard()?))
    }

    pub fn options(&self) -> IncomeFormOptions {
        self.form.options()
    }

    pub fn classify(&self, profile: &IncomeProfile) -> Result<IncomeClassification, IncomeError> {
        let features = self.form.assemble(profile)?;
        let class = threshold_rule(profile.education_num, profile.hours_per_week);
        info!(
            education_num = profile.education_num,
            hours_per_week = profile.hours_per_week,
            class = class.label(),
            "income bracket classified"
        );

        Ok(IncomeClassification {
            class,
            prediction: class.code(),
            message: format!("Predicted Salary Class: {}", class.label()),
            features,
            recap: recap(profile),
        })
    }
}

fn recap(profile: &IncomeProfile) -> Vec<String> {
    vec![
        format!("Age: {}", profile.age),
        format!("Education Level (Numeric): {}", profile.education_num),
        format!("Capital Gain: {}", profile.capital_gain),
        format!("Capital Loss: {}", profile.capital_loss),
        format!("Hours per Week: {}", profile.hours_per_week),
        format!("Workclass: {}", profile.workclass),
        format!("Marital Status: {}", profile.marital_status),
        format!("Occupation: {}", profile.occupation),
        format!("Relationship: {}", profile.relationship),
        format!("Race: {}", profile.race),
        format!("Sex: {}", profile.sex),
        format!("Native Country: {}", profile.native_country),
    ]
}
