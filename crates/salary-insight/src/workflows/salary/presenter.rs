use serde::Serialize;

use super::currency::Currency;
use super::form::{SalaryForm, SalaryProfile};

/// Final salary figure with its local-currency conversion and input recap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryEstimate {
    pub raw_prediction_usd: f64,
    pub salary_usd: f64,
    pub floor_applied: bool,
    pub currency_code: String,
    pub exchange_rate: f64,
    pub salary_local: f64,
    pub display_usd: String,
    pub display_local: String,
    pub recap: SalaryRecap,
}

/// Inputs that produced an estimate, as the respondent entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryRecap {
    pub education: String,
    pub years_experience: u32,
    pub country: String,
    pub work_environment: String,
    pub has_certification: bool,
    pub developer_roles: Vec<String>,
    pub languages: Vec<String>,
}

impl SalaryRecap {
    pub fn from_profile(form: &SalaryForm, profile: &SalaryProfile) -> Self {
        Self {
            education: profile.education.clone(),
            years_experience: profile.years_experience,
            country: profile.country.clone(),
            work_environment: profile.work_environment.clone(),
            has_certification: profile.has_certification,
            developer_roles: owned(form.developer_roles.selected_labels(&profile.developer_roles)),
            languages: owned(form.languages.selected_labels(&profile.languages)),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Education Level: {}", self.education),
            format!("Experience: {} years", self.years_experience),
            format!("Country: {}", self.country),
            format!("Remote Work Preference: {}", self.work_environment),
            format!(
                "Certifications: {}",
                if self.has_certification { "Yes" } else { "No" }
            ),
            format!("Developer Roles: {}", join_or_none(&self.developer_roles)),
            format!("Languages Used: {}", join_or_none(&self.languages)),
        ]
    }
}

impl SalaryEstimate {
    pub fn new(
        raw_prediction_usd: f64,
        salary_usd: f64,
        currency: Currency,
        recap: SalaryRecap,
    ) -> Self {
        let salary_local = currency.convert(salary_usd);
        Self {
            raw_prediction_usd,
            salary_usd,
            floor_applied: salary_usd > raw_prediction_usd,
            display_usd: format!("${}", format_amount(salary_usd)),
            display_local: format!("{} {}", currency.code, format_amount(salary_local)),
            currency_code: currency.code,
            exchange_rate: currency.rate,
            salary_local,
            recap,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Estimated Salary Prediction\n");
        out.push_str(&format!("USD: {}\n", self.display_usd));
        out.push_str(&format!("{}: {}\n", self.currency_code, self.display_local));
        out.push_str("\nWhy this salary?\nThis estimate is based on:\n");
        for line in self.recap.lines() {
            out.push_str("- ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn owned(labels: Vec<&str>) -> Vec<String> {
    labels.into_iter().map(str::to_string).collect()
}

fn join_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "None".to_string()
    } else {
        labels.join(", ")
    }
}

/// Two decimals with comma thousands separators, e.g. `1,234,567.89`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
