//! Developer salary estimation from a survey-style profile.
//!
//! Profiles are encoded with the label encoders shipped alongside the model,
//! aligned to the model's feature columns, scored by the linear model, clamped
//! to a floor, and converted into the respondent's local currency.

pub mod currency;
pub mod estimator;
pub mod form;
pub mod presenter;
pub mod router;

pub use currency::{Currency, CurrencyError, CurrencyTable};
pub use estimator::{apply_floor, SalaryError, SalaryEstimator, SALARY_FLOOR_USD};
pub use form::{SalaryForm, SalaryFormOptions, SalaryProfile, MAX_YEARS_EXPERIENCE};
pub use presenter::{format_amount, SalaryEstimate, SalaryRecap};
pub use router::salary_router;
