//! Rule-based income bracket classification over census-style answers.
//!
//! No trained model backs this workflow: the answers are encoded into the
//! twelve-column census layout for transparency, and the bracket comes from a
//! fixed threshold on education level and weekly hours.

pub mod classifier;
pub mod form;
pub mod router;

pub use classifier::{threshold_rule, IncomeClass, IncomeClassification, IncomeClassifier};
pub use form::{IncomeError, IncomeForm, IncomeFormOptions, IncomeProfile};
pub use router::income_router;
