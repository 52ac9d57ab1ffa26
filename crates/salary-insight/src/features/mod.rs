//! Encoding form answers into model-ready feature rows.
//!
//! Categorical answers become integer codes, checkbox groups become one flag
//! column per option, and the assembled row is realigned by column name to the
//! schema a model was fitted against.

mod assembler;
mod encoding;
mod schema;

pub use assembler::{FeatureAssembler, FeatureError, FeatureRow};
pub use encoding::{CategoricalField, MultiSelectField, UnknownCategoryError};
pub use schema::{Alignment, ModelSchema};
