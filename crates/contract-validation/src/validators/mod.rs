//! Built-in predicates for common validation scenarios

pub mod custom;
pub mod length;
pub mod numeric;
pub mod pattern;

pub use custom::CustomValidator;
pub use length::LengthValidator;
pub use numeric::{Comparison, NumericValidator};
pub use pattern::PatternValidator;
