//! CLI command implementations

pub mod check;
pub mod completions;
pub mod generate;
pub mod new;
pub mod review;
pub mod schema;
