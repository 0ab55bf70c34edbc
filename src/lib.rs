//! Rationale Wizard
//!
//! A step-by-step wizard that collects governance rationale inputs and
//! assembles them into a JSON-LD metadata document.

pub mod cli;
pub mod core;
pub mod document;
pub mod schema;
