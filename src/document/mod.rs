//! Document building: output model, profile strategies, builder and review

pub mod builder;
pub mod model;
pub mod profile;
pub mod review;

pub use builder::DocumentBuilder;
pub use model::MetadataDocument;
pub use review::ReviewProjection;
