//! Image classification through the vision model tiers

pub mod models;
pub mod services;

pub use services::InferenceGateway;
