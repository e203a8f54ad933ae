//! Active view and camera stream ownership

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{HeadlessMediaDevices, ViewService};
