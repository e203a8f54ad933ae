mod capture_service;

pub use capture_service::{CaptureOutcome, CaptureService};
