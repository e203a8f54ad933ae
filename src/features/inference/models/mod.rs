mod classification;
mod image_payload;

pub use classification::RawClassification;
pub use image_payload::ImagePayload;
