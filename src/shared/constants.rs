/// Maximum accepted image size for capture and upload (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// MIME type assumed when an image arrives as raw base64 without a data URI prefix
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Display text for a ticket without listed risks
pub const NEGLIGIBLE_RISKS: &str = "Negligible";

/// Maximum number of characters of raw model output written to debug logs
pub const LOG_PREVIEW_CHARS: usize = 500;
