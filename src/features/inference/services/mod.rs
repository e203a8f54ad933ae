mod geolocation;
mod inference_gateway;
mod prompt;

pub use geolocation::{locate_or_default, ClientReportedLocation, GeolocationProvider};
pub use inference_gateway::InferenceGateway;
pub use prompt::render_inspector_prompt;
