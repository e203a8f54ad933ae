mod media;
mod view;

pub use media::{FacingMode, MediaDevices, MediaError, MediaStream};
pub use view::View;
