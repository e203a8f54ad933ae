mod media_devices;
mod view_controller;
mod view_service;

pub use media_devices::HeadlessMediaDevices;
pub use view_controller::ViewController;
pub use view_service::ViewService;
