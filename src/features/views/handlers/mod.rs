mod view_handler;

pub use view_handler::*;
