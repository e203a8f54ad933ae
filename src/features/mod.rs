pub mod archive;
pub mod capture;
pub mod dashboard;
pub mod inference;
pub mod tickets;
pub mod views;
