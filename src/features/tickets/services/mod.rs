mod confidence;
mod id_generator;
mod report_store;
mod ticket_service;

pub use confidence::normalize_confidence;
pub use id_generator::TicketIdGenerator;
pub use report_store::{DispatchReceipt, ReportStore};
pub use ticket_service::TicketService;
