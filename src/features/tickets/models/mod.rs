mod severity;
mod ticket;

pub use severity::{SeverityLevel, SeverityPresentation};
pub use ticket::{Category, ConfidenceLevel, Coordinates, Ticket, TicketDraft, TicketId};
