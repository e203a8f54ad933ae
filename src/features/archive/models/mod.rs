mod archived_ticket;

pub use archived_ticket::ArchivedTicket;
