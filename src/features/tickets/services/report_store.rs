use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::features::tickets::models::{Ticket, TicketId};

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReceipt {
    pub ticket: Ticket,
    /// User-facing transmission notice naming the receiving department
    pub notice: String,
}

impl DispatchReceipt {
    fn for_ticket(ticket: Ticket) -> Self {
        let notice = format!(
            "TRANSMITTED: Resource dispatched to {}.",
            ticket.suggested_department
        );
        Self { ticket, notice }
    }
}

/// Pending and dispatched ticket collections, newest first
///
/// `add_pending`, `discard`, `dispatch` and `purge` are the only mutators. A
/// ticket lives in at most one collection; removal never reorders the rest.
#[derive(Debug, Default)]
pub struct ReportStore {
    pending: VecDeque<Ticket>,
    dispatched: VecDeque<Ticket>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> impl ExactSizeIterator<Item = &Ticket> {
        self.pending.iter()
    }

    pub fn dispatched(&self) -> impl ExactSizeIterator<Item = &Ticket> {
        self.dispatched.iter()
    }

    pub fn find_pending(&self, id: TicketId) -> Option<&Ticket> {
        self.pending.iter().find(|t| t.id == id)
    }

    pub fn find_dispatched(&self, id: TicketId) -> Option<&Ticket> {
        self.dispatched.iter().find(|t| t.id == id)
    }

    /// Insert at the head of the pending queue. Duplicate ids are not checked.
    pub fn add_pending(&mut self, ticket: Ticket) {
        self.pending.push_front(ticket);
    }

    /// Remove the first pending ticket with this id
    pub fn discard(&mut self, id: TicketId) -> Option<Ticket> {
        remove_first(&mut self.pending, id)
    }

    /// Move a pending ticket to the head of the dispatched collection.
    ///
    /// `dispatched_at` is never earlier than the ticket's creation time.
    pub fn dispatch(&mut self, id: TicketId, now: DateTime<Utc>) -> Option<DispatchReceipt> {
        let mut ticket = remove_first(&mut self.pending, id)?;
        ticket.dispatched_at = Some(now.max(ticket.created_at));
        self.dispatched.push_front(ticket.clone());
        Some(DispatchReceipt::for_ticket(ticket))
    }

    /// Remove a dispatched ticket
    pub fn purge(&mut self, id: TicketId) -> Option<Ticket> {
        remove_first(&mut self.dispatched, id)
    }
}

fn remove_first(collection: &mut VecDeque<Ticket>, id: TicketId) -> Option<Ticket> {
    let index = collection.iter().position(|t| t.id == id)?;
    collection.remove(index)
}
