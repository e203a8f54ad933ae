use chrono::Utc;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::error::{AppError, Result};
use crate::features::archive::TicketArchive;
use crate::features::tickets::models::{Ticket, TicketDraft, TicketId};
use crate::features::tickets::services::{DispatchReceipt, ReportStore, TicketIdGenerator};

/// Service owning the report store and the ticket lifecycle
///
/// Store mutations run inside one write-lock section with no await point, so
/// each of them is atomic with respect to concurrent requests.
pub struct TicketService {
    store: RwLock<ReportStore>,
    ids: TicketIdGenerator,
    archive: Option<Arc<dyn TicketArchive>>,
}

impl TicketService {
    pub fn new(archive: Option<Arc<dyn TicketArchive>>) -> Self {
        Self {
            store: RwLock::new(ReportStore::new()),
            ids: TicketIdGenerator::new(),
            archive,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ReportStore>> {
        self.store
            .read()
            .map_err(|_| AppError::Internal("Report store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ReportStore>> {
        self.store
            .write()
            .map_err(|_| AppError::Internal("Report store lock poisoned".to_string()))
    }

    /// Run a read-only query against the store
    pub fn inspect<R>(&self, f: impl FnOnce(&ReportStore) -> R) -> Result<R> {
        Ok(f(&*self.read()?))
    }

    pub fn list_pending(&self) -> Result<Vec<Ticket>> {
        self.inspect(|store| store.pending().cloned().collect())
    }

    pub fn list_dispatched(&self) -> Result<Vec<Ticket>> {
        self.inspect(|store| store.dispatched().cloned().collect())
    }

    /// Look up a ticket in either collection
    pub fn find(&self, id: TicketId) -> Result<Option<Ticket>> {
        self.inspect(|store| {
            store
                .find_pending(id)
                .or_else(|| store.find_dispatched(id))
                .cloned()
        })
    }

    /// Turn a classified draft into a ticket at the head of the pending queue
    pub fn create_pending(&self, draft: TicketDraft, image_url: String) -> Result<Ticket> {
        let now = Utc::now();
        let ticket = Ticket::from_draft(self.ids.next_at(now), draft, image_url, now);

        self.write()?.add_pending(ticket.clone());

        tracing::info!(
            "Ticket created: id={}, category={}, severity={}, confidence={}",
            ticket.id,
            ticket.category,
            ticket.severity_level,
            ticket.confidence_level.value()
        );

        Ok(ticket)
    }

    /// Dispatch a pending ticket; `None` when the id is not pending
    ///
    /// The dispatched ticket is then handed to the archive. Archive failures are
    /// logged and never undo the dispatch.
    pub async fn dispatch(&self, id: TicketId) -> Result<Option<DispatchReceipt>> {
        let receipt = self.write()?.dispatch(id, Utc::now());

        let Some(receipt) = receipt else {
            tracing::debug!("Dispatch ignored, ticket {} is not pending", id);
            return Ok(None);
        };

        tracing::info!("{} (ticket={})", receipt.notice, id);

        if let Some(archive) = &self.archive {
            if let Err(e) = archive.insert(&receipt.ticket).await {
                tracing::warn!("Failed to archive dispatched ticket {}: {}", id, e);
            }
        }

        Ok(Some(receipt))
    }

    /// Discard a pending ticket; `None` when the id is not pending
    pub fn discard(&self, id: TicketId) -> Result<Option<Ticket>> {
        let removed = self.write()?.discard(id);
        if removed.is_some() {
            tracing::info!("Ticket discarded: id={}", id);
        }
        Ok(removed)
    }

    /// Purge a dispatched ticket; `None` when the id is not dispatched
    pub fn purge(&self, id: TicketId) -> Result<Option<Ticket>> {
        let removed = self.write()?.purge(id);
        if removed.is_some() {
            tracing::info!("Dispatched ticket purged: id={}", id);
        }
        Ok(removed)
    }
}
