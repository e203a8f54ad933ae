use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::archive::dtos::ArchiveSnapshotDto;
use crate::features::archive::models::ArchivedTicket;
use crate::features::tickets::models::Ticket;

/// Persistence collaborator for dispatched tickets
#[async_trait]
pub trait TicketArchive: Send + Sync {
    async fn insert(&self, ticket: &Ticket) -> Result<()>;

    async fn select_all(&self) -> Result<Vec<ArchivedTicket>>;
}

/// Postgres-backed ticket archive
pub struct PgTicketArchive {
    pool: PgPool,
}

impl PgTicketArchive {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketArchive for PgTicketArchive {
    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        let row = ArchivedTicket::from(ticket);

        sqlx::query(
            r#"
            INSERT INTO tickets (
                id, detected_issue, category, severity_level, reason_for_severity,
                possible_risks, suggested_department, confidence_level, image_url,
                latitude, longitude, analyzed_by, created_at, dispatched_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(row.id)
        .bind(&row.detected_issue)
        .bind(&row.category)
        .bind(&row.severity_level)
        .bind(&row.reason_for_severity)
        .bind(&row.possible_risks)
        .bind(&row.suggested_department)
        .bind(row.confidence_level)
        .bind(&row.image_url)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(&row.analyzed_by)
        .bind(row.created_at)
        .bind(row.dispatched_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to archive ticket {}: {:?}", row.id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Ticket archived: id={}", row.id);
        Ok(())
    }

    async fn select_all(&self) -> Result<Vec<ArchivedTicket>> {
        sqlx::query_as::<_, ArchivedTicket>(
            r#"
            SELECT
                id, detected_issue, category, severity_level, reason_for_severity,
                possible_risks, suggested_department, confidence_level, image_url,
                latitude, longitude, analyzed_by, created_at, dispatched_at
            FROM tickets
            ORDER BY dispatched_at DESC NULLS LAST, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch archived tickets: {:?}", e);
            AppError::Database(e)
        })
    }
}

/// Read side of the archive
///
/// A failed fetch is reported as a state in the snapshot, not as an error.
pub struct ArchiveService {
    archive: Option<Arc<dyn TicketArchive>>,
}

impl ArchiveService {
    pub fn new(archive: Option<Arc<dyn TicketArchive>>) -> Self {
        Self { archive }
    }

    pub async fn snapshot(&self) -> ArchiveSnapshotDto {
        let Some(archive) = &self.archive else {
            return ArchiveSnapshotDto::disabled();
        };

        match archive.select_all().await {
            Ok(tickets) => ArchiveSnapshotDto::ok(tickets),
            Err(e) => {
                tracing::warn!("Archive fetch failed: {}", e);
                ArchiveSnapshotDto::fetch_error(e.to_string())
            }
        }
    }
}
