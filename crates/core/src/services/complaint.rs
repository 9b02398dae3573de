//! Complaint service: intake, lookup, listings and administrative updates.

use aduan_common::{AppError, AppResult, config::ListingConfig};
use aduan_db::{
    entities::{complaint, user},
    repositories::{ComplaintFilter, ComplaintRepository, ComplaintSummary},
};
use sea_orm::{NotSet, Set};
use serde::Serialize;

use crate::{
    lifecycle,
    listing::{Page, page_index},
    stats::{CategoryCounts, PublicStatusCounts, StatusCounts},
    validation::{IntakeInput, UpdateInput, validate_intake, validate_update},
};

pub use aduan_db::entities::complaint::{ComplaintCategory, ComplaintPriority, ComplaintStatus};

/// Public listing: summaries plus resident-facing totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicListing {
    pub complaints: Page<ComplaintSummary>,
    pub stats: PublicStatusCounts,
}

/// Administrative dashboard: full records plus full statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminListing {
    pub complaints: Page<complaint::Model>,
    pub stats: StatusCounts,
    pub category_stats: CategoryCounts,
}

/// Complaint service.
#[derive(Clone)]
pub struct ComplaintService {
    complaint_repo: ComplaintRepository,
    public_per_page: u64,
    admin_per_page: u64,
}

impl ComplaintService {
    /// Create a new complaint service.
    #[must_use]
    pub const fn new(complaint_repo: ComplaintRepository, listing: &ListingConfig) -> Self {
        Self {
            complaint_repo,
            public_per_page: listing.public_per_page,
            admin_per_page: listing.admin_per_page,
        }
    }

    /// File a new complaint.
    ///
    /// New complaints always start `pending` with no resolution time and no
    /// administrator notes.
    pub async fn create(&self, input: IntakeInput) -> AppResult<complaint::Model> {
        let valid = validate_intake(input)?;
        let now = chrono::Utc::now();

        let model = complaint::ActiveModel {
            id: NotSet,
            title: Set(valid.title),
            description: Set(valid.description),
            location: Set(valid.location),
            category: Set(valid.category),
            priority: Set(valid.priority),
            status: Set(ComplaintStatus::Pending),
            reporter_name: Set(valid.reporter_name),
            reporter_email: Set(valid.reporter_email),
            reporter_phone: Set(valid.reporter_phone),
            admin_notes: Set(None),
            resolved_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = self.complaint_repo.create(model).await?;

        tracing::info!(
            complaint_id = created.id,
            category = created.category.as_str(),
            priority = created.priority.as_str(),
            "Complaint filed"
        );

        Ok(created)
    }

    /// Get a complaint by ID. Any complaint is visible to anyone.
    pub async fn get(&self, id: i64) -> AppResult<complaint::Model> {
        self.complaint_repo.get_by_id(id).await
    }

    /// Newest-first public listing.
    ///
    /// `page` is one-based; `None` or zero means the first page.
    pub async fn list_public(&self, page: Option<u64>) -> AppResult<PublicListing> {
        let index = page_index(page);
        let (items, total) = self
            .complaint_repo
            .find_summaries_page(index, self.public_per_page)
            .await?;
        let stats = StatusCounts::tally(self.complaint_repo.count_by_status().await?);

        Ok(PublicListing {
            complaints: Page::new(items, index, self.public_per_page, total),
            stats: stats.public(),
        })
    }

    /// Newest-first administrative listing with full statistics.
    ///
    /// The filter narrows the listing only; statistics always cover every
    /// complaint.
    pub async fn list_admin(
        &self,
        actor: &user::Model,
        page: Option<u64>,
        filter: ComplaintFilter,
    ) -> AppResult<AdminListing> {
        require_admin(actor)?;

        let index = page_index(page);
        let (items, total) = self
            .complaint_repo
            .find_page(filter, index, self.admin_per_page)
            .await?;
        let stats = StatusCounts::tally(self.complaint_repo.count_by_status().await?);
        let category_stats = CategoryCounts::tally(self.complaint_repo.count_by_category().await?);

        Ok(AdminListing {
            complaints: Page::new(items, index, self.admin_per_page, total),
            stats,
            category_stats,
        })
    }

    /// Load a complaint for the administrative edit form.
    pub async fn edit(&self, actor: &user::Model, id: i64) -> AppResult<complaint::Model> {
        require_admin(actor)?;
        self.complaint_repo.get_by_id(id).await
    }

    /// Change status, priority and notes of a complaint.
    ///
    /// Nothing is written unless the whole update is valid. Concurrent
    /// updates to one complaint are last-write-wins.
    pub async fn update(
        &self,
        actor: &user::Model,
        id: i64,
        input: UpdateInput,
    ) -> AppResult<complaint::Model> {
        require_admin(actor)?;

        let current = self.complaint_repo.get_by_id(id).await?;
        let valid = validate_update(input)?;

        let now = chrono::Utc::now().into();
        let resolved_at =
            lifecycle::next_resolved_at(current.status, current.resolved_at, valid.status, now);
        let previous = current.status;

        let mut active: complaint::ActiveModel = current.into();
        active.status = Set(valid.status);
        active.priority = Set(valid.priority);
        active.admin_notes = Set(valid.admin_notes);
        active.resolved_at = Set(resolved_at);
        active.updated_at = Set(now);

        let updated = self.complaint_repo.update(active).await?;

        tracing::info!(
            complaint_id = updated.id,
            admin_id = %actor.id,
            from = previous.as_str(),
            to = updated.status.as_str(),
            "Complaint updated"
        );

        Ok(updated)
    }
}

fn require_admin(actor: &user::Model) -> AppResult<()> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ))
    }
}
