//! Complaint repository.

use std::sync::Arc;

use crate::entities::{
    Complaint,
    complaint::{self, ComplaintCategory, ComplaintStatus},
};
use aduan_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::Serialize;

/// Public list projection of a complaint.
///
/// Carries no reporter contact details, description or administrator notes.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct ComplaintSummary {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub category: ComplaintCategory,
    pub status: ComplaintStatus,
    pub created_at: sea_orm::prelude::DateTimeWithTimeZone,
}

/// Filters accepted by the administrative listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
    pub category: Option<ComplaintCategory>,
}

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: ComplaintStatus,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CategoryCount {
    category: ComplaintCategory,
    count: i64,
}

/// Complaint repository for database operations.
#[derive(Clone)]
pub struct ComplaintRepository {
    db: Arc<DatabaseConnection>,
}

fn db_err(e: DbErr) -> AppError {
    AppError::Database(e.to_string())
}

/// Newest first; ties on `created_at` fall back to the id so pages are stable.
fn newest_first(query: Select<Complaint>) -> Select<Complaint> {
    query
        .order_by_desc(complaint::Column::CreatedAt)
        .order_by_desc(complaint::Column::Id)
}

/// Whether zero-based `page` holds any of `total` items.
///
/// Pages past the end are never fetched, so the offset `page * per_page`
/// stays below `total + per_page`.
fn page_in_range(page: u64, per_page: u64, total: u64) -> bool {
    page < total.div_ceil(per_page.max(1))
}

impl ComplaintRepository {
    /// Create a new complaint repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a new complaint.
    pub async fn create(&self, model: complaint::ActiveModel) -> AppResult<complaint::Model> {
        model.insert(self.db.as_ref()).await.map_err(db_err)
    }

    /// Find a complaint by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<complaint::Model>> {
        Complaint::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a complaint by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<complaint::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::ComplaintNotFound(id))
    }

    /// Update a complaint.
    pub async fn update(&self, model: complaint::ActiveModel) -> AppResult<complaint::Model> {
        model.update(self.db.as_ref()).await.map_err(db_err)
    }

    /// One page of the public projection, newest first.
    ///
    /// `page` is zero-based. Returns the page items and the total item count.
    /// A page past the end is empty.
    pub async fn find_summaries_page(
        &self,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<ComplaintSummary>, u64)> {
        let paginator = newest_first(Complaint::find())
            .select_only()
            .columns([
                complaint::Column::Id,
                complaint::Column::Title,
                complaint::Column::Location,
                complaint::Column::Category,
                complaint::Column::Status,
                complaint::Column::CreatedAt,
            ])
            .into_model::<ComplaintSummary>()
            .paginate(self.db.as_ref(), per_page);

        let total = paginator.num_items().await.map_err(db_err)?;
        if !page_in_range(page, per_page, total) {
            return Ok((Vec::new(), total));
        }
        let items = paginator.fetch_page(page).await.map_err(db_err)?;

        Ok((items, total))
    }

    /// One page of full complaint records, newest first.
    ///
    /// `page` is zero-based. Returns the page items and the total item count
    /// after filtering. A page past the end is empty.
    pub async fn find_page(
        &self,
        filter: ComplaintFilter,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<complaint::Model>, u64)> {
        let mut query = Complaint::find();

        if let Some(status) = filter.status {
            query = query.filter(complaint::Column::Status.eq(status));
        }
        if let Some(category) = filter.category {
            query = query.filter(complaint::Column::Category.eq(category));
        }

        let paginator = newest_first(query).paginate(self.db.as_ref(), per_page);

        let total = paginator.num_items().await.map_err(db_err)?;
        if !page_in_range(page, per_page, total) {
            return Ok((Vec::new(), total));
        }
        let items = paginator.fetch_page(page).await.map_err(db_err)?;

        Ok((items, total))
    }

    /// Number of complaints per status. Statuses without complaints are absent.
    pub async fn count_by_status(&self) -> AppResult<Vec<(ComplaintStatus, u64)>> {
        let rows = Complaint::find()
            .select_only()
            .column(complaint::Column::Status)
            .column_as(complaint::Column::Id.count(), "count")
            .group_by(complaint::Column::Status)
            .into_model::<StatusCount>()
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| (r.status, r.count.max(0) as u64))
            .collect())
    }

    /// Number of complaints per category. Categories without complaints are absent.
    pub async fn count_by_category(&self) -> AppResult<Vec<(ComplaintCategory, u64)>> {
        let rows = Complaint::find()
            .select_only()
            .column(complaint::Column::Category)
            .column_as(complaint::Column::Id.count(), "count")
            .group_by(complaint::Column::Category)
            .into_model::<CategoryCount>()
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| (r.category, r.count.max(0) as u64))
            .collect())
    }
}
