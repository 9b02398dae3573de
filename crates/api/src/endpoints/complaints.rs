//! Complaint endpoints.

use aduan_common::AppResult;
use aduan_core::{
    PublicListing,
    listing::Page,
    stats::PublicStatusCounts,
    validation::{IntakeInput, UpdateInput},
};
use aduan_db::{entities::complaint, repositories::ComplaintSummary};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, Created},
};

/// Confirmation after a resident files a complaint.
pub const CREATED_MESSAGE: &str =
    "Laporan berhasil dikirim. Kami akan segera menindaklanjuti laporan Anda.";

/// Confirmation after an administrator updates a complaint.
pub const UPDATED_MESSAGE: &str = "Status laporan berhasil diperbarui.";

/// Full complaint record.
#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub category_display: &'static str,
    pub priority: String,
    pub priority_display: &'static str,
    pub status: String,
    pub status_display: &'static str,
    pub reporter_name: String,
    pub reporter_email: String,
    pub reporter_phone: Option<String>,
    pub admin_notes: Option<String>,
    pub resolved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<complaint::Model> for ComplaintResponse {
    fn from(c: complaint::Model) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            location: c.location,
            category: c.category.as_str().to_string(),
            category_display: c.category.display_name(),
            priority: c.priority.as_str().to_string(),
            priority_display: c.priority.display_name(),
            status: c.status.as_str().to_string(),
            status_display: c.status.display_name(),
            reporter_name: c.reporter_name,
            reporter_email: c.reporter_email,
            reporter_phone: c.reporter_phone,
            admin_notes: c.admin_notes,
            resolved_at: c.resolved_at.map(|t| t.to_rfc3339()),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Public list item. Carries no description, contact details or notes.
#[derive(Debug, Serialize)]
pub struct ComplaintSummaryResponse {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub category: String,
    pub category_display: &'static str,
    pub status: String,
    pub status_display: &'static str,
    pub created_at: String,
}

impl From<ComplaintSummary> for ComplaintSummaryResponse {
    fn from(c: ComplaintSummary) -> Self {
        Self {
            id: c.id,
            title: c.title,
            location: c.location,
            category: c.category.as_str().to_string(),
            category_display: c.category.display_name(),
            status: c.status.as_str().to_string(),
            status_display: c.status.display_name(),
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Public listing response.
#[derive(Debug, Serialize)]
pub struct PublicListResponse {
    pub complaints: Page<ComplaintSummaryResponse>,
    pub stats: PublicStatusCounts,
}

impl From<PublicListing> for PublicListResponse {
    fn from(listing: PublicListing) -> Self {
        Self {
            complaints: listing.complaints.map(Into::into),
            stats: listing.stats,
        }
    }
}

/// One-based page selector.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<PublicListResponse>> {
    let listing = state.complaint_service.list_public(query.page).await?;
    Ok(ApiResponse::ok(listing.into()))
}

async fn create(
    State(state): State<AppState>,
    Json(input): Json<IntakeInput>,
) -> AppResult<Created<ComplaintResponse>> {
    let complaint = state.complaint_service.create(input).await?;

    Ok(Created {
        location: format!("/api/complaints/{}", complaint.id),
        body: ApiResponse::with_message(complaint.into(), CREATED_MESSAGE),
    })
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ComplaintResponse>> {
    let complaint = state.complaint_service.get(id).await?;
    Ok(ApiResponse::ok(complaint.into()))
}

async fn edit(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ComplaintResponse>> {
    let complaint = state.complaint_service.edit(&admin, id).await?;
    Ok(ApiResponse::ok(complaint.into()))
}

async fn update(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateInput>,
) -> AppResult<ApiResponse<ComplaintResponse>> {
    let complaint = state.complaint_service.update(&admin, id, input).await?;
    Ok(ApiResponse::with_message(complaint.into(), UPDATED_MESSAGE))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update))
        .route("/{id}/edit", get(edit))
}
