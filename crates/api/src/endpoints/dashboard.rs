//! Administrative dashboard endpoint.

use aduan_common::{AppError, AppResult};
use aduan_core::{
    AdminListing,
    listing::Page,
    stats::{CategoryCounts, StatusCounts},
};
use aduan_db::{
    entities::complaint::{ComplaintCategory, ComplaintStatus},
    repositories::ComplaintFilter,
};
use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::complaints::ComplaintResponse;
use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub page: Option<u64>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl DashboardQuery {
    fn filter(&self) -> AppResult<ComplaintFilter> {
        Ok(ComplaintFilter {
            status: parse_filter::<ComplaintStatus>("status", self.status.as_deref())?,
            category: parse_filter::<ComplaintCategory>("category", self.category.as_deref())?,
        })
    }
}

fn parse_filter<T: std::str::FromStr>(name: &str, value: Option<&str>) -> AppResult<Option<T>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Unknown {name} filter: {v}"))),
    }
}

/// Dashboard response.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub complaints: Page<ComplaintResponse>,
    pub stats: StatusCounts,
    pub category_stats: CategoryCounts,
}

impl From<AdminListing> for DashboardResponse {
    fn from(listing: AdminListing) -> Self {
        Self {
            complaints: listing.complaints.map(Into::into),
            stats: listing.stats,
            category_stats: listing.category_stats,
        }
    }
}

async fn dashboard(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<ApiResponse<DashboardResponse>> {
    let filter = query.filter()?;
    let listing = state
        .complaint_service
        .list_admin(&admin, query.page, filter)
        .await?;

    Ok(ApiResponse::ok(listing.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}
