//! Complaint entity.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string that does not name any variant of a complaint enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// Infrastructure domain of a complaint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    #[sea_orm(string_value = "road")]
    Road,
    #[sea_orm(string_value = "water")]
    Water,
    #[sea_orm(string_value = "electricity")]
    Electricity,
    #[sea_orm(string_value = "bridge")]
    Bridge,
    #[sea_orm(string_value = "drainage")]
    Drainage,
    #[sea_orm(string_value = "public_facility")]
    PublicFacility,
    #[sea_orm(string_value = "other")]
    Other,
}

impl ComplaintCategory {
    /// Every category, in form order.
    pub const ALL: [Self; 7] = [
        Self::Road,
        Self::Water,
        Self::Electricity,
        Self::Bridge,
        Self::Drainage,
        Self::PublicFacility,
        Self::Other,
    ];

    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Water => "water",
            Self::Electricity => "electricity",
            Self::Bridge => "bridge",
            Self::Drainage => "drainage",
            Self::PublicFacility => "public_facility",
            Self::Other => "other",
        }
    }

    /// Label shown to residents.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Road => "Jalan",
            Self::Water => "Air Bersih",
            Self::Electricity => "Listrik",
            Self::Bridge => "Jembatan",
            Self::Drainage => "Drainase",
            Self::PublicFacility => "Fasilitas Umum",
            Self::Other => "Lainnya",
        }
    }
}

impl FromStr for ComplaintCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Urgency classification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    #[default]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

impl ComplaintPriority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Label shown to residents.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Rendah",
            Self::Medium => "Sedang",
            Self::High => "Tinggi",
            Self::Urgent => "Mendesak",
        }
    }
}

impl FromStr for ComplaintPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Lifecycle stage of a complaint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ComplaintStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Resolved,
        Self::Rejected,
    ];

    /// Wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }

    /// Label shown to residents.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "Menunggu",
            Self::InProgress => "Sedang Ditangani",
            Self::Resolved => "Selesai",
            Self::Rejected => "Ditolak",
        }
    }
}

impl FromStr for ComplaintStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Complaint model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub category: ComplaintCategory,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    pub reporter_name: String,
    pub reporter_email: String,
    #[sea_orm(nullable)]
    pub reporter_phone: Option<String>,
    /// Notes from the village administration.
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,
    /// When the complaint most recently entered `resolved`.
    #[sea_orm(nullable)]
    pub resolved_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
