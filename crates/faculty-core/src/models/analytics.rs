use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Site-wide counters shown on the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AnalyticsSnapshot {
    pub page_views: i64,
    pub unique_visitors: i64,
    pub total_announcements: i64,
    pub total_courses: i64,
    pub total_publications: i64,
    pub total_gallery_items: i64,
    pub total_students: i64,
    pub active_students: i64,
    pub total_homeworks: i64,
    pub last_updated: DateTime<Utc>,
}
