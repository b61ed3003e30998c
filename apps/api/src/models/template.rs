use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvTemplateRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub content: Value,
    pub preview_image: Option<String>,
    pub is_active: bool,
    pub is_premium: bool,
    pub display_order: i32,
    pub usage_count: i64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub content: Option<Value>,
    pub preview_image: Option<String>,
    pub is_active: Option<bool>,
    pub is_premium: Option<bool>,
    pub display_order: Option<i32>,
    pub category: Option<String>,
}

/// Partial update: `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub template_type: Option<String>,
    pub content: Option<Value>,
    pub preview_image: Option<String>,
    pub is_active: Option<bool>,
    pub is_premium: Option<bool>,
    pub display_order: Option<i32>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    pub active: Option<bool>,
    pub template_type: Option<String>,
    pub category: Option<String>,
    pub premium: Option<bool>,
}
