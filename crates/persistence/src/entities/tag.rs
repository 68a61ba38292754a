//! Tag entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Tag;

/// Database row mapping for the tags table.
#[derive(Debug, Clone, FromRow)]
pub struct TagEntity {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<TagEntity> for Tag {
    fn from(entity: TagEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            color: entity.color,
            is_active: entity.is_active,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
        }
    }
}
