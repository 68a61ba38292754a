//! Category entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Category;

/// Database row mapping for the categories table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryEntity {
    pub id: Uuid,
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryEntity> for Category {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            label: entity.label,
            description: entity.description,
            color: entity.color,
            icon: entity.icon,
            is_active: entity.is_active,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_preserves_fields() {
        let entity = CategoryEntity {
            id: Uuid::new_v4(),
            name: "workplace-safety".into(),
            label: "Workplace Safety".into(),
            description: Some("Hazards and safety concerns".into()),
            color: "#ef4444".into(),
            icon: "shield".into(),
            is_active: true,
            sort_order: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let category: Category = entity.clone().into();
        assert_eq!(category.id, entity.id);
        assert_eq!(category.name, "workplace-safety");
        assert_eq!(category.sort_order, 2);
        assert!(category.is_active);
    }
}
