//! Analytics aggregate row mappings.

use chrono::NaiveDate;
use sqlx::FromRow;

use domain::models::{BreakdownEntry, DailyCount, KeywordCount, ModerationStats};

/// A grouped count keyed by a display name.
#[derive(Debug, Clone, FromRow)]
pub struct NameCountEntity {
    pub name: String,
    pub count: i64,
}

impl From<NameCountEntity> for BreakdownEntry {
    fn from(entity: NameCountEntity) -> Self {
        Self {
            name: entity.name,
            value: entity.count,
        }
    }
}

/// Submissions counted per calendar day.
#[derive(Debug, Clone, FromRow)]
pub struct DailyCountEntity {
    pub date: NaiveDate,
    pub count: i64,
}

impl From<DailyCountEntity> for DailyCount {
    fn from(entity: DailyCountEntity) -> Self {
        Self {
            date: entity.date,
            count: entity.count,
        }
    }
}

/// One keyword with its total frequency.
#[derive(Debug, Clone, FromRow)]
pub struct KeywordCountEntity {
    pub word: String,
    pub count: i64,
}

impl From<KeywordCountEntity> for KeywordCount {
    fn from(entity: KeywordCountEntity) -> Self {
        Self {
            word: entity.word,
            count: entity.count,
        }
    }
}

/// Top-level workflow status totals.
#[derive(Debug, Clone, FromRow)]
pub struct StatusTotalsEntity {
    pub total: i64,
    pub resolved: i64,
    pub pending: i64,
    pub in_progress: i64,
}

/// Moderation queue counts per status.
#[derive(Debug, Clone, FromRow)]
pub struct ModerationCountsEntity {
    pub total: i64,
    pub pending: i64,
    pub flagged: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl From<ModerationCountsEntity> for ModerationStats {
    fn from(entity: ModerationCountsEntity) -> Self {
        Self {
            total: entity.total,
            pending: entity.pending,
            flagged: entity.flagged,
            approved: entity.approved,
            rejected: entity.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_count_conversion() {
        let entity = NameCountEntity {
            name: "received".into(),
            count: 7,
        };
        let entry: BreakdownEntry = entity.into();
        assert_eq!(entry.name, "received");
        assert_eq!(entry.value, 7);
    }

    #[test]
    fn test_moderation_counts_conversion() {
        let entity = ModerationCountsEntity {
            total: 10,
            pending: 2,
            flagged: 3,
            approved: 4,
            rejected: 1,
        };
        let stats: ModerationStats = entity.into();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.pending + stats.flagged + stats.approved + stats.rejected, 10);
    }
}
