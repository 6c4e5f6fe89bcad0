use chrono::NaiveDateTime;
use super::{period_query, ApiClient, ApiError};
use crate::models::{EntityType, LogAction, LogEntry, LogPage};

impl ApiClient {
    /// Newest first, `page` is zero based.
    pub async fn fetch_logs(&self, page: u32, size: u32) -> Result<LogPage, ApiError> {
        let query = [("page", page.to_string()), ("size", size.to_string())];
        self.get_json(&["logs"], &query).await
    }

    pub async fn fetch_logs_by_action(&self, action: LogAction) -> Result<Vec<LogEntry>, ApiError> {
        self.get_json(&["logs", "action", action.as_str()], &[]).await
    }

    pub async fn fetch_logs_by_entity_type(&self, entity_type: EntityType) -> Result<Vec<LogEntry>, ApiError> {
        self.get_json(&["logs", "entity", entity_type.as_str()], &[]).await
    }

    pub async fn fetch_logs_for_entity(
        &self,
        entity_type: EntityType,
        entity_id: i64,
    ) -> Result<Vec<LogEntry>, ApiError> {
        self.get_json(&["logs", "entity", entity_type.as_str(), &entity_id.to_string()], &[]).await
    }

    pub async fn fetch_logs_by_user(&self, user_name: &str) -> Result<Vec<LogEntry>, ApiError> {
        self.get_json(&["logs", "user", user_name], &[]).await
    }

    /// Entries logged between `start` and `end` inclusive, newest first.
    pub async fn fetch_logs_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<LogEntry>, ApiError> {
        self.get_json(&["logs", "date-range"], &period_query(start, end)).await
    }
}
