use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;

use crate::database::models::{AttendanceLog, AttendanceLogInput};

const LOG_COLUMNS: &str =
    "id, personnel_id, timestamp, device_id, log_type, is_processed, created_at";

#[derive(Clone)]
pub struct AttendanceLogRepository {
    pool: SqlitePool,
}

impl AttendanceLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, input: AttendanceLogInput) -> Result<AttendanceLog> {
        let now = Utc::now().naive_utc();
        let log = sqlx::query_as::<_, AttendanceLog>(&format!(
            r#"
            INSERT INTO attendance_logs (personnel_id, timestamp, device_id, log_type, is_processed, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            RETURNING {LOG_COLUMNS}
            "#
        ))
        .bind(input.personnel_id)
        .bind(input.timestamp)
        .bind(input.device_id)
        .bind(input.log_type)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    /// All of one person's punches on a calendar day, timestamp ascending.
    pub async fn logs_for_day(
        &self,
        personnel_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceLog>> {
        let day_start = date.and_time(NaiveTime::MIN);
        let next_day_start = day_start + chrono::Duration::days(1);

        let logs = sqlx::query_as::<_, AttendanceLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM attendance_logs WHERE personnel_id = ? AND timestamp >= ? AND timestamp < ? ORDER BY timestamp"
        ))
        .bind(personnel_id)
        .bind(day_start)
        .bind(next_day_start)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Flag punches as incorporated into a daily summary.
    pub async fn mark_processed(&self, log_ids: &[i64]) -> Result<u64> {
        if log_ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; log_ids.len()].join(", ");
        let sql =
            format!("UPDATE attendance_logs SET is_processed = 1 WHERE id IN ({placeholders})");
        let mut query = sqlx::query(&sql);
        for id in log_ids {
            query = query.bind(*id);
        }

        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
