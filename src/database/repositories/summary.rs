use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::database::models::{DailySummary, DailySummaryInput};

const SUMMARY_COLUMNS: &str = "id, personnel_id, date, shift_id, presence_duration, \
     tardiness_duration, overtime_duration, undertime_duration, expected_work_duration, absent, \
     status, first_entry_time, last_exit_time, notes, created_at, updated_at";

#[derive(Clone)]
pub struct SummaryRepository {
    pool: SqlitePool,
}

impl SummaryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create-or-overlay keyed on (personnel_id, date). The unique index
    /// makes this atomic, so reprocessing can never duplicate a day.
    pub async fn upsert(&self, input: DailySummaryInput) -> Result<DailySummary> {
        let now = Utc::now().naive_utc();
        let summary = sqlx::query_as::<_, DailySummary>(&format!(
            r#"
            INSERT INTO daily_summaries (personnel_id, date, shift_id, presence_duration, tardiness_duration, overtime_duration, undertime_duration, expected_work_duration, absent, status, first_entry_time, last_exit_time, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(personnel_id, date) DO UPDATE SET
                shift_id = excluded.shift_id,
                presence_duration = excluded.presence_duration,
                tardiness_duration = excluded.tardiness_duration,
                overtime_duration = excluded.overtime_duration,
                undertime_duration = excluded.undertime_duration,
                expected_work_duration = excluded.expected_work_duration,
                absent = excluded.absent,
                status = excluded.status,
                first_entry_time = excluded.first_entry_time,
                last_exit_time = excluded.last_exit_time,
                notes = excluded.notes,
                updated_at = excluded.updated_at
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(input.personnel_id)
        .bind(input.date)
        .bind(input.shift_id)
        .bind(input.presence_duration)
        .bind(input.tardiness_duration)
        .bind(input.overtime_duration)
        .bind(input.undertime_duration)
        .bind(input.expected_work_duration)
        .bind(input.absent)
        .bind(input.status)
        .bind(input.first_entry_time)
        .bind(input.last_exit_time)
        .bind(input.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    pub async fn find_for_day(
        &self,
        personnel_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DailySummary>> {
        let summary = sqlx::query_as::<_, DailySummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM daily_summaries WHERE personnel_id = ? AND date = ?"
        ))
        .bind(personnel_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }

    pub async fn list_for_range(
        &self,
        personnel_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailySummary>> {
        let summaries = sqlx::query_as::<_, DailySummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM daily_summaries WHERE personnel_id = ? AND date >= ? AND date <= ? ORDER BY date"
        ))
        .bind(personnel_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    pub async fn count_for_day(&self, personnel_id: i64, date: NaiveDate) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM daily_summaries WHERE personnel_id = ? AND date = ?",
        )
        .bind(personnel_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
