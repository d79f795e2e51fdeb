use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::database::models::{Calendar, CalendarInput, Holiday, HolidayInput};

#[derive(Clone)]
pub struct CalendarRepository {
    pool: SqlitePool,
}

impl CalendarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CalendarInput) -> Result<Calendar> {
        let now = Utc::now().naive_utc();
        let calendar = sqlx::query_as::<_, Calendar>(
            r#"
            INSERT INTO calendars (name, description, is_active, created_at, updated_at)
            VALUES (?, ?, 1, ?, ?)
            RETURNING id, name, description, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(calendar)
    }

    pub async fn add_holiday(&self, input: HolidayInput) -> Result<Holiday> {
        let now = Utc::now().naive_utc();
        let holiday = sqlx::query_as::<_, Holiday>(
            r#"
            INSERT INTO holidays (calendar_id, date, name, description, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, calendar_id, date, name, description, created_at
            "#,
        )
        .bind(input.calendar_id)
        .bind(input.date)
        .bind(input.name)
        .bind(input.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(holiday)
    }

    pub async fn holiday_on(&self, calendar_id: i64, date: NaiveDate) -> Result<Option<Holiday>> {
        let holiday = sqlx::query_as::<_, Holiday>(
            "SELECT id, calendar_id, date, name, description, created_at FROM holidays WHERE calendar_id = ? AND date = ? ORDER BY id LIMIT 1",
        )
        .bind(calendar_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(holiday)
    }
}
