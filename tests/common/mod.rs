#![allow(dead_code)]

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::SqlitePool;
use tempfile::TempDir;

use punchcard::database::init_database;
use punchcard::database::models::*;
use punchcard::database::repositories::*;
use punchcard::services::{
    AbsenceService, AttendanceProcessor, PairingStrategy, ScheduleService,
};

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

pub struct TestContext {
    pub db: TestDb,
    pub personnel: PersonnelRepository,
    pub shifts: ShiftRepository,
    pub calendars: CalendarRepository,
    pub work_groups: WorkGroupRepository,
    pub logs: AttendanceLogRepository,
    pub requests: RequestRepository,
    pub summaries: SummaryRepository,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let db = TestDb::new().await?;
        let pool = db.pool.clone();

        Ok(TestContext {
            db,
            personnel: PersonnelRepository::new(pool.clone()),
            shifts: ShiftRepository::new(pool.clone()),
            calendars: CalendarRepository::new(pool.clone()),
            work_groups: WorkGroupRepository::new(pool.clone()),
            logs: AttendanceLogRepository::new(pool.clone()),
            requests: RequestRepository::new(pool.clone()),
            summaries: SummaryRepository::new(pool),
        })
    }

    pub fn processor(&self, pairing: PairingStrategy) -> AttendanceProcessor {
        let schedule = ScheduleService::new(self.calendars.clone(), self.work_groups.clone());
        let absences = AbsenceService::new(self.requests.clone());
        AttendanceProcessor::new(
            self.personnel.clone(),
            self.work_groups.clone(),
            self.logs.clone(),
            self.summaries.clone(),
            schedule,
            absences,
            pairing,
        )
    }

    /// A calendar, an 08:00-16:00 shift (15 minute float) and a one-day
    /// rotation so every date is a work day.
    pub async fn daily_rotation(&self) -> Result<(Calendar, Shift, WorkGroup)> {
        let calendar = self
            .calendars
            .create(CalendarInput {
                name: "Main".to_string(),
                description: None,
            })
            .await?;

        let shift = self
            .shifts
            .create(ShiftInput {
                name: "Day".to_string(),
                start_time_1: t(8, 0),
                end_time_1: t(16, 0),
                start_time_2: None,
                end_time_2: None,
                allowed_log_start_time: t(8, 0),
                float_duration_minutes: 15,
                is_night_shift: false,
                description: None,
            })
            .await?;

        let group = self
            .work_groups
            .create(WorkGroupInput {
                name: "Everyday".to_string(),
                calendar_id: calendar.id,
                start_date: d(2024, 1, 1),
                repetition_period_days: 1,
                description: None,
            })
            .await?;
        self.work_groups.assign_shift(group.id, 1, shift.id).await?;

        Ok((calendar, shift, group))
    }

    pub async fn create_person(
        &self,
        tag: &str,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        work_group_id: Option<i64>,
    ) -> Result<Personnel> {
        self.personnel
            .create(PersonnelInput {
                card_number: format!("CARD-{tag}"),
                personnel_number: format!("EMP-{tag}"),
                first_name: "Test".to_string(),
                last_name: tag.to_string(),
                start_date,
                end_date,
                unit_id: 1,
                work_group_id,
            })
            .await
    }

    pub async fn punch(
        &self,
        personnel_id: i64,
        date: NaiveDate,
        h: u32,
        m: u32,
        log_type: Option<LogType>,
    ) -> Result<AttendanceLog> {
        self.logs
            .record(AttendanceLogInput {
                personnel_id,
                timestamp: dt(date, h, m),
                device_id: Some("gate-1".to_string()),
                log_type,
            })
            .await
    }
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn dt(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, 0).unwrap()
}
