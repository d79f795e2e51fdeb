use anyhow::Result;
use chrono::NaiveDate;

use crate::database::models::{Holiday, Shift, WorkGroup};
use crate::database::repositories::{CalendarRepository, WorkGroupRepository};

/// What the calendar says about one date for one work group.
#[derive(Debug, Clone)]
pub enum DayPlan {
    /// Calendar holiday; takes precedence over any shift assignment.
    Holiday(Holiday),
    /// A shift is scheduled for this day of the rotation.
    Work(Shift),
    /// The rotation assigns nothing on this day.
    Off,
}

/// Resolves a work group's cyclic rotation and its calendar's holidays
/// into a plan for a specific date.
#[derive(Clone)]
pub struct ScheduleService {
    calendars: CalendarRepository,
    work_groups: WorkGroupRepository,
}

impl ScheduleService {
    pub fn new(calendars: CalendarRepository, work_groups: WorkGroupRepository) -> Self {
        Self {
            calendars,
            work_groups,
        }
    }

    pub async fn resolve(&self, work_group: &WorkGroup, date: NaiveDate) -> Result<DayPlan> {
        if let Some(holiday) = self
            .calendars
            .holiday_on(work_group.calendar_id, date)
            .await?
        {
            return Ok(DayPlan::Holiday(holiday));
        }

        let day = day_of_cycle(work_group, date);
        match self
            .work_groups
            .shift_for_day_of_cycle(work_group.id, day)
            .await?
        {
            Some(shift) => Ok(DayPlan::Work(shift)),
            None => Ok(DayPlan::Off),
        }
    }
}

/// 1-based position of `date` within the group's repeating rotation.
/// Euclidean remainder keeps the result in range for dates before the
/// cycle epoch as well.
pub fn day_of_cycle(work_group: &WorkGroup, date: NaiveDate) -> i64 {
    let days_diff = (date - work_group.start_date).num_days();
    days_diff.rem_euclid(work_group.repetition_period_days) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn group(start: NaiveDate, period: i64) -> WorkGroup {
        let now = start.and_time(NaiveTime::MIN);
        WorkGroup {
            id: 1,
            name: "Rotation".to_string(),
            calendar_id: 1,
            start_date: start,
            repetition_period_days: period,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cycle_starts_at_one_on_the_epoch() {
        let group = group(date(2024, 1, 1), 7);
        assert_eq!(day_of_cycle(&group, date(2024, 1, 1)), 1);
        assert_eq!(day_of_cycle(&group, date(2024, 1, 7)), 7);
        assert_eq!(day_of_cycle(&group, date(2024, 1, 8)), 1);
    }

    #[test]
    fn dates_before_the_epoch_still_resolve() {
        let group = group(date(2024, 1, 8), 7);
        assert_eq!(day_of_cycle(&group, date(2024, 1, 7)), 7);
        assert_eq!(day_of_cycle(&group, date(2024, 1, 1)), 1);
        assert_eq!(day_of_cycle(&group, date(2023, 12, 31)), 7);
    }

    #[test]
    fn single_day_cycle_is_always_day_one() {
        let group = group(date(2024, 1, 1), 1);
        assert_eq!(day_of_cycle(&group, date(2024, 5, 20)), 1);
        assert_eq!(day_of_cycle(&group, date(2023, 5, 20)), 1);
    }
}
