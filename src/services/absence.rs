use anyhow::Result;
use chrono::NaiveDate;

use crate::database::models::{
    DailySummaryInput, DayStatus, LeaveRequest, LeaveType, MissionRequest, MissionType,
};
use crate::database::repositories::RequestRepository;
use crate::services::timesheet::time_diff_minutes;

/// Credited minutes for a full-day leave or mission.
pub const FULL_DAY_MINUTES: i64 = 480;

/// An approved leave or mission covering a date, together with its type.
#[derive(Debug, Clone)]
pub enum Absence {
    Leave {
        request: LeaveRequest,
        leave_type: LeaveType,
    },
    Mission {
        request: MissionRequest,
        mission_type: MissionType,
    },
}

impl Absence {
    /// Turn the absence into the day's summary. Hourly requests credit the
    /// requested time window; full-day requests credit a fixed eight hours.
    /// Presence is credited only when the type counts as work; the computed
    /// duration always becomes the day's expected work.
    pub fn into_summary(self, personnel_id: i64, date: NaiveDate) -> DailySummaryInput {
        let (duration, counts_as_work, status, notes) = match self {
            Absence::Leave {
                request,
                leave_type,
            } => match hourly_minutes(request.is_hourly, request.start_time, request.end_time) {
                Some(minutes) => (
                    minutes,
                    leave_type.counts_as_work,
                    DayStatus::PartialLeave,
                    format!("Hourly leave: {} ({} minutes)", leave_type.name, minutes),
                ),
                None => (
                    FULL_DAY_MINUTES,
                    leave_type.counts_as_work,
                    DayStatus::OnLeave,
                    format!("Daily leave: {}", leave_type.name),
                ),
            },
            Absence::Mission {
                request,
                mission_type,
            } => {
                let destination = match &request.destination {
                    Some(destination) => format!(" to {}", destination),
                    None => String::new(),
                };
                match hourly_minutes(request.is_hourly, request.start_time, request.end_time) {
                    Some(minutes) => (
                        minutes,
                        mission_type.counts_as_work,
                        DayStatus::PartialMission,
                        format!(
                            "Hourly mission: {}{} ({} minutes)",
                            mission_type.name, destination, minutes
                        ),
                    ),
                    None => (
                        FULL_DAY_MINUTES,
                        mission_type.counts_as_work,
                        DayStatus::OnMission,
                        format!("Daily mission: {}{}", mission_type.name, destination),
                    ),
                }
            }
        };

        DailySummaryInput {
            personnel_id,
            date,
            shift_id: None,
            presence_duration: if counts_as_work { duration } else { 0 },
            tardiness_duration: 0,
            overtime_duration: 0,
            undertime_duration: 0,
            expected_work_duration: duration,
            absent: false,
            status,
            first_entry_time: None,
            last_exit_time: None,
            notes: Some(notes),
        }
    }
}

fn hourly_minutes(
    is_hourly: bool,
    start_time: Option<chrono::NaiveTime>,
    end_time: Option<chrono::NaiveTime>,
) -> Option<i64> {
    match (is_hourly, start_time, end_time) {
        (true, Some(start), Some(end)) => Some(time_diff_minutes(start, end)),
        _ => None,
    }
}

/// Decides whether an approved leave or mission covers a date. Leave is
/// checked first and wins when both exist.
#[derive(Clone)]
pub struct AbsenceService {
    requests: RequestRepository,
}

impl AbsenceService {
    pub fn new(requests: RequestRepository) -> Self {
        Self { requests }
    }

    pub async fn classify(&self, personnel_id: i64, date: NaiveDate) -> Result<Option<Absence>> {
        if let Some(request) = self.requests.approved_leave_on(personnel_id, date).await? {
            let leave_type = self.requests.get_leave_type(request.leave_type_id).await?;
            return Ok(Some(Absence::Leave {
                request,
                leave_type,
            }));
        }

        if let Some(request) = self.requests.approved_mission_on(personnel_id, date).await? {
            let mission_type = self
                .requests
                .get_mission_type(request.mission_type_id)
                .await?;
            return Ok(Some(Absence::Mission {
                request,
                mission_type,
            }));
        }

        Ok(None)
    }
}
