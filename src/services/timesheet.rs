//! Punch pairing and time arithmetic. Everything here is pure so the
//! reconciliation rules can be tested without a database.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::database::models::{
    AttendanceLog, DailySummaryInput, DayStatus, LogType, Shift,
};

/// How punches are matched into entry/exit pairs.
///
/// `Positional` is the historical behavior: logs[0] with logs[1], logs[2]
/// with logs[3], and so on, ignoring the device-reported direction.
/// `ByLogType` consults the IN/OUT direction when the device reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PairingStrategy {
    #[default]
    Positional,
    ByLogType,
}

impl std::fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingStrategy::Positional => write!(f, "positional"),
            PairingStrategy::ByLogType => write!(f, "log-type"),
        }
    }
}

impl std::str::FromStr for PairingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positional" => Ok(PairingStrategy::Positional),
            "log-type" | "logtype" => Ok(PairingStrategy::ByLogType),
            _ => Err(format!("Invalid pairing strategy: {}", s)),
        }
    }
}

/// The computed attendance figures for one person on one work day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayComputation {
    pub first_entry_time: Option<NaiveDateTime>,
    pub last_exit_time: Option<NaiveDateTime>,
    pub presence_duration: i64,
    pub tardiness_duration: i64,
    pub overtime_duration: i64,
    pub undertime_duration: i64,
    pub expected_work_duration: i64,
    pub absent: bool,
    pub status: DayStatus,
    pub notes: Option<String>,
}

impl DayComputation {
    pub fn into_summary(
        self,
        personnel_id: i64,
        date: NaiveDate,
        shift_id: Option<i64>,
    ) -> DailySummaryInput {
        DailySummaryInput {
            personnel_id,
            date,
            shift_id,
            presence_duration: self.presence_duration,
            tardiness_duration: self.tardiness_duration,
            overtime_duration: self.overtime_duration,
            undertime_duration: self.undertime_duration,
            expected_work_duration: self.expected_work_duration,
            absent: self.absent,
            status: self.status,
            first_entry_time: self.first_entry_time,
            last_exit_time: self.last_exit_time,
            notes: self.notes,
        }
    }
}

/// Minutes from `start` to `end`, wrapping past midnight when `end` is
/// clock-earlier than `start` (split and night shift intervals).
pub fn time_diff_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let minutes = (end - start).num_minutes();
    if minutes < 0 { minutes + 24 * 60 } else { minutes }
}

/// Total scheduled minutes for the shift: interval 1, plus interval 2 when
/// both of its bounds are set.
pub fn expected_work_minutes(shift: &Shift) -> i64 {
    let mut total = time_diff_minutes(shift.start_time_1, shift.end_time_1);
    if let (Some(start_2), Some(end_2)) = (shift.start_time_2, shift.end_time_2) {
        total += time_diff_minutes(start_2, end_2);
    }
    total
}

/// Reconcile one day's punches against the shift. Empty input means the
/// person never logged and is marked absent; a punch sequence that cannot
/// be fully paired keeps its computable pairs and is flagged IncompleteLog.
pub fn compute_day(
    logs: &[AttendanceLog],
    shift: &Shift,
    strategy: PairingStrategy,
) -> DayComputation {
    let mut result = DayComputation::default();

    if logs.is_empty() {
        result.absent = true;
        result.status = DayStatus::Absent;
        return result;
    }

    // First/last timestamps stand regardless of how pairing turns out.
    result.first_entry_time = logs.first().map(|log| log.timestamp);
    result.last_exit_time = logs.last().map(|log| log.timestamp);

    result.expected_work_duration = expected_work_minutes(shift);

    let (pairs, unmatched) = match strategy {
        PairingStrategy::Positional => pair_positional(logs),
        PairingStrategy::ByLogType => pair_by_log_type(logs),
    };

    result.presence_duration = pairs
        .iter()
        .map(|(entry, exit)| (exit.timestamp - entry.timestamp).num_minutes())
        .sum();

    // Tardiness is judged against the first entry of the day only.
    let entry_time = logs[0].timestamp.time();
    if entry_time > shift.allowed_log_start_time {
        let late = time_diff_minutes(shift.allowed_log_start_time, entry_time);
        result.tardiness_duration = (late - shift.float_duration_minutes).max(0);
    }

    let exit_time = logs[logs.len() - 1].timestamp.time();
    let expected_end = shift.expected_end();
    if exit_time > expected_end {
        result.overtime_duration = time_diff_minutes(expected_end, exit_time);
    }

    result.undertime_duration =
        (result.expected_work_duration - result.presence_duration).max(0);

    if unmatched {
        result.status = DayStatus::IncompleteLog;
        result.notes = Some(match strategy {
            PairingStrategy::Positional => "Odd number of attendance logs".to_string(),
            PairingStrategy::ByLogType => "Unmatched attendance logs".to_string(),
        });
    }

    result
}

/// Pair punches strictly by position; a trailing unpaired punch is dropped
/// from the presence sum.
fn pair_positional(logs: &[AttendanceLog]) -> (Vec<(&AttendanceLog, &AttendanceLog)>, bool) {
    let pairs = logs
        .chunks_exact(2)
        .map(|pair| (&pair[0], &pair[1]))
        .collect();
    (pairs, logs.len() % 2 != 0)
}

/// Pair punches using the device-reported direction. Punches without a
/// direction fall back to alternation: they open a pair when none is open
/// and close the open one otherwise. Any punch that breaks the IN/OUT
/// alternation is dropped and flags the day.
fn pair_by_log_type(logs: &[AttendanceLog]) -> (Vec<(&AttendanceLog, &AttendanceLog)>, bool) {
    let mut pairs = Vec::new();
    let mut unmatched = false;
    let mut open_entry: Option<&AttendanceLog> = None;

    for log in logs {
        match (log.log_type, open_entry) {
            (Some(LogType::In), None) | (None, None) => open_entry = Some(log),
            (Some(LogType::In), Some(_)) => {
                // Two INs in a row: the earlier one has no exit.
                unmatched = true;
                open_entry = Some(log);
            }
            (Some(LogType::Out), Some(entry)) | (None, Some(entry)) => {
                pairs.push((entry, log));
                open_entry = None;
            }
            (Some(LogType::Out), None) => unmatched = true,
        }
    }

    if open_entry.is_some() {
        unmatched = true;
    }

    (pairs, unmatched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day_shift() -> Shift {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_time(NaiveTime::MIN);
        Shift {
            id: 1,
            name: "Day".to_string(),
            start_time_1: t(8, 0),
            end_time_1: t(16, 0),
            start_time_2: None,
            end_time_2: None,
            allowed_log_start_time: t(8, 0),
            float_duration_minutes: 15,
            is_night_shift: false,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn night_shift() -> Shift {
        Shift {
            start_time_1: t(22, 0),
            end_time_1: t(6, 0),
            allowed_log_start_time: t(22, 0),
            is_night_shift: true,
            ..day_shift()
        }
    }

    fn punch(h: u32, m: u32, log_type: Option<LogType>) -> AttendanceLog {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        AttendanceLog {
            id: 0,
            personnel_id: 1,
            timestamp,
            device_id: None,
            log_type,
            is_processed: false,
            created_at: timestamp,
        }
    }

    #[test]
    fn wrapping_time_diff() {
        assert_eq!(time_diff_minutes(t(8, 0), t(16, 0)), 480);
        assert_eq!(time_diff_minutes(t(22, 0), t(6, 0)), 480);
        assert_eq!(time_diff_minutes(t(9, 0), t(9, 0)), 0);
    }

    #[test]
    fn night_shift_expected_duration_is_not_negative() {
        assert_eq!(expected_work_minutes(&night_shift()), 480);
    }

    #[test]
    fn split_shift_sums_both_intervals() {
        let shift = Shift {
            start_time_1: t(8, 0),
            end_time_1: t(12, 0),
            start_time_2: Some(t(13, 0)),
            end_time_2: Some(t(17, 0)),
            ..day_shift()
        };
        assert_eq!(expected_work_minutes(&shift), 480);
    }

    #[test]
    fn no_punches_means_absent() {
        let result = compute_day(&[], &day_shift(), PairingStrategy::Positional);
        assert!(result.absent);
        assert_eq!(result.status, DayStatus::Absent);
        assert_eq!(result.presence_duration, 0);
        assert_eq!(result.expected_work_duration, 0);
        assert_eq!(result.first_entry_time, None);
    }

    #[test]
    fn odd_punch_count_drops_trailing_log() {
        let logs = vec![punch(9, 0, None), punch(12, 0, None), punch(13, 0, None)];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::Positional);

        assert_eq!(result.presence_duration, 180);
        assert_eq!(result.status, DayStatus::IncompleteLog);
        assert_eq!(result.notes.as_deref(), Some("Odd number of attendance logs"));
        assert_eq!(result.last_exit_time, Some(logs[2].timestamp));
        assert!(!result.absent);
    }

    #[test]
    fn tardiness_is_floored_by_float() {
        let logs = vec![punch(8, 20, None), punch(16, 0, None)];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::Positional);
        assert_eq!(result.tardiness_duration, 5);

        let logs = vec![punch(8, 10, None), punch(16, 0, None)];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::Positional);
        assert_eq!(result.tardiness_duration, 0);
    }

    #[test]
    fn overtime_past_expected_end() {
        let logs = vec![punch(8, 0, None), punch(17, 30, None)];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::Positional);
        assert_eq!(result.overtime_duration, 90);
        assert_eq!(result.status, DayStatus::Ok);
        // Presence is not clipped to the shift; overtime is reported on top.
        assert_eq!(result.presence_duration, 570);
        assert_eq!(result.undertime_duration, 0);
    }

    #[test]
    fn short_day_accrues_undertime_without_absence() {
        let logs = vec![punch(8, 0, None), punch(12, 0, None)];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::Positional);
        assert!(!result.absent);
        assert_eq!(result.status, DayStatus::Ok);
        assert_eq!(result.presence_duration, 240);
        assert_eq!(result.undertime_duration, 240);
    }

    #[test]
    fn log_type_pairing_skips_duplicate_ins() {
        let logs = vec![
            punch(9, 0, Some(LogType::In)),
            punch(12, 0, Some(LogType::Out)),
            punch(13, 0, Some(LogType::In)),
        ];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::ByLogType);
        assert_eq!(result.presence_duration, 180);
        assert_eq!(result.status, DayStatus::IncompleteLog);
        assert_eq!(result.notes.as_deref(), Some("Unmatched attendance logs"));
    }

    #[test]
    fn log_type_pairing_falls_back_to_alternation_without_directions() {
        let logs = vec![
            punch(9, 0, None),
            punch(12, 0, None),
            punch(13, 0, Some(LogType::In)),
            punch(16, 0, Some(LogType::Out)),
        ];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::ByLogType);
        assert_eq!(result.presence_duration, 360);
        assert_eq!(result.status, DayStatus::Ok);
    }

    #[test]
    fn stray_out_is_dropped() {
        let logs = vec![
            punch(8, 0, Some(LogType::Out)),
            punch(9, 0, Some(LogType::In)),
            punch(12, 0, Some(LogType::Out)),
        ];
        let result = compute_day(&logs, &day_shift(), PairingStrategy::ByLogType);
        assert_eq!(result.presence_duration, 180);
        assert_eq!(result.status, DayStatus::IncompleteLog);
    }
}
