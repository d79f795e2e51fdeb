use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::database::models::{DailySummaryInput, DayStatus, Personnel, WorkGroup};
use crate::database::repositories::{
    AttendanceLogRepository, PersonnelRepository, SummaryRepository, WorkGroupRepository,
};
use crate::services::absence::AbsenceService;
use crate::services::schedule::{DayPlan, ScheduleService};
use crate::services::timesheet::{self, PairingStrategy};

/// One reconciliation run: a date range, an optional personnel filter, and
/// whether already-summarized days are recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub personnel_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub force_reprocess: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub processed_days: u64,
    pub processed_personnel: u64,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// What one person's evaluation produced. Outcomes are collected and folded
/// into the report after the fan-out loop, so nothing is accumulated across
/// iterations.
#[derive(Debug, Default)]
struct PersonOutcome {
    processed_days: u64,
    warnings: Vec<String>,
}

/// Walks people and dates, classifies each day (holiday, leave, mission,
/// no shift, or punches) and writes exactly one summary per (person, date).
#[derive(Clone)]
pub struct AttendanceProcessor {
    personnel: PersonnelRepository,
    work_groups: WorkGroupRepository,
    logs: AttendanceLogRepository,
    summaries: SummaryRepository,
    schedule: ScheduleService,
    absences: AbsenceService,
    pairing: PairingStrategy,
}

impl AttendanceProcessor {
    pub fn new(
        personnel: PersonnelRepository,
        work_groups: WorkGroupRepository,
        logs: AttendanceLogRepository,
        summaries: SummaryRepository,
        schedule: ScheduleService,
        absences: AbsenceService,
        pairing: PairingStrategy,
    ) -> Self {
        Self {
            personnel,
            work_groups,
            logs,
            summaries,
            schedule,
            absences,
            pairing,
        }
    }

    /// Run one batch. Never fails outright: per-person failures land in
    /// `errors`, configuration gaps and per-day failures in `warnings`, and
    /// whatever was completed is reported.
    pub async fn process(&self, request: &ProcessingRequest) -> ProcessingReport {
        let mut report = ProcessingReport::default();

        let personnel_list = match self
            .personnel
            .get_active(request.personnel_ids.as_deref())
            .await
        {
            Ok(list) => list,
            Err(e) => {
                log::error!("Error in attendance processing: {}", e);
                report
                    .errors
                    .push(format!("General processing error: {}", e));
                return report;
            }
        };

        if personnel_list.is_empty() {
            report
                .errors
                .push("No active personnel found for processing".to_string());
            return report;
        }

        report.processed_personnel = personnel_list.len() as u64;

        let mut outcomes = Vec::with_capacity(personnel_list.len());
        let mut errors = Vec::new();
        for person in &personnel_list {
            match self.process_personnel(person, request).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    log::error!("Error processing personnel {}: {}", person.id, e);
                    errors.push(format!("Error processing personnel {}: {}", person.id, e));
                }
            }
        }

        for outcome in outcomes {
            report.processed_days += outcome.processed_days;
            report.warnings.extend(outcome.warnings);
        }
        report.errors.extend(errors);

        report
    }

    /// Evaluate one person over the requested range, clipped to their
    /// employment window. Day failures are degraded to warnings so the rest
    /// of the range still gets processed.
    async fn process_personnel(
        &self,
        person: &Personnel,
        request: &ProcessingRequest,
    ) -> Result<PersonOutcome> {
        let mut outcome = PersonOutcome::default();

        let Some(work_group_id) = person.work_group_id else {
            log::warn!("Personnel {} has no work group assigned", person.id);
            outcome
                .warnings
                .push(format!("Personnel {} has no work group assigned", person.id));
            return Ok(outcome);
        };

        let work_group = self
            .work_groups
            .get_by_id(work_group_id)
            .await?
            .ok_or_else(|| anyhow!("Work group {} not found", work_group_id))?;

        // Days outside the employment window are skipped silently.
        let mut date = request.start_date.max(person.start_date);
        let last = match person.end_date {
            Some(end) => request.end_date.min(end),
            None => request.end_date,
        };

        while date <= last {
            match self
                .process_day(person, &work_group, date, request.force_reprocess)
                .await
            {
                Ok(true) => outcome.processed_days += 1,
                Ok(false) => {} // already summarized, left untouched
                Err(e) => {
                    log::error!("Error processing personnel {} on {}: {}", person.id, date, e);
                    outcome.warnings.push(format!(
                        "Failed to process personnel {} on {}: {}",
                        person.id, date, e
                    ));
                }
            }
            date = date + chrono::Duration::days(1);
        }

        Ok(outcome)
    }

    /// Classify and summarize a single day. Exactly one of the five paths
    /// runs: holiday, leave, mission, no shift, or punch reconciliation.
    /// Returns false when the day was skipped as already summarized.
    async fn process_day(
        &self,
        person: &Personnel,
        work_group: &WorkGroup,
        date: NaiveDate,
        force_reprocess: bool,
    ) -> Result<bool> {
        if !force_reprocess
            && self
                .summaries
                .find_for_day(person.id, date)
                .await?
                .is_some()
        {
            return Ok(false);
        }

        match self.schedule.resolve(work_group, date).await? {
            DayPlan::Holiday(holiday) => {
                self.summaries
                    .upsert(DailySummaryInput::blank(
                        person.id,
                        date,
                        DayStatus::Holiday,
                        Some(format!("Holiday: {}", holiday.name)),
                    ))
                    .await?;
            }
            plan => {
                if let Some(absence) = self.absences.classify(person.id, date).await? {
                    self.summaries
                        .upsert(absence.into_summary(person.id, date))
                        .await?;
                } else if let DayPlan::Work(shift) = plan {
                    let logs = self.logs.logs_for_day(person.id, date).await?;
                    let computed = timesheet::compute_day(&logs, &shift, self.pairing);
                    self.summaries
                        .upsert(computed.into_summary(person.id, date, Some(shift.id)))
                        .await?;

                    let log_ids: Vec<i64> = logs.iter().map(|log| log.id).collect();
                    self.logs.mark_processed(&log_ids).await?;
                } else {
                    self.summaries
                        .upsert(DailySummaryInput::blank(
                            person.id,
                            date,
                            DayStatus::NoShift,
                            Some("No shift assigned for this day".to_string()),
                        ))
                        .await?;
                }
            }
        }

        Ok(true)
    }
}
