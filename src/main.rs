use anyhow::{Result, bail};
use chrono::NaiveDate;

use punchcard::database::{
    init_database,
    repositories::{
        AttendanceLogRepository, CalendarRepository, PersonnelRepository, RequestRepository,
        SummaryRepository, WorkGroupRepository,
    },
};
use punchcard::services::{AbsenceService, AttendanceProcessor, ProcessingRequest, ScheduleService};
use punchcard::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    // Load configuration
    let config = Config::from_env()?;
    let request = parse_args(std::env::args().skip(1))?;

    // Initialize database
    let pool = init_database(&config.database_url).await?;

    // Wire repositories and services
    let personnel_repository = PersonnelRepository::new(pool.clone());
    let work_group_repository = WorkGroupRepository::new(pool.clone());
    let calendar_repository = CalendarRepository::new(pool.clone());
    let attendance_log_repository = AttendanceLogRepository::new(pool.clone());
    let request_repository = RequestRepository::new(pool.clone());
    let summary_repository = SummaryRepository::new(pool.clone());

    let schedule_service = ScheduleService::new(calendar_repository, work_group_repository.clone());
    let absence_service = AbsenceService::new(request_repository);
    let processor = AttendanceProcessor::new(
        personnel_repository,
        work_group_repository,
        attendance_log_repository,
        summary_repository,
        schedule_service,
        absence_service,
        config.pairing,
    );

    log::info!(
        "Processing attendance {}..={} (force_reprocess: {})",
        request.start_date,
        request.end_date,
        request.force_reprocess
    );

    let report = processor.process(&request).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// punchcard <start-date> <end-date> [--ids 1,2,3] [--force]
fn parse_args(args: impl Iterator<Item = String>) -> Result<ProcessingRequest> {
    let args: Vec<String> = args.collect();
    if args.len() < 2 {
        bail!("Usage: punchcard <start-date> <end-date> [--ids 1,2,3] [--force]");
    }

    let start_date: NaiveDate = args[0].parse()?;
    let end_date: NaiveDate = args[1].parse()?;
    if start_date > end_date {
        bail!("Start date cannot be after end date");
    }

    let mut personnel_ids = None;
    let mut force_reprocess = false;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--force" => force_reprocess = true,
            "--ids" => {
                let Some(list) = rest.next() else {
                    bail!("--ids requires a comma-separated list of personnel ids");
                };
                let ids = list
                    .split(',')
                    .map(|id| id.trim().parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()?;
                personnel_ids = Some(ids);
            }
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok(ProcessingRequest {
        start_date,
        end_date,
        personnel_ids,
        force_reprocess,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> std::vec::IntoIter<String> {
        values
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_range_and_flags() {
        let request =
            parse_args(args(&["2024-03-01", "2024-03-31", "--ids", "1,2", "--force"])).unwrap();
        assert_eq!(request.start_date.to_string(), "2024-03-01");
        assert_eq!(request.end_date.to_string(), "2024-03-31");
        assert_eq!(request.personnel_ids, Some(vec![1, 2]));
        assert!(request.force_reprocess);
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(parse_args(args(&["2024-03-31", "2024-03-01"])).is_err());
    }
}
