use pretty_assertions::assert_eq;

use punchcard::database::models::*;

mod common;
use common::{TestContext, d, dt, t};

#[tokio::test]
async fn summary_upsert_overlays_the_same_row() {
    let ctx = TestContext::new().await.unwrap();
    let person = ctx
        .create_person("upsert", d(2024, 1, 1), None, None)
        .await
        .unwrap();

    let mut input = DailySummaryInput::blank(person.id, d(2024, 3, 4), DayStatus::NoShift, None);
    let created = ctx.summaries.upsert(input.clone()).await.unwrap();

    input.status = DayStatus::Ok;
    input.presence_duration = 480;
    input.expected_work_duration = 480;
    let updated = ctx.summaries.upsert(input).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, DayStatus::Ok);
    assert_eq!(updated.presence_duration, 480);
    assert_eq!(
        ctx.summaries.count_for_day(person.id, d(2024, 3, 4)).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn overlapping_leave_request_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let person = ctx
        .create_person("overlap", d(2024, 1, 1), None, None)
        .await
        .unwrap();
    let leave_type = ctx
        .requests
        .create_leave_type(LeaveTypeInput {
            name: "Annual".to_string(),
            description: None,
            counts_as_work: true,
            requires_approval: true,
            max_days_per_year: Some(30),
        })
        .await
        .unwrap();

    let input = LeaveRequestInput {
        personnel_id: person.id,
        leave_type_id: leave_type.id,
        start_date: d(2024, 3, 4),
        end_date: d(2024, 3, 8),
        start_time: None,
        end_time: None,
        is_hourly: false,
        requester_notes: None,
    };
    ctx.requests.create_leave_request(input.clone()).await.unwrap();

    // Still pending, but pending requests also block overlaps.
    let overlapping = LeaveRequestInput {
        start_date: d(2024, 3, 8),
        end_date: d(2024, 3, 12),
        ..input.clone()
    };
    let err = ctx.requests.create_leave_request(overlapping).await.unwrap_err();
    assert!(err.to_string().contains("Overlapping request"));

    // A disjoint range is fine.
    let disjoint = LeaveRequestInput {
        start_date: d(2024, 3, 9),
        end_date: d(2024, 3, 12),
        ..input
    };
    ctx.requests.create_leave_request(disjoint).await.unwrap();
}

#[tokio::test]
async fn hourly_request_requires_an_ordered_time_range() {
    let ctx = TestContext::new().await.unwrap();
    let person = ctx
        .create_person("times", d(2024, 1, 1), None, None)
        .await
        .unwrap();
    let leave_type = ctx
        .requests
        .create_leave_type(LeaveTypeInput {
            name: "Errand".to_string(),
            description: None,
            counts_as_work: false,
            requires_approval: true,
            max_days_per_year: None,
        })
        .await
        .unwrap();

    let missing_times = LeaveRequestInput {
        personnel_id: person.id,
        leave_type_id: leave_type.id,
        start_date: d(2024, 3, 4),
        end_date: d(2024, 3, 4),
        start_time: None,
        end_time: None,
        is_hourly: true,
        requester_notes: None,
    };
    assert!(ctx.requests.create_leave_request(missing_times.clone()).await.is_err());

    let inverted = LeaveRequestInput {
        start_time: Some(t(11, 0)),
        end_time: Some(t(9, 0)),
        ..missing_times
    };
    assert!(ctx.requests.create_leave_request(inverted).await.is_err());
}

#[tokio::test]
async fn only_approved_requests_are_visible_to_the_engine() {
    let ctx = TestContext::new().await.unwrap();
    let person = ctx
        .create_person("approval", d(2024, 1, 1), None, None)
        .await
        .unwrap();
    let leave_type = ctx
        .requests
        .create_leave_type(LeaveTypeInput {
            name: "Annual".to_string(),
            description: None,
            counts_as_work: true,
            requires_approval: true,
            max_days_per_year: None,
        })
        .await
        .unwrap();
    let request = ctx
        .requests
        .create_leave_request(LeaveRequestInput {
            personnel_id: person.id,
            leave_type_id: leave_type.id,
            start_date: d(2024, 3, 4),
            end_date: d(2024, 3, 8),
            start_time: None,
            end_time: None,
            is_hourly: false,
            requester_notes: None,
        })
        .await
        .unwrap();

    assert!(
        ctx.requests
            .approved_leave_on(person.id, d(2024, 3, 5))
            .await
            .unwrap()
            .is_none()
    );

    ctx.requests
        .set_leave_status(request.id, RequestStatus::Approved)
        .await
        .unwrap();

    let found = ctx
        .requests
        .approved_leave_on(person.id, d(2024, 3, 5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, request.id);
    assert!(
        ctx.requests
            .approved_leave_on(person.id, d(2024, 3, 9))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn day_logs_are_bounded_and_ordered() {
    let ctx = TestContext::new().await.unwrap();
    let person = ctx
        .create_person("logs", d(2024, 1, 1), None, None)
        .await
        .unwrap();

    // Inserted out of order, plus neighbors on adjacent days.
    ctx.punch(person.id, d(2024, 3, 4), 16, 0, Some(LogType::Out)).await.unwrap();
    ctx.punch(person.id, d(2024, 3, 4), 8, 0, Some(LogType::In)).await.unwrap();
    ctx.punch(person.id, d(2024, 3, 3), 23, 59, None).await.unwrap();
    ctx.punch(person.id, d(2024, 3, 5), 0, 0, None).await.unwrap();

    let logs = ctx.logs.logs_for_day(person.id, d(2024, 3, 4)).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].timestamp, dt(d(2024, 3, 4), 8, 0));
    assert_eq!(logs[1].timestamp, dt(d(2024, 3, 4), 16, 0));
    assert!(!logs[0].is_processed);
}

#[tokio::test]
async fn get_active_filters_ids_and_inactive_rows() {
    let ctx = TestContext::new().await.unwrap();
    let kept = ctx.create_person("kept", d(2024, 1, 1), None, None).await.unwrap();
    let other = ctx.create_person("other", d(2024, 1, 1), None, None).await.unwrap();
    let gone = ctx.create_person("gone", d(2024, 1, 1), None, None).await.unwrap();
    ctx.personnel.deactivate(gone.id).await.unwrap();

    let all = ctx.personnel.get_active(None).await.unwrap();
    assert_eq!(
        all.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![kept.id, other.id]
    );

    let filtered = ctx
        .personnel
        .get_active(Some(&[kept.id, gone.id, 999]))
        .await
        .unwrap();
    assert_eq!(filtered.iter().map(|p| p.id).collect::<Vec<_>>(), vec![kept.id]);
}

#[tokio::test]
async fn cycle_assignment_is_validated() {
    let ctx = TestContext::new().await.unwrap();
    let (_, shift, _) = ctx.daily_rotation().await.unwrap();
    let calendar = ctx
        .calendars
        .create(CalendarInput {
            name: "Weekly".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let group = ctx
        .work_groups
        .create(WorkGroupInput {
            name: "Weekly".to_string(),
            calendar_id: calendar.id,
            start_date: d(2024, 1, 1),
            repetition_period_days: 7,
            description: None,
        })
        .await
        .unwrap();

    assert!(ctx.work_groups.assign_shift(group.id, 0, shift.id).await.is_err());
    assert!(ctx.work_groups.assign_shift(group.id, 8, shift.id).await.is_err());

    ctx.work_groups.assign_shift(group.id, 3, shift.id).await.unwrap();
    // One shift per day of the cycle.
    assert!(ctx.work_groups.assign_shift(group.id, 3, shift.id).await.is_err());

    let resolved = ctx
        .work_groups
        .shift_for_day_of_cycle(group.id, 3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, shift.id);
    assert!(
        ctx.work_groups
            .shift_for_day_of_cycle(group.id, 4)
            .await
            .unwrap()
            .is_none()
    );
}
