pub mod attendance_log;
pub mod calendar;
pub mod personnel;
pub mod request;
pub mod shift;
pub mod summary;
pub mod work_group;

// Re-export all repositories for easy importing
pub use attendance_log::AttendanceLogRepository;
pub use calendar::CalendarRepository;
pub use personnel::PersonnelRepository;
pub use request::RequestRepository;
pub use shift::ShiftRepository;
pub use summary::SummaryRepository;
pub use work_group::WorkGroupRepository;
