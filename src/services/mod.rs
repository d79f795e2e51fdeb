pub mod absence;
pub mod processor;
pub mod schedule;
pub mod timesheet;

pub use absence::{Absence, AbsenceService};
pub use processor::{AttendanceProcessor, ProcessingReport, ProcessingRequest};
pub use schedule::{DayPlan, ScheduleService};
pub use timesheet::{DayComputation, PairingStrategy};
