pub mod attendance;
pub mod calendar;
pub mod personnel;
pub mod request;
pub mod shift;
pub mod summary;

pub(crate) mod macros;

// Re-export all models for easy importing
pub use attendance::*;
pub use calendar::*;
pub use personnel::*;
pub use request::*;
pub use shift::*;
pub use summary::*;
