pub mod dashboard;
pub mod project;
pub mod rates;
pub mod timeline;

pub use dashboard::DashboardCommands;
pub use project::ProjectCommands;
pub use rates::RatesCommands;
pub use timeline::TimelineCommands;
