pub mod dashboard;
pub mod dispatch;
pub mod init;
pub mod project;
pub mod rates;
pub mod shared;
pub mod timeline;
