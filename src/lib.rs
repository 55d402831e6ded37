pub mod api;
pub mod core;
pub mod funds;
pub mod log;
pub mod report;
