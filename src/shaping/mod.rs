pub mod pagination;
pub mod time_logs;
