pub mod card;
pub mod comment;
pub mod time_log;
