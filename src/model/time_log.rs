use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeLogEntry {
    pub id: u64,
    pub user_id: u64,
    pub author_id: u64,
    /// Whatever unit Kaiten reports, normally minutes.
    pub time_spent: i64,
    /// Calendar day the work applies to, not when the entry was made.
    pub for_date: String,
    pub comment: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    User,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserGroup {
    pub user_id: u64,
    pub total_minutes: i64,
    pub entries: Vec<TimeLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub for_date: String,
    pub total_minutes: i64,
    pub entries: Vec<TimeLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TimeLogView {
    #[serde(rename = "entries")]
    Entries(Vec<TimeLogEntry>),
    #[serde(rename = "by_user")]
    ByUser(Vec<UserGroup>),
    #[serde(rename = "by_date")]
    ByDate(Vec<DateGroup>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeLogReport {
    pub card_id: u64,
    pub total_minutes: i64,
    #[serde(flatten)]
    pub view: TimeLogView,
}
