//! Wire types as returned by the Kaiten REST API.

use serde::Deserialize;

/// `GET /cards/{id}`, also the response body of create and update.
#[derive(Debug, Deserialize)]
pub struct RawCard {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub state: i64,
    pub board_id: u64,
    pub column_id: u64,
    pub lane_id: Option<u64>,
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub members: Vec<RawMember>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Deserialize)]
pub struct RawMember {
    pub id: u64,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawTag {
    pub id: u64,
    pub name: String,
}

/// Element of `GET /cards/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct RawComment {
    pub id: u64,
    pub text: String,
    pub author_id: u64,
    pub created: String,
    pub updated: String,
}

/// Element of `GET /cards/{id}/time-logs`.
#[derive(Debug, Deserialize)]
pub struct RawTimeLog {
    pub id: u64,
    pub user_id: u64,
    pub author_id: u64,
    pub time_spent: i64,
    pub for_date: String,
    pub comment: Option<String>,
    pub created: String,
}
