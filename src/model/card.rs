use serde::{de, Deserialize, Deserializer, Serialize};

use super::comment::CommentsPage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub card_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub state: String,
    pub board_id: u64,
    pub column_id: u64,
    pub lane_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub members: Vec<Member>,
    pub tags: Vec<Tag>,
    pub created_at: String,
    pub updated_at: String,
    /// Present only when comments were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<CommentsPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: u64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

/// Body of `POST /cards`. Unset optional fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub title: String,
    pub board_id: u64,
    pub column_id: u64,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub lane_id: Option<u64>,
    /// 1 = top of the column, 2 = bottom.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<u8>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<u64>>,
}

/// Body of `PATCH /cards/{id}`. Only the fields the caller set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardUpdate {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub column_id: Option<u64>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub lane_id: Option<u64>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<u64>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub members: Option<Vec<u64>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<u64>>,
}

/// Optional request fields may be omitted but not sent as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(de::Error::custom(
            "null is not accepted; omit the field to leave it unset",
        )),
    }
}

/// Lightweight per-card entry of a batch status lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardStatus {
    Found {
        card_id: u64,
        title: String,
        board_id: u64,
        column_id: u64,
        state: String,
        updated_at: String,
    },
    Failed {
        card_id: u64,
        error: String,
    },
}

impl From<Card> for CardStatus {
    fn from(card: Card) -> Self {
        CardStatus::Found {
            card_id: card.card_id,
            title: card.title,
            board_id: card.board_id,
            column_id: card.column_id,
            state: card.state,
            updated_at: card.updated_at,
        }
    }
}
