pub mod batch;
pub mod client;
pub mod error;
pub mod normalize;
pub mod raw;

use async_trait::async_trait;

use crate::model::card::{Card, CardUpdate, NewCard};
use crate::model::comment::Comment;
use crate::model::time_log::TimeLogEntry;
use error::ApiError;

/// Read/write access to Kaiten cards, already normalized.
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn get_card(&self, card_id: u64) -> Result<Card, ApiError>;
    /// Every comment on the card; Kaiten does not page this collection.
    async fn get_card_comments(&self, card_id: u64) -> Result<Vec<Comment>, ApiError>;
    async fn get_card_time_logs(&self, card_id: u64) -> Result<Vec<TimeLogEntry>, ApiError>;
    async fn create_card(&self, card: &NewCard) -> Result<Card, ApiError>;
    async fn update_card(&self, card_id: u64, changes: &CardUpdate) -> Result<Card, ApiError>;
}
