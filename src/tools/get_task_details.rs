use serde::Deserialize;
use tracing::info;

use super::{validate, ToolError};
use crate::kaiten::CardSource;
use crate::model::card::Card;
use crate::shaping::pagination::paginate;

pub const DEFAULT_COMMENTS_LIMIT: usize = 20;
pub const MAX_COMMENTS_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct GetTaskDetailsParams {
    pub card_id: u64,
    #[serde(default = "default_include_comments")]
    pub include_comments: bool,
    #[serde(default = "default_comments_limit")]
    pub comments_limit: usize,
    #[serde(default)]
    pub comments_offset: usize,
}

fn default_include_comments() -> bool {
    true
}

fn default_comments_limit() -> usize {
    DEFAULT_COMMENTS_LIMIT
}

impl GetTaskDetailsParams {
    pub fn validate(&self) -> Result<(), ToolError> {
        validate::positive("card_id", self.card_id)?;
        validate::in_range("comments_limit", self.comments_limit, 1, MAX_COMMENTS_LIMIT)
    }
}

pub async fn run(source: &dyn CardSource, params: GetTaskDetailsParams) -> Result<Card, ToolError> {
    params.validate()?;
    info!(
        card_id = params.card_id,
        include_comments = params.include_comments,
        "get-task-details"
    );

    let mut card = source.get_card(params.card_id).await?;
    if params.include_comments {
        let comments = source.get_card_comments(params.card_id).await?;
        card.comments = Some(paginate(
            comments,
            params.comments_limit,
            params.comments_offset,
        ));
    }
    Ok(card)
}
