use serde::Deserialize;
use tracing::info;

use super::{validate, ToolError};
use crate::kaiten::batch::resolve_statuses;
use crate::kaiten::CardSource;
use crate::model::card::CardStatus;

pub const MAX_CARD_IDS: usize = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct GetTaskStatusParams {
    pub card_ids: Vec<u64>,
}

pub async fn run(
    source: &dyn CardSource,
    params: GetTaskStatusParams,
) -> Result<Vec<CardStatus>, ToolError> {
    validate::id_list("card_ids", &params.card_ids, 1, MAX_CARD_IDS)?;
    info!(count = params.card_ids.len(), "get-task-status");

    Ok(resolve_statuses(source, &params.card_ids).await?)
}
