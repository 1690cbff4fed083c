use serde::Deserialize;
use tracing::info;

use super::validate::{self, MAX_DESCRIPTION_CHARS, MAX_ID_LIST, MAX_TITLE_CHARS};
use super::ToolError;
use crate::kaiten::CardSource;
use crate::model::card::{Card, CardUpdate};

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskParams {
    pub card_id: u64,
    #[serde(flatten)]
    pub changes: CardUpdate,
}

impl UpdateTaskParams {
    pub fn validate(&self) -> Result<(), ToolError> {
        validate::positive("card_id", self.card_id)?;
        let changes = &self.changes;
        if let Some(title) = &changes.title {
            validate::text_len("title", title, 1, MAX_TITLE_CHARS)?;
        }
        if let Some(description) = &changes.description {
            validate::text_len("description", description, 0, MAX_DESCRIPTION_CHARS)?;
        }
        validate::positive_opt("column_id", changes.column_id)?;
        validate::positive_opt("lane_id", changes.lane_id)?;
        validate::positive_opt("owner_id", changes.owner_id)?;
        if let Some(members) = &changes.members {
            validate::id_list("members", members, 0, MAX_ID_LIST)?;
        }
        if let Some(tags) = &changes.tags {
            validate::id_list("tags", tags, 0, MAX_ID_LIST)?;
        }
        Ok(())
    }
}

/// Returns the card exactly as Kaiten reports it after the write.
pub async fn run(source: &dyn CardSource, params: UpdateTaskParams) -> Result<Card, ToolError> {
    params.validate()?;
    info!(card_id = params.card_id, "update-task");

    Ok(source.update_card(params.card_id, &params.changes).await?)
}
