use tracing::info;

use super::validate::{self, MAX_DESCRIPTION_CHARS, MAX_ID_LIST, MAX_TITLE_CHARS};
use super::ToolError;
use crate::kaiten::CardSource;
use crate::model::card::{Card, NewCard};

/// The arguments are sent to Kaiten verbatim once validated.
pub type CreateTaskParams = NewCard;

fn check(params: &CreateTaskParams) -> Result<(), ToolError> {
    validate::text_len("title", &params.title, 1, MAX_TITLE_CHARS)?;
    validate::positive("board_id", params.board_id)?;
    validate::positive("column_id", params.column_id)?;
    validate::positive_opt("lane_id", params.lane_id)?;
    if let Some(description) = &params.description {
        validate::text_len("description", description, 0, MAX_DESCRIPTION_CHARS)?;
    }
    if let Some(position) = params.position {
        if !matches!(position, 1 | 2) {
            return Err(ToolError::invalid(
                "position must be 1 (top of column) or 2 (bottom)",
            ));
        }
    }
    if let Some(tags) = &params.tags {
        validate::id_list("tags", tags, 0, MAX_ID_LIST)?;
    }
    Ok(())
}

pub async fn run(source: &dyn CardSource, params: CreateTaskParams) -> Result<Card, ToolError> {
    check(&params)?;
    info!(board_id = params.board_id, column_id = params.column_id, "create-task");

    Ok(source.create_card(&params).await?)
}
