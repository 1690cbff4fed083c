use serde::Deserialize;
use tracing::info;

use super::{validate, ToolError};
use crate::kaiten::CardSource;
use crate::model::time_log::{GroupBy, TimeLogReport};
use crate::shaping::time_logs::aggregate;

#[derive(Debug, Clone, Deserialize)]
pub struct GetTimeLogsParams {
    pub card_id: u64,
    #[serde(default)]
    pub group_by: GroupBy,
}

pub async fn run(
    source: &dyn CardSource,
    params: GetTimeLogsParams,
) -> Result<TimeLogReport, ToolError> {
    validate::positive("card_id", params.card_id)?;
    info!(card_id = params.card_id, group_by = ?params.group_by, "get-time-logs");

    let entries = source.get_card_time_logs(params.card_id).await?;
    Ok(aggregate(params.card_id, entries, params.group_by).map_err(anyhow::Error::from)?)
}
