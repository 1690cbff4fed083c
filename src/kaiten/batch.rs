use futures::future::join_all;
use tracing::debug;

use super::error::ApiError;
use super::CardSource;
use crate::model::card::CardStatus;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Look up every card concurrently and report one status per id, in input
/// order. Per-card failures become `CardStatus::Failed`; an authentication
/// failure aborts the whole batch.
pub async fn resolve_statuses(
    source: &dyn CardSource,
    card_ids: &[u64],
) -> Result<Vec<CardStatus>, ApiError> {
    let results = join_all(card_ids.iter().map(|&id| source.get_card(id))).await;

    if let Some(fatal) = results
        .iter()
        .find_map(|r| r.as_ref().err().filter(|e| e.is_fatal()))
    {
        return Err(fatal.clone());
    }

    let statuses: Vec<CardStatus> = card_ids
        .iter()
        .zip(results)
        .map(|(&card_id, result)| match result {
            Ok(card) => CardStatus::from(card),
            Err(err) => {
                debug!(
                    card_id,
                    status = err.status,
                    error = %err,
                    "card status lookup failed"
                );
                let error = if err.is_expected() {
                    err.message
                } else {
                    UNKNOWN_ERROR.to_string()
                };
                CardStatus::Failed { card_id, error }
            }
        })
        .collect();

    Ok(statuses)
}
