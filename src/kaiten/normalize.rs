//! Mapping from Kaiten wire types to the stable output schema.

use super::raw::{RawCard, RawComment, RawTimeLog};
use crate::model::card::{Card, Member, Tag};
use crate::model::comment::Comment;
use crate::model::time_log::TimeLogEntry;

const STATE_LABELS: &[(i64, &str)] = &[(1, "active")];

/// Label for a Kaiten state code. Codes outside the known table become
/// `unknown_<code>`; callers depend on that exact shape.
pub fn map_state(state: i64) -> String {
    STATE_LABELS
        .iter()
        .find(|(code, _)| *code == state)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| format!("unknown_{state}"))
}

pub fn card(raw: RawCard) -> Card {
    Card {
        card_id: raw.id,
        title: raw.title,
        description: raw.description,
        state: map_state(raw.state),
        board_id: raw.board_id,
        column_id: raw.column_id,
        lane_id: raw.lane_id,
        owner_id: raw.owner_id,
        members: raw
            .members
            .into_iter()
            .map(|m| Member {
                id: m.id,
                full_name: m.full_name,
            })
            .collect(),
        tags: raw
            .tags
            .into_iter()
            .map(|t| Tag {
                id: t.id,
                name: t.name,
            })
            .collect(),
        created_at: raw.created,
        updated_at: raw.updated,
        comments: None,
    }
}

pub fn comment(raw: RawComment) -> Comment {
    Comment {
        id: raw.id,
        author_id: raw.author_id,
        text: raw.text,
        created_at: raw.created,
        updated_at: raw.updated,
    }
}

pub fn time_log(raw: RawTimeLog) -> TimeLogEntry {
    TimeLogEntry {
        id: raw.id,
        user_id: raw.user_id,
        author_id: raw.author_id,
        time_spent: raw.time_spent,
        for_date: raw.for_date,
        comment: raw.comment,
        created_at: raw.created,
    }
}
