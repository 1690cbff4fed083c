use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

use crate::model::time_log::{
    DateGroup, GroupBy, TimeLogEntry, TimeLogReport, TimeLogView, UserGroup,
};

#[derive(Debug, Error, PartialEq)]
#[error("time logged on card {card_id} overflows the minute total")]
pub struct TotalOverflow {
    pub card_id: u64,
}

/// Sum of `time_spent`, or `None` if it does not fit in an `i64`.
pub fn total_minutes(entries: &[TimeLogEntry]) -> Option<i64> {
    entries
        .iter()
        .try_fold(0i64, |sum, e| sum.checked_add(e.time_spent))
}

/// Build the report for one card. Every mode carries the same grand total.
pub fn aggregate(
    card_id: u64,
    entries: Vec<TimeLogEntry>,
    group_by: GroupBy,
) -> Result<TimeLogReport, TotalOverflow> {
    let total = total_minutes(&entries).ok_or(TotalOverflow { card_id })?;
    let view = match group_by {
        GroupBy::None => TimeLogView::Entries(entries),
        GroupBy::User => TimeLogView::ByUser(
            group_in_order(entries, |e| e.user_id)
                .into_iter()
                .map(|(user_id, entries)| {
                    Ok(UserGroup {
                        user_id,
                        total_minutes: total_minutes(&entries).ok_or(TotalOverflow { card_id })?,
                        entries,
                    })
                })
                .collect::<Result<_, TotalOverflow>>()?,
        ),
        GroupBy::Date => TimeLogView::ByDate(
            group_in_order(entries, |e| e.for_date.clone())
                .into_iter()
                .map(|(for_date, entries)| {
                    Ok(DateGroup {
                        for_date,
                        total_minutes: total_minutes(&entries).ok_or(TotalOverflow { card_id })?,
                        entries,
                    })
                })
                .collect::<Result<_, TotalOverflow>>()?,
        ),
    };

    Ok(TimeLogReport {
        card_id,
        total_minutes: total,
        view,
    })
}

/// Partition by key. Groups come out in order of each key's first
/// appearance; entries keep their relative order.
fn group_in_order<K, F>(entries: Vec<TimeLogEntry>, key: F) -> Vec<(K, Vec<TimeLogEntry>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&TimeLogEntry) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<TimeLogEntry>)> = Vec::new();

    for entry in entries {
        let k = key(&entry);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(entry),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![entry]));
            }
        }
    }

    groups
}
