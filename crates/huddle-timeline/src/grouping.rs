//! Day bucketing and compact-run detection
//!
//! Grouping is presentational but deterministic: bucket boundaries are
//! calendar days in the reader's UTC offset, sections run newest-first
//! while messages inside a section run oldest-first, and consecutive
//! messages from the same author collapse into a compact run when they are
//! close enough in time.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

use huddle_core::Message;

/// Largest gap, exclusive, between two messages of one compact run
pub const COMPACT_WINDOW_MINUTES: i64 = 5;

/// One message with its render hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub message: Message,
    /// Rendered without the author header: same author as the previous
    /// message of this day, gap strictly under the compact window
    pub compact: bool,
}

/// All messages of one calendar day, oldest-first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    /// Calendar day in the reader's offset
    pub date: NaiveDate,
    pub label: String,
    pub entries: Vec<TimelineEntry>,
}

/// Group messages into day sections for the reader at `offset`.
///
/// Accepts messages in any order. Sections come back newest day first;
/// entries within a section oldest first. `now` anchors the "Today" and
/// "Yesterday" labels.
pub fn group_into_days(
    messages: &[Message],
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Vec<DaySection> {
    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|m| (m.created_at, m.id));

    let today = now.with_timezone(&offset).date_naive();
    let window = Duration::minutes(COMPACT_WINDOW_MINUTES);

    let mut sections: Vec<DaySection> = Vec::new();
    for message in ordered {
        let date = message.created_at.with_timezone(&offset).date_naive();
        if sections.last().is_none_or(|section| section.date != date) {
            sections.push(DaySection {
                date,
                label: day_label(date, today),
                entries: Vec::new(),
            });
        }
        if let Some(section) = sections.last_mut() {
            let compact = section.entries.last().is_some_and(|previous| {
                previous.message.member_id == message.member_id
                    && message.created_at - previous.message.created_at < window
            });
            section.entries.push(TimelineEntry {
                message: message.clone(),
                compact,
            });
        }
    }

    sections.reverse();
    sections
}

/// Human label for a day section
fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%A, %B %-d").to_string()
    }
}
