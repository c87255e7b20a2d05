use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use planning_core::controller::{Message, NoticeLevel};
use planning_core::draft::{Draft, Repeat};
use planning_core::id::EventId;
use planning_core::menu::MenuAction;

use crate::commands::{self, Filters};
use crate::render::Render;

/// Where and how often the copy is created.
#[derive(Debug, Default)]
pub struct CopyTarget {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub repetitions: u32,
    pub weekly: bool,
}

pub async fn run(filters: &Filters, id: EventId, target: CopyTarget) -> Result<()> {
    let mut session = commands::open(filters).await?;
    commands::select(&mut session, &id).await?;

    // A clipboard failure is reported but does not stop the copy.
    for notice in session.dispatch(Message::Menu(MenuAction::Duplicate)).await {
        match notice.level {
            NoticeLevel::Error => eprintln!("{}", notice.render()),
            _ => println!("{}", notice.render()),
        }
    }

    let template = session
        .state()
        .composition()
        .map(|c| c.draft.clone())
        .context("The duplicate form did not open")?;

    let draft = Draft {
        repetitions: target.repetitions,
        repeat: if target.weekly {
            Repeat::Weekly
        } else {
            Repeat::SameSlot
        },
        ..shifted(template, target.date, target.start)
    };

    let notices = session.dispatch(Message::SubmitForm(draft)).await;
    commands::finish(notices)
}

/// Move a draft to another date and/or start time, keeping its length.
fn shifted(draft: Draft, date: Option<NaiveDate>, start: Option<NaiveTime>) -> Draft {
    let (Some(new_start), Some(old_start), Some(old_end)) = (start, draft.start, draft.end) else {
        return Draft {
            date: date.or(draft.date),
            ..draft
        };
    };

    let end = new_start + (old_end - old_start);
    Draft {
        date: date.or(draft.date),
        start: Some(new_start),
        end: Some(end),
        ..draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn shifting_keeps_duration() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let draft = Draft::from_slot(date, time(10, 0), time(11, 30));

        let moved = shifted(draft, None, Some(time(14, 0)));

        assert_eq!(moved.date, Some(date));
        assert_eq!(moved.start, Some(time(14, 0)));
        assert_eq!(moved.end, Some(time(15, 30)));
    }
}
