use std::sync::Arc;

use crate::commit::Version;
use crate::error::Result;
use crate::event::{Event, Score};
use crate::event_log::EventLog;
use crate::replay::{hydrate, Aggregate};
use crate::store::EventStore;
use crate::stream_id::StreamId;

/// Scheduling state of one card, rebuilt from its `CardReviewed` events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReviewableCard {
    pub id: StreamId,
    pub version: Option<Version>,
    pub next_due_date: u64,
    pub interval: u64,
}

impl Aggregate for ReviewableCard {
    fn empty(id: StreamId) -> Self {
        ReviewableCard {
            id,
            version: None,
            next_due_date: 0,
            interval: 0,
        }
    }

    fn apply(self, event: &Event, version: Version) -> Self {
        match event {
            Event::CardReviewed {
                next_due_date,
                interval,
                ..
            } => ReviewableCard {
                version: Some(version),
                next_due_date: *next_due_date,
                interval: *interval,
                ..self
            },
            _ => ReviewableCard {
                version: Some(version),
                ..self
            },
        }
    }
}

/// Interval after scoring a card whose current interval is `interval`.
///
/// Good doubles it, poor keeps it, fail resets it; good and poor never go
/// below one day.
pub fn next_interval(interval: u64, score: Score) -> u64 {
    match score {
        Score::Good => interval.saturating_mul(2).max(1),
        Score::Poor => interval.max(1),
        Score::Fail => 0,
    }
}

pub struct ReviewScoring<S> {
    log: Arc<EventLog<S>>,
}

impl<S: EventStore> ReviewScoring<S> {
    pub fn new(log: Arc<EventLog<S>>) -> Self {
        ReviewScoring { log }
    }

    /// Score a card and schedule its next review.
    pub fn score_card(&self, id: StreamId, score: Score) -> Result<ReviewableCard> {
        let card: ReviewableCard = hydrate(&self.log, id)?;
        let interval = next_interval(card.interval, score);
        let next_due_date = card.next_due_date.saturating_add(interval);

        let version = self.log.record(
            id,
            Event::CardReviewed {
                score,
                next_due_date,
                interval,
            },
            card.version,
        )?;

        Ok(ReviewableCard {
            id,
            version: Some(version),
            next_due_date,
            interval,
        })
    }

    pub fn card(&self, id: StreamId) -> Result<ReviewableCard> {
        hydrate(&self.log, id)
    }
}
