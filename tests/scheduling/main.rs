//! Spaced-repetition scheduling, driven through the real event log.

use std::collections::BTreeMap;
use std::sync::Arc;

use srs_sourced::{
    Event, EventLog, ExpectedVersion, InMemoryEventStore, Projected, ReviewProjection,
    ReviewScoring, Score, StreamId,
};
use Score::{Fail, Good, Poor};

fn schedule(scores: &[Score]) -> (Vec<u64>, Vec<u64>) {
    let log = Arc::new(EventLog::new(InMemoryEventStore::new()));
    let scoring = ReviewScoring::new(log);
    let card = StreamId::new();

    scores
        .iter()
        .map(|score| {
            let reviewed = scoring.score_card(card, *score).unwrap();
            (reviewed.next_due_date, reviewed.interval)
        })
        .unzip()
}

#[test]
fn good_doubles_the_interval() {
    assert_eq!(schedule(&[Good; 4]), (vec![1, 3, 7, 15], vec![1, 2, 4, 8]));
}

#[test]
fn fail_resets_the_interval() {
    assert_eq!(
        schedule(&[Good, Good, Fail, Good]),
        (vec![1, 3, 3, 4], vec![1, 2, 0, 1])
    );
}

#[test]
fn poor_keeps_the_interval() {
    assert_eq!(
        schedule(&[Good, Good, Poor, Poor]),
        (vec![1, 3, 5, 7], vec![1, 2, 2, 2])
    );
}

#[test]
fn initial_poor_floors_interval_at_one() {
    assert_eq!(
        schedule(&[Poor, Good, Good, Good]),
        (vec![1, 3, 7, 15], vec![1, 2, 4, 8])
    );
}

#[test]
fn poor_after_fail_floors_interval_at_one() {
    assert_eq!(
        schedule(&[Good, Good, Fail, Poor]),
        (vec![1, 3, 3, 4], vec![1, 2, 0, 1])
    );
}

#[test]
fn other_card_events_only_advance_the_version() {
    let log = Arc::new(EventLog::new(InMemoryEventStore::new()));
    let card = StreamId::new();
    let model = StreamId::new();

    let mut expected = ExpectedVersion::NoStream;
    for _ in 0..4 {
        let v = log
            .record(
                card,
                Event::CardEdited {
                    model_id: model,
                    card_fields: BTreeMap::new(),
                },
                expected,
            )
            .unwrap();
        expected = ExpectedVersion::Exact(v);
    }

    let scoring = ReviewScoring::new(log.clone());
    let dates: Vec<u64> = (0..4)
        .map(|_| scoring.score_card(card, Good).unwrap().next_due_date)
        .collect();
    assert_eq!(dates, vec![1, 3, 7, 15]);

    let reviews: Vec<u64> = log
        .events_for_stream(card)
        .unwrap()
        .into_iter()
        .filter(|(event, _)| matches!(event, Event::CardReviewed { .. }))
        .map(|(_, version)| version)
        .collect();
    assert_eq!(reviews, vec![4, 5, 6, 7]);
}

#[test]
fn due_date_saturates_at_the_end_of_time() {
    let log = Arc::new(EventLog::new(InMemoryEventStore::new()));
    let card = StreamId::new();
    log.record(
        card,
        Event::CardReviewed {
            score: Good,
            next_due_date: u64::MAX - 1,
            interval: 4,
        },
        ExpectedVersion::NoStream,
    )
    .unwrap();

    let scoring = ReviewScoring::new(log);
    let reviewed = scoring.score_card(card, Good).unwrap();
    assert_eq!(reviewed.interval, 8);
    assert_eq!(reviewed.next_due_date, u64::MAX);
    assert_eq!(reviewed.version, Some(1));
}

#[test]
fn recorded_review_carries_the_score() {
    let log = Arc::new(EventLog::new(InMemoryEventStore::new()));
    let scoring = ReviewScoring::new(log.clone());
    let card = StreamId::new();

    let reviewed = scoring.score_card(card, Poor).unwrap();
    assert_eq!(reviewed.version, Some(0));
    assert_eq!(
        log.events_for_stream(card).unwrap(),
        vec![(
            Event::CardReviewed {
                score: Poor,
                next_due_date: 1,
                interval: 1,
            },
            0
        )]
    );
}

#[test]
fn concurrent_write_surfaces_as_conflict() {
    let log = Arc::new(EventLog::new(InMemoryEventStore::new()));
    let scoring = ReviewScoring::new(log.clone());
    let card = StreamId::new();

    let stale = scoring.card(card).unwrap();
    scoring.score_card(card, Good).unwrap();

    let err = log
        .record(
            card,
            Event::CardReviewed {
                score: Good,
                next_due_date: 1,
                interval: 1,
            },
            stale.version,
        )
        .unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn review_projection_follows_scoring() {
    let log = Arc::new(EventLog::new(InMemoryEventStore::new()));
    let reviews = Projected::<ReviewProjection>::start(&log).unwrap();
    let scoring = ReviewScoring::new(log.clone());
    let card = StreamId::new();

    scoring.score_card(card, Good).unwrap();
    scoring.score_card(card, Good).unwrap();

    let view = reviews.card_for(card).unwrap();
    assert_eq!(view.review_count, 2);
    assert_eq!(view.due_date, 3);
    assert!(reviews.next_card_upto(2).is_none());
    assert_eq!(reviews.next_card_upto(3).map(|c| c.id), Some(card));
}
