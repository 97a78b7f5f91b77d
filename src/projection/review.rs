use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::template::render;
use super::{Projected, Projection};
use crate::commit::Version;
use crate::event::Event;
use crate::stream_id::StreamId;

/// A card as shown for review.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: StreamId,
    pub question: String,
    pub answer: String,
    pub review_count: u64,
    pub due_date: u64,
}

impl Card {
    pub fn new(id: StreamId) -> Self {
        Card {
            id,
            ..Default::default()
        }
    }

    pub fn as_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Default)]
struct CardFormat {
    question_template: String,
    answer_template: String,
}

#[derive(Debug)]
struct CardSource {
    model_id: StreamId,
    fields: BTreeMap<String, String>,
}

/// Rendered cards with their review schedule.
///
/// Raw fields and templates are kept separately so either can arrive first;
/// a card is re-rendered whenever its fields, its model, or that model's
/// templates change.
#[derive(Debug, Default)]
pub struct ReviewProjection {
    cards: HashMap<StreamId, Card>,
    sources: HashMap<StreamId, CardSource>,
    formats: HashMap<StreamId, CardFormat>,
}

impl ReviewProjection {
    pub fn card_for(&self, id: StreamId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// All cards, earliest due first.
    pub fn all_cards(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.values().collect();
        cards.sort_by_key(|card| (card.due_date, card.id));
        cards
    }

    /// The card due soonest, provided it is due at or before `time`.
    pub fn next_card_upto(&self, time: u64) -> Option<&Card> {
        self.cards
            .values()
            .min_by_key(|card| (card.due_date, card.id))
            .filter(|card| card.due_date <= time)
    }

    /// Insert or replace a card directly, bypassing the log.
    pub fn enqueue_card(&mut self, card: Card) {
        self.cards.insert(card.id, card);
    }

    fn rerender(&mut self, card_id: StreamId) {
        let Some(source) = self.sources.get(&card_id) else {
            return;
        };
        let (question, answer) = match self.formats.get(&source.model_id) {
            Some(format) => (
                render(&format.question_template, &source.fields),
                render(&format.answer_template, &source.fields),
            ),
            None => (String::new(), String::new()),
        };
        let card = self
            .cards
            .entry(card_id)
            .or_insert_with(|| Card::new(card_id));
        card.question = question;
        card.answer = answer;
    }
}

impl Projection for ReviewProjection {
    fn apply(&mut self, stream_id: StreamId, event: &Event, _version: Version) {
        match event {
            Event::CardReviewed { next_due_date, .. } => {
                let card = self
                    .cards
                    .entry(stream_id)
                    .or_insert_with(|| Card::new(stream_id));
                card.review_count += 1;
                card.due_date = *next_due_date;
            }
            Event::CardEdited {
                model_id,
                card_fields,
            } => {
                self.sources.insert(
                    stream_id,
                    CardSource {
                        model_id: *model_id,
                        fields: card_fields.clone(),
                    },
                );
                self.rerender(stream_id);
            }
            Event::CardModelChanged { model_id } => {
                if let Some(source) = self.sources.get_mut(&stream_id) {
                    source.model_id = *model_id;
                    self.rerender(stream_id);
                }
            }
            Event::ModelTemplatesChanged {
                question_template,
                answer_template,
            } => {
                self.formats.insert(
                    stream_id,
                    CardFormat {
                        question_template: question_template.clone(),
                        answer_template: answer_template.clone(),
                    },
                );
                let affected: Vec<StreamId> = self
                    .sources
                    .iter()
                    .filter(|(_, source)| source.model_id == stream_id)
                    .map(|(card_id, _)| *card_id)
                    .collect();
                for card_id in affected {
                    self.rerender(card_id);
                }
            }
            Event::ModelNamed { .. } | Event::ModelFieldAdded { .. } => {}
        }
    }
}

impl Projected<ReviewProjection> {
    pub fn card_for(&self, id: StreamId) -> Option<Card> {
        self.read(|p| p.card_for(id).cloned())
    }

    pub fn all_cards(&self) -> Vec<Card> {
        self.read(|p| p.all_cards().into_iter().cloned().collect())
    }

    pub fn next_card_upto(&self, time: u64) -> Option<Card> {
        self.read(|p| p.next_card_upto(time).cloned())
    }

    pub fn enqueue_card(&self, card: Card) {
        self.write(|p| p.enqueue_card(card))
    }
}
