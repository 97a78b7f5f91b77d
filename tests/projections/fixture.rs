use std::collections::BTreeMap;
use std::sync::Arc;

use srs_sourced::{
    CardEditing, CardEditorProjection, EventLog, InMemoryEventStore, ModelEditing, Models,
    Projected, ReviewProjection, ReviewScoring, StreamId,
};

/// A fully wired deck: log, projections and command handlers.
pub struct Deck {
    pub log: Arc<EventLog<InMemoryEventStore>>,
    pub reviews: Arc<Projected<ReviewProjection>>,
    pub editor: Arc<Projected<CardEditorProjection>>,
    pub models: ModelEditing<InMemoryEventStore>,
    pub cards: CardEditing<InMemoryEventStore>,
    pub scoring: ReviewScoring<InMemoryEventStore>,
}

impl Deck {
    pub fn new() -> Self {
        let log = Arc::new(EventLog::new(InMemoryEventStore::new()));
        let known_models = Projected::<Models>::start(&log).unwrap();
        Deck {
            reviews: Projected::start(&log).unwrap(),
            editor: Projected::start(&log).unwrap(),
            models: ModelEditing::new(log.clone()),
            cards: CardEditing::new(log.clone(), known_models),
            scoring: ReviewScoring::new(log.clone()),
            log,
        }
    }

    /// A model with fields word, meaning and sound.
    pub fn vocab_model(&self, question: &str, answer: &str) -> StreamId {
        let id = StreamId::new();
        for field in ["word", "meaning", "sound"] {
            self.models.add_model_field(id, field).unwrap();
        }
        self.models.edit_model_templates(id, question, answer).unwrap();
        id
    }
}

pub fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
