use std::collections::BTreeMap;
use std::sync::Arc;

use crate::commit::Version;
use crate::error::CommandError;
use crate::event::Event;
use crate::event_log::EventLog;
use crate::projection::{Models, Projected};
use crate::replay::{hydrate, StreamVersion};
use crate::store::EventStore;
use crate::stream_id::StreamId;

pub struct CardEditing<S> {
    log: Arc<EventLog<S>>,
    models: Arc<Projected<Models>>,
}

impl<S: EventStore> CardEditing<S> {
    /// `models` must already be subscribed to `log`.
    pub fn new(log: Arc<EventLog<S>>, models: Arc<Projected<Models>>) -> Self {
        CardEditing { log, models }
    }

    /// Record new field data for a card, which must cover every field the
    /// model declares.
    pub fn add_or_edit_card(
        &self,
        id: StreamId,
        model_id: StreamId,
        fields: BTreeMap<String, String>,
    ) -> Result<Version, CommandError> {
        let expected = self
            .models
            .fetch(model_id)
            .ok_or(CommandError::UnknownModel(model_id))?;

        let mut missing: Vec<String> = expected
            .into_iter()
            .filter(|field| !fields.contains_key(field))
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(CommandError::MissingFields {
                supplied: fields.keys().cloned().collect(),
                missing,
            });
        }

        let card: StreamVersion = hydrate(&self.log, id)?;
        let version = self.log.record(
            id,
            Event::CardEdited {
                model_id,
                card_fields: fields,
            },
            card.version,
        )?;
        Ok(version)
    }

    /// Point an existing card at a different model.
    pub fn change_card_model(
        &self,
        id: StreamId,
        model_id: StreamId,
    ) -> Result<Version, CommandError> {
        if self.models.fetch(model_id).is_none() {
            return Err(CommandError::UnknownModel(model_id));
        }
        let card: StreamVersion = hydrate(&self.log, id)?;
        let version = self
            .log
            .record(id, Event::CardModelChanged { model_id }, card.version)?;
        Ok(version)
    }
}
