use std::sync::Arc;

use crate::commit::Version;
use crate::error::Result;
use crate::event::Event;
use crate::event_log::EventLog;
use crate::replay::{hydrate, StreamVersion};
use crate::store::EventStore;
use crate::stream_id::StreamId;

pub struct ModelEditing<S> {
    log: Arc<EventLog<S>>,
}

impl<S: EventStore> ModelEditing<S> {
    pub fn new(log: Arc<EventLog<S>>) -> Self {
        ModelEditing { log }
    }

    /// Start a new model stream with the given name.
    pub fn new_model(&self, name: impl Into<String>) -> Result<StreamId> {
        let id = StreamId::new();
        self.name_model(id, name)?;
        Ok(id)
    }

    pub fn name_model(&self, id: StreamId, name: impl Into<String>) -> Result<Version> {
        self.record(id, Event::ModelNamed { name: name.into() })
    }

    pub fn edit_model_templates(
        &self,
        id: StreamId,
        question_template: impl Into<String>,
        answer_template: impl Into<String>,
    ) -> Result<Version> {
        self.record(
            id,
            Event::ModelTemplatesChanged {
                question_template: question_template.into(),
                answer_template: answer_template.into(),
            },
        )
    }

    pub fn add_model_field(&self, id: StreamId, field: impl Into<String>) -> Result<Version> {
        self.record(
            id,
            Event::ModelFieldAdded {
                field: field.into(),
            },
        )
    }

    fn record(&self, id: StreamId, event: Event) -> Result<Version> {
        let current: StreamVersion = hydrate(&self.log, id)?;
        self.log.record(id, event, current.version)
    }
}
