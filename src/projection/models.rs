use std::collections::HashMap;

use super::{Projected, Projection};
use crate::commit::Version;
use crate::event::Event;
use crate::stream_id::StreamId;

/// Declared field names of each card model, in the order they were added.
#[derive(Debug, Default)]
pub struct Models {
    fields: HashMap<StreamId, Vec<String>>,
}

impl Models {
    pub fn fields(&self, model_id: StreamId) -> Option<&[String]> {
        self.fields.get(&model_id).map(Vec::as_slice)
    }

    pub fn contains(&self, model_id: StreamId) -> bool {
        self.fields.contains_key(&model_id)
    }
}

impl Projection for Models {
    fn apply(&mut self, stream_id: StreamId, event: &Event, _version: Version) {
        match event {
            Event::ModelFieldAdded { field } => {
                let fields = self.fields.entry(stream_id).or_default();
                if !fields.contains(field) {
                    fields.push(field.clone());
                }
            }
            Event::ModelNamed { .. } | Event::ModelTemplatesChanged { .. } => {
                self.fields.entry(stream_id).or_default();
            }
            Event::CardEdited { .. }
            | Event::CardModelChanged { .. }
            | Event::CardReviewed { .. } => {}
        }
    }
}

impl Projected<Models> {
    /// Declared fields of `model_id`, or `None` if no such model exists.
    pub fn fetch(&self, model_id: StreamId) -> Option<Vec<String>> {
        self.read(|models| models.fields(model_id).map(<[String]>::to_vec))
    }
}
