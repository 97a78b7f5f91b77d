use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{Projected, Projection};
use crate::commit::Version;
use crate::event::Event;
use crate::stream_id::StreamId;

/// A card template: named, with an ordered field list and two templates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CardModel {
    pub id: StreamId,
    pub name: Option<String>,
    pub fields: Vec<String>,
    pub question_template: Option<String>,
    pub answer_template: Option<String>,
}

impl CardModel {
    fn empty(id: StreamId) -> Self {
        CardModel {
            id,
            ..Default::default()
        }
    }
}

/// Raw card data, for re-editing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditableCard {
    pub id: StreamId,
    pub model_id: StreamId,
    pub fields: BTreeMap<String, String>,
}

/// Everything the card and model editors display.
#[derive(Debug, Default)]
pub struct CardEditorProjection {
    models: HashMap<StreamId, CardModel>,
    model_ids: Vec<StreamId>,
    cards: HashMap<StreamId, EditableCard>,
}

impl CardEditorProjection {
    /// Known model ids, in the order they first appeared.
    pub fn card_models(&self) -> &[StreamId] {
        &self.model_ids
    }

    pub fn card_model(&self, id: StreamId) -> Option<&CardModel> {
        self.models.get(&id)
    }

    pub fn editable_card_for(&self, id: StreamId) -> Option<&EditableCard> {
        self.cards.get(&id)
    }

    fn update_model(&mut self, id: StreamId, f: impl FnOnce(&mut CardModel)) {
        let model = self.models.entry(id).or_insert_with(|| CardModel::empty(id));
        f(model);
        if !self.model_ids.contains(&id) {
            self.model_ids.push(id);
        }
    }
}

impl Projection for CardEditorProjection {
    fn apply(&mut self, stream_id: StreamId, event: &Event, _version: Version) {
        match event {
            Event::ModelNamed { name } => {
                self.update_model(stream_id, |model| model.name = Some(name.clone()));
            }
            Event::ModelFieldAdded { field } => self.update_model(stream_id, |model| {
                if !model.fields.contains(field) {
                    model.fields.push(field.clone());
                }
            }),
            Event::ModelTemplatesChanged {
                question_template,
                answer_template,
            } => self.update_model(stream_id, |model| {
                model.question_template = Some(question_template.clone());
                model.answer_template = Some(answer_template.clone());
            }),
            Event::CardEdited {
                model_id,
                card_fields,
            } => {
                self.cards.insert(
                    stream_id,
                    EditableCard {
                        id: stream_id,
                        model_id: *model_id,
                        fields: card_fields.clone(),
                    },
                );
            }
            Event::CardModelChanged { model_id } => {
                if let Some(card) = self.cards.get_mut(&stream_id) {
                    card.model_id = *model_id;
                }
            }
            Event::CardReviewed { .. } => {}
        }
    }
}

impl Projected<CardEditorProjection> {
    pub fn card_models(&self) -> Vec<StreamId> {
        self.read(|p| p.card_models().to_vec())
    }

    pub fn card_model(&self, id: StreamId) -> Option<CardModel> {
        self.read(|p| p.card_model(id).cloned())
    }

    pub fn editable_card_for(&self, id: StreamId) -> Option<EditableCard> {
        self.read(|p| p.editable_card_for(id).cloned())
    }
}
