use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::stream_id::StreamId;

/// How well a card was recalled during review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    Good,
    Poor,
    Fail,
}

impl Score {
    pub fn as_str(&self) -> &'static str {
        match self {
            Score::Good => "good",
            Score::Poor => "poor",
            Score::Fail => "fail",
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown score: {0:?}")]
pub struct UnknownScore(pub String);

impl FromStr for Score {
    type Err = UnknownScore;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Score::Good),
            "poor" => Ok(Score::Poor),
            "fail" => Ok(Score::Fail),
            other => Err(UnknownScore(other.to_string())),
        }
    }
}

/// A fact recorded against a model or card stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ModelNamed {
        name: String,
    },
    ModelFieldAdded {
        field: String,
    },
    ModelTemplatesChanged {
        question_template: String,
        answer_template: String,
    },
    CardEdited {
        model_id: StreamId,
        card_fields: BTreeMap<String, String>,
    },
    CardModelChanged {
        model_id: StreamId,
    },
    CardReviewed {
        score: Score,
        next_due_date: u64,
        interval: u64,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::ModelNamed { .. } => "ModelNamed",
            Event::ModelFieldAdded { .. } => "ModelFieldAdded",
            Event::ModelTemplatesChanged { .. } => "ModelTemplatesChanged",
            Event::CardEdited { .. } => "CardEdited",
            Event::CardModelChanged { .. } => "CardModelChanged",
            Event::CardReviewed { .. } => "CardReviewed",
        }
    }
}
