use std::fmt::Display;

use crate::settings::{LayoutType, PageType, WordType};

/// Component trait and meta annotations
pub mod component;

/// Writing predictions onto datapoints
pub mod manager;

/// Service configuration
pub mod config;

/// Token Classification
pub mod token_classification;

/// Sequence Classification
pub mod sequence_classification;

/// Chaining components
pub mod pipeline;

pub use component::{MetaAnnotation, PipelineComponent, ServiceError};
pub use config::ServiceConfig;
pub use manager::DatapointManager;
pub use pipeline::DocPipeline;
pub use sequence_classification::LmSequenceClassifierService;
pub use token_classification::LmTokenClassifierService;

/// The unique string token that identifies token classification
pub static TOKEN_CLASSIFICATION: &str = "token-classification";

/// The unique string token that identifies sequence classification
pub static SEQUENCE_CLASSIFICATION: &str = "sequence-classification";

/// Available Tasks
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Task {
    /// Token Classification
    TokenClassification,

    /// Sequence Classification
    SequenceClassification,
}

impl Task {
    /// The annotations a service for this task writes
    pub fn meta_annotation(&self) -> MetaAnnotation {
        let mut meta = MetaAnnotation::default();

        match self {
            Task::TokenClassification => {
                meta.sub_categories.insert(
                    LayoutType::Word.to_string(),
                    [WordType::TokenClass, WordType::Tag, WordType::TokenTag]
                        .iter()
                        .map(|key| key.to_string())
                        .collect(),
                );
            }
            Task::SequenceClassification => {
                meta.summaries.insert(PageType::DocumentType.to_string());
            }
        }

        meta
    }
}

impl TryFrom<&str> for Task {
    type Error = TaskError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == TOKEN_CLASSIFICATION {
            Ok(Task::TokenClassification)
        } else if value == SEQUENCE_CLASSIFICATION {
            Ok(Task::SequenceClassification)
        } else {
            Err(TaskError::Unknown(value.to_string()))
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Task::TokenClassification => TOKEN_CLASSIFICATION,
            Task::SequenceClassification => SEQUENCE_CLASSIFICATION,
        };

        write!(f, "{}", name)
    }
}

/// Task Error
#[derive(thiserror::Error, Debug)]
pub enum TaskError {
    /// No task found for the given string
    #[error("no task found for {0}")]
    Unknown(String),
}
