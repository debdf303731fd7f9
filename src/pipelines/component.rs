use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    datapoint::{AnnotationError, Image},
    mapper::MappingError,
};

/// The annotation categories a component adds to datapoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaAnnotation {
    /// Image annotation categories created
    pub image_annotations: BTreeSet<String>,

    /// Sub-category keys added, per image annotation category
    pub sub_categories: BTreeMap<String, BTreeSet<String>>,

    /// Relationship keys added, per image annotation category
    pub relationships: BTreeMap<String, BTreeSet<String>>,

    /// Summary keys added
    pub summaries: BTreeSet<String>,
}

impl MetaAnnotation {
    /// Fold another component's meta annotation into this one
    pub fn merge(&mut self, other: MetaAnnotation) {
        self.image_annotations.extend(other.image_annotations);
        self.summaries.extend(other.summaries);

        for (category, keys) in other.sub_categories {
            self.sub_categories.entry(category).or_default().extend(keys);
        }

        for (category, keys) in other.relationships {
            self.relationships.entry(category).or_default().extend(keys);
        }
    }
}

/// A stage that augments page datapoints in place
pub trait PipelineComponent {
    /// A name identifying the component and its model
    fn name(&self) -> &str;

    /// Process one datapoint
    fn serve(&self, dp: &mut Image) -> Result<(), ServiceError>;

    /// Process one datapoint and hand it back
    fn pass_datapoint(&self, mut dp: Image) -> Result<Image, ServiceError> {
        log::debug!("{} processing {}", self.name(), dp.image_id);

        self.serve(&mut dp)?;

        Ok(dp)
    }

    /// The annotations this component writes
    fn meta_annotation(&self) -> MetaAnnotation;
}

/// Service Error
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// Features could not be built from the datapoint
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The model failed
    #[error(transparent)]
    Prediction(anyhow::Error),

    /// Predictions could not be written onto the datapoint
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}
