use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    settings::{Relationships, WordType},
    utils::ids::get_uuid,
};

use super::{AnnotationError, BoundingBox};

/// Shared access to the sub-categories of an annotation
pub trait SubCategories {
    /// The id of the annotation owning the sub-categories
    fn annotation_id(&self) -> &str;

    /// The sub-categories, keyed by sub-category name
    fn sub_categories(&self) -> &BTreeMap<String, CategoryAnnotation>;

    /// Mutable sub-categories
    fn sub_categories_mut(&mut self) -> &mut BTreeMap<String, CategoryAnnotation>;

    /// Look up a sub-category by key
    fn get_sub_category(&self, key: &str) -> Result<&CategoryAnnotation, AnnotationError> {
        self.sub_categories()
            .get(key)
            .ok_or_else(|| AnnotationError::MissingSubCategory {
                annotation_id: self.annotation_id().to_string(),
                key: key.to_string(),
            })
    }

    /// Attach a sub-category under `key`, replacing an existing one. Returns the id of the
    /// sub-category, which is derived from its parent when not set.
    fn dump_sub_category(&mut self, key: &str, mut category: CategoryAnnotation) -> String {
        if category.annotation_id.is_empty() {
            category.annotation_id =
                get_uuid(&[category.category_name.as_str(), key, self.annotation_id()]);
        }

        let annotation_id = category.annotation_id.clone();
        self.sub_categories_mut().insert(key.to_string(), category);

        annotation_id
    }

    /// Remove a sub-category, returning it when present
    fn remove_sub_category(&mut self, key: &str) -> Option<CategoryAnnotation> {
        self.sub_categories_mut().remove(key)
    }
}

/// A category, optionally carrying a value (e.g. the characters of a word) and sub-categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnnotation {
    /// Unique id, derived deterministically when dumped
    #[serde(default)]
    pub annotation_id: String,

    /// The category name
    pub category_name: String,

    /// The category id, when the category comes from a closed label set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<usize>,

    /// Confidence score of a prediction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,

    /// Container value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Nested sub-categories
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sub_categories: BTreeMap<String, CategoryAnnotation>,
}

impl CategoryAnnotation {
    /// A category with the given name and nothing else set
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
            ..Default::default()
        }
    }

    /// Set the category id
    pub fn with_id(mut self, category_id: Option<usize>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the score
    pub fn with_score(mut self, score: Option<f32>) -> Self {
        self.score = score;
        self
    }

    /// Set the container value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl SubCategories for CategoryAnnotation {
    fn annotation_id(&self) -> &str {
        &self.annotation_id
    }

    fn sub_categories(&self) -> &BTreeMap<String, CategoryAnnotation> {
        &self.sub_categories
    }

    fn sub_categories_mut(&mut self) -> &mut BTreeMap<String, CategoryAnnotation> {
        &mut self.sub_categories
    }
}

/// An annotation located on the image, such as a layout block or a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnnotation {
    /// Unique id, derived deterministically when dumped into an image
    #[serde(default)]
    pub annotation_id: String,

    /// The category name (e.g. "word")
    pub category_name: String,

    /// The category id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<usize>,

    /// Detection score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,

    /// Location on the image
    pub bounding_box: BoundingBox,

    /// Sub-categories, keyed by sub-category name
    #[serde(default)]
    pub sub_categories: BTreeMap<String, CategoryAnnotation>,

    /// Ids of related annotations, keyed by relationship name
    #[serde(default)]
    pub relationships: BTreeMap<String, Vec<String>>,

    /// Inactive annotations are skipped by lookups
    #[serde(default = "active")]
    pub active: bool,
}

fn active() -> bool {
    true
}

impl ImageAnnotation {
    /// A new, active annotation without an id
    pub fn new(category_name: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            annotation_id: String::new(),
            category_name: category_name.into(),
            category_id: None,
            score: None,
            bounding_box,
            sub_categories: BTreeMap::new(),
            relationships: BTreeMap::new(),
            active: true,
        }
    }

    /// Set an explicit id
    pub fn with_id(mut self, annotation_id: impl Into<String>) -> Self {
        self.annotation_id = annotation_id.into();
        self
    }

    /// The text of a word, held in its characters sub-category
    pub fn characters(&self) -> Option<&str> {
        self.sub_categories
            .get(WordType::Characters.as_str())
            .and_then(|characters| characters.value.as_deref())
    }

    /// The position of the annotation in reading order, if assigned
    pub fn reading_order(&self) -> Option<usize> {
        self.sub_categories
            .get(Relationships::ReadingOrder.as_str())
            .and_then(|position| position.category_id)
    }

    /// Relate another annotation under `key`, ignoring repeats
    pub fn dump_relationship(&mut self, key: &str, annotation_id: &str) {
        let related = self.relationships.entry(key.to_string()).or_default();

        if !related.iter().any(|id| id == annotation_id) {
            related.push(annotation_id.to_string());
        }
    }
}

impl SubCategories for ImageAnnotation {
    fn annotation_id(&self) -> &str {
        &self.annotation_id
    }

    fn sub_categories(&self) -> &BTreeMap<String, CategoryAnnotation> {
        &self.sub_categories
    }

    fn sub_categories_mut(&mut self) -> &mut BTreeMap<String, CategoryAnnotation> {
        &mut self.sub_categories
    }
}
