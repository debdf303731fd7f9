use serde::{Deserialize, Serialize};

use crate::utils::ids::get_uuid;

use super::{AnnotationError, CategoryAnnotation, ImageAnnotation};

/// The category name of a page summary
pub static SUMMARY: &str = "summary";

/// A document page with its layout and word annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// The file name of the page image
    pub file_name: String,

    /// The directory or URI the file lives in
    #[serde(default)]
    pub location: String,

    /// Unique id derived from location and file name
    pub image_id: String,

    /// Page width in pixels
    pub width: f32,

    /// Page height in pixels
    pub height: f32,

    #[serde(default)]
    annotations: Vec<ImageAnnotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<CategoryAnnotation>,
}

impl Image {
    /// Creates a new page without annotations
    pub fn new(file_name: &str, location: &str, width: f32, height: f32) -> Self {
        Self {
            file_name: file_name.to_string(),
            location: location.to_string(),
            image_id: get_uuid(&[location, file_name]),
            width,
            height,
            annotations: Vec::new(),
            summary: None,
        }
    }

    /// All annotations, in the order they were dumped
    pub fn annotations(&self) -> &[ImageAnnotation] {
        &self.annotations
    }

    /// Add an annotation. An id is derived when the annotation has none. Returns the id.
    pub fn dump(&mut self, mut annotation: ImageAnnotation) -> Result<String, AnnotationError> {
        if annotation.annotation_id.is_empty() {
            let bbox = annotation.bounding_box;
            let corners = format!("{}{}{}{}", bbox.ulx, bbox.uly, bbox.lrx, bbox.lry);

            annotation.annotation_id = get_uuid(&[
                annotation.category_name.as_str(),
                corners.as_str(),
                self.image_id.as_str(),
            ]);
        }

        if self
            .annotations
            .iter()
            .any(|existing| existing.annotation_id == annotation.annotation_id)
        {
            return Err(AnnotationError::Duplicate(annotation.annotation_id));
        }

        let annotation_id = annotation.annotation_id.clone();
        self.annotations.push(annotation);

        Ok(annotation_id)
    }

    /// Active annotations with the given ids, in stored order
    pub fn get_annotation(&self, annotation_ids: &[&str]) -> Vec<&ImageAnnotation> {
        self.annotations
            .iter()
            .filter(|ann| ann.active && annotation_ids.contains(&ann.annotation_id.as_str()))
            .collect()
    }

    /// Active annotations whose category is one of `category_names`, in stored order
    pub fn get_annotation_by_category(&self, category_names: &[&str]) -> Vec<&ImageAnnotation> {
        self.annotations
            .iter()
            .filter(|ann| ann.active && category_names.contains(&ann.category_name.as_str()))
            .collect()
    }

    /// Mutable lookup of a single annotation
    pub fn get_annotation_mut(&mut self, annotation_id: &str) -> Option<&mut ImageAnnotation> {
        self.annotations
            .iter_mut()
            .find(|ann| ann.annotation_id == annotation_id)
    }

    /// The page summary, if one has been started
    pub fn summary(&self) -> Option<&CategoryAnnotation> {
        self.summary.as_ref()
    }

    /// The page summary, created empty on first access
    pub fn summary_mut(&mut self) -> &mut CategoryAnnotation {
        let image_id = self.image_id.clone();

        self.summary.get_or_insert_with(|| CategoryAnnotation {
            annotation_id: get_uuid(&[SUMMARY, image_id.as_str()]),
            ..CategoryAnnotation::new(SUMMARY)
        })
    }
}
