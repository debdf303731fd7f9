/// Bounding boxes
pub mod bbox;

/// Category and image annotations
pub mod annotation;

/// The page datapoint
pub mod image;

pub use annotation::{CategoryAnnotation, ImageAnnotation, SubCategories};
pub use bbox::BoundingBox;
pub use image::Image;

/// Annotation Error
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// The annotation has no sub-category under the given key
    #[error("annotation {annotation_id} has no sub-category {key}")]
    MissingSubCategory {
        /// The annotation that was looked up
        annotation_id: String,

        /// The missing key
        key: String,
    },

    /// An annotation with the same id already exists on the image
    #[error("annotation {0} already exists")]
    Duplicate(String),

    /// No annotation with the given id exists on the image
    #[error("no annotation found for {0}")]
    NotFound(String),
}
