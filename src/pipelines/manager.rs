use crate::{
    datapoint::{AnnotationError, CategoryAnnotation, Image, SubCategories},
    settings::PageType,
};

/// Writes categories onto the annotations and summary of a datapoint
pub struct DatapointManager<'a> {
    dp: &'a mut Image,
}

impl<'a> DatapointManager<'a> {
    /// Manage the given datapoint
    pub fn new(dp: &'a mut Image) -> Self {
        Self { dp }
    }

    /// Whether the datapoint has an annotation with the given id
    pub fn contains(&self, annotation_id: &str) -> bool {
        self.dp
            .annotations()
            .iter()
            .any(|ann| ann.annotation_id == annotation_id)
    }

    /// Attach a category as sub-category `key` of an annotation, replacing an earlier one.
    /// Returns the id of the new sub-category.
    pub fn set_category_annotation(
        &mut self,
        category_name: &str,
        category_id: Option<usize>,
        key: &str,
        annotation_id: &str,
        score: Option<f32>,
    ) -> Result<String, AnnotationError> {
        let annotation = self
            .dp
            .get_annotation_mut(annotation_id)
            .ok_or_else(|| AnnotationError::NotFound(annotation_id.to_string()))?;

        let category = CategoryAnnotation::new(category_name)
            .with_id(category_id)
            .with_score(score);

        Ok(annotation.dump_sub_category(key, category))
    }

    /// Attach a category to the page summary under `key`, replacing an earlier one
    pub fn set_summary_annotation(
        &mut self,
        key: PageType,
        category_name: &str,
        category_id: Option<usize>,
        score: Option<f32>,
    ) -> String {
        let category = CategoryAnnotation::new(category_name)
            .with_id(category_id)
            .with_score(score);

        self.dp.summary_mut().dump_sub_category(key.as_str(), category)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::datapoint::{BoundingBox, ImageAnnotation};

    use super::*;

    #[test]
    fn test_set_category_annotation() {
        let mut dp = Image::new("page.png", "/tmp", 100.0, 100.0);
        let word_id = dp
            .dump(ImageAnnotation::new(
                "word",
                BoundingBox::new(1.0, 1.0, 9.0, 9.0, true),
            ))
            .unwrap();

        let mut manager = DatapointManager::new(&mut dp);
        assert!(manager.contains(&word_id));

        manager
            .set_category_annotation("B", None, "tag", &word_id, Some(0.8))
            .unwrap();

        assert_eq!(
            manager.set_category_annotation("B", None, "tag", "missing", None),
            Err(AnnotationError::NotFound("missing".to_string()))
        );

        let tag = dp.get_annotation(&[word_id.as_str()])[0]
            .get_sub_category("tag")
            .unwrap()
            .clone();

        assert_eq!(tag.category_name, "B");
        assert_eq!(tag.score, Some(0.8));
    }

    #[test]
    fn test_set_summary_annotation() {
        let mut dp = Image::new("page.png", "/tmp", 100.0, 100.0);

        DatapointManager::new(&mut dp).set_summary_annotation(
            PageType::DocumentType,
            "invoice",
            Some(2),
            None,
        );

        let document_type = dp
            .summary()
            .unwrap()
            .get_sub_category("document_type")
            .unwrap();

        assert_eq!(document_type.category_id, Some(2));
    }
}
