use std::collections::HashSet;

use crate::{
    datapoint::Image,
    mapper::{FeatureOptions, MappingFn},
    models::{TokenClassResult, TokenClassifier},
    pipelines::{
        component::{MetaAnnotation, PipelineComponent, ServiceError},
        config::ServiceConfig,
        manager::DatapointManager,
        Task,
    },
    settings::{BioTag, LayoutType, TokenClasses, WordType},
    tokenizer::{LmTokenizer, CONTINUING_SUBWORD_PREFIX},
};

/// Labels the words of a page with a token classification model.
///
/// Each word gets three sub-categories from the prediction for its first token: the token class
/// (e.g. "header"), the tag (e.g. "B") and the token tag (e.g. "B-header").
pub struct LmTokenClassifierService<T: LmTokenizer, M: TokenClassifier> {
    tokenizer: T,
    language_model: M,
    mapping: MappingFn<T>,
    options: FeatureOptions,
    use_other_as_default_category: bool,
    name: String,
}

impl<T: LmTokenizer, M: TokenClassifier> LmTokenClassifierService<T, M> {
    /// Creates a new service with default feature options
    pub fn new(tokenizer: T, language_model: M, mapping: MappingFn<T>) -> Self {
        let name = format!("{}:{}", Task::TokenClassification, language_model.name());

        Self {
            tokenizer,
            language_model,
            mapping,
            options: FeatureOptions::default(),
            use_other_as_default_category: false,
            name,
        }
    }

    /// Apply feature options and defaults from a service config
    pub fn with_config(mut self, config: &ServiceConfig) -> Self {
        self.options = config.features.clone();
        self.use_other_as_default_category = config.use_other_as_default_category;
        self
    }

    /// Set the feature options
    pub fn with_options(mut self, options: FeatureOptions) -> Self {
        self.options = options;
        self
    }

    /// Label words without a prediction as "other" with an outside tag
    pub fn with_other_as_default_category(mut self, enabled: bool) -> Self {
        self.use_other_as_default_category = enabled;
        self
    }

    /// Whether a result is the first piece of a real word
    fn is_word_start(&self, token: &TokenClassResult) -> bool {
        !self.tokenizer.special_tokens().is_special(token.token_id)
            && !token.token.starts_with(CONTINUING_SUBWORD_PREFIX)
    }

    /// The class id the model uses for the outside label, if any
    fn outside_class_id(&self) -> Option<usize> {
        self.language_model
            .categories()
            .iter()
            .find(|(_, label)| label.as_str() == BioTag::Outside.as_str())
            .map(|(id, _)| *id)
    }

    fn set_default_categories(
        &self,
        dp: &mut Image,
        populated: &HashSet<String>,
    ) -> Result<(), ServiceError> {
        let unlabelled: Vec<String> = dp
            .get_annotation_by_category(&[LayoutType::Word.as_str()])
            .into_iter()
            .filter(|word| !populated.contains(&word.annotation_id))
            .map(|word| word.annotation_id.clone())
            .collect();

        let outside_id = self.outside_class_id();
        let mut manager = DatapointManager::new(dp);

        for annotation_id in &unlabelled {
            manager.set_category_annotation(
                TokenClasses::Other.as_str(),
                None,
                WordType::TokenClass.as_str(),
                annotation_id,
                None,
            )?;
            manager.set_category_annotation(
                BioTag::Outside.as_str(),
                None,
                WordType::Tag.as_str(),
                annotation_id,
                None,
            )?;
            manager.set_category_annotation(
                BioTag::Outside.as_str(),
                outside_id,
                WordType::TokenTag.as_str(),
                annotation_id,
                None,
            )?;
        }

        if !unlabelled.is_empty() {
            log::debug!("Labelled {} words as other by default", unlabelled.len());
        }

        Ok(())
    }
}

impl<T: LmTokenizer, M: TokenClassifier> PipelineComponent for LmTokenClassifierService<T, M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn serve(&self, dp: &mut Image) -> Result<(), ServiceError> {
        let Some(features) = (self.mapping)(dp, &self.tokenizer, &self.options)? else {
            log::debug!("No words to classify on {}", dp.image_id);

            return Ok(());
        };

        let results = self
            .language_model
            .predict(&features)
            .map_err(ServiceError::Prediction)?;

        let mut populated = HashSet::new();
        let mut manager = DatapointManager::new(dp);

        for token in results.iter().filter(|token| self.is_word_start(token)) {
            if populated.contains(&token.uuid) {
                continue;
            }

            if !manager.contains(&token.uuid) {
                log::warn!(
                    "Dropping prediction for token {:?}: no annotation {}",
                    token.token,
                    token.uuid
                );

                continue;
            }

            // Unsplit labels carry their id on the token class itself
            let token_class_id = (token.class_name == token.semantic_name).then_some(token.class_id);

            manager.set_category_annotation(
                &token.semantic_name,
                token_class_id,
                WordType::TokenClass.as_str(),
                &token.uuid,
                token.score,
            )?;
            manager.set_category_annotation(
                &token.bio_tag,
                None,
                WordType::Tag.as_str(),
                &token.uuid,
                token.score,
            )?;
            manager.set_category_annotation(
                &token.class_name,
                Some(token.class_id),
                WordType::TokenTag.as_str(),
                &token.uuid,
                token.score,
            )?;

            populated.insert(token.uuid.clone());
        }

        if self.use_other_as_default_category {
            self.set_default_categories(dp, &populated)?;
        }

        Ok(())
    }

    fn meta_annotation(&self) -> MetaAnnotation {
        Task::TokenClassification.meta_annotation()
    }
}
