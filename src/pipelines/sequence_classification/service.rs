use crate::{
    datapoint::Image,
    mapper::{FeatureOptions, MappingFn},
    models::SequenceClassifier,
    pipelines::{
        component::{MetaAnnotation, PipelineComponent, ServiceError},
        config::ServiceConfig,
        manager::DatapointManager,
        Task,
    },
    settings::PageType,
    tokenizer::LmTokenizer,
};

/// Labels the document type of a page with a sequence classification model
pub struct LmSequenceClassifierService<T: LmTokenizer, M: SequenceClassifier> {
    tokenizer: T,
    language_model: M,
    mapping: MappingFn<T>,
    options: FeatureOptions,
    name: String,
}

impl<T: LmTokenizer, M: SequenceClassifier> LmSequenceClassifierService<T, M> {
    /// Creates a new service with default feature options
    pub fn new(tokenizer: T, language_model: M, mapping: MappingFn<T>) -> Self {
        let name = format!("{}:{}", Task::SequenceClassification, language_model.name());

        Self {
            tokenizer,
            language_model,
            mapping,
            options: FeatureOptions::default(),
            name,
        }
    }

    /// Apply feature options from a service config
    pub fn with_config(mut self, config: &ServiceConfig) -> Self {
        self.options = config.features.clone();
        self
    }

    /// Set the feature options
    pub fn with_options(mut self, options: FeatureOptions) -> Self {
        self.options = options;
        self
    }
}

impl<T: LmTokenizer, M: SequenceClassifier> PipelineComponent
    for LmSequenceClassifierService<T, M>
{
    fn name(&self) -> &str {
        &self.name
    }

    fn serve(&self, dp: &mut Image) -> Result<(), ServiceError> {
        let Some(features) = (self.mapping)(dp, &self.tokenizer, &self.options)? else {
            log::debug!("No words to classify on {}", dp.image_id);

            return Ok(());
        };

        let result = self
            .language_model
            .predict(&features)
            .map_err(ServiceError::Prediction)?;

        log::debug!(
            "{} classified {} as {}",
            self.name,
            dp.image_id,
            result.class_name
        );

        DatapointManager::new(dp).set_summary_annotation(
            PageType::DocumentType,
            &result.class_name,
            Some(result.class_id),
            result.score,
        );

        Ok(())
    }

    fn meta_annotation(&self) -> MetaAnnotation {
        Task::SequenceClassification.meta_annotation()
    }
}
