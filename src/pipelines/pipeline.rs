use crate::datapoint::Image;

use super::component::{MetaAnnotation, PipelineComponent, ServiceError};

/// Runs page datapoints through a sequence of components
#[derive(Default)]
pub struct DocPipeline {
    components: Vec<Box<dyn PipelineComponent>>,
}

impl DocPipeline {
    /// Creates a pipeline from components, run in the given order
    pub fn new(components: Vec<Box<dyn PipelineComponent>>) -> Self {
        Self { components }
    }

    /// Append a component
    pub fn push<C: PipelineComponent + 'static>(&mut self, component: C) -> &mut Self {
        self.components.push(Box::new(component));
        self
    }

    /// Names of the components, in run order
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Run one datapoint through every component
    pub fn pass_datapoint(&self, dp: Image) -> Result<Image, ServiceError> {
        self.components
            .iter()
            .try_fold(dp, |dp, component| component.pass_datapoint(dp))
    }

    /// Lazily run each datapoint through the pipeline. A failing datapoint yields its error and
    /// does not stop the others.
    pub fn analyze<'a, I>(
        &'a self,
        datapoints: I,
    ) -> impl Iterator<Item = Result<Image, ServiceError>> + 'a
    where
        I: IntoIterator<Item = Image>,
        I::IntoIter: 'a,
    {
        datapoints.into_iter().map(move |dp| {
            let image_id = dp.image_id.clone();
            let result = self.pass_datapoint(dp);

            if let Err(e) = &result {
                log::warn!("Failed to process {}: {}", image_id, e);
            }

            result
        })
    }

    /// The annotations all components write together
    pub fn meta_annotation(&self) -> MetaAnnotation {
        self.components
            .iter()
            .fold(MetaAnnotation::default(), |mut meta, component| {
                meta.merge(component.meta_annotation());
                meta
            })
    }
}
