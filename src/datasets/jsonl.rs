use std::path::Path;

use async_trait::async_trait;

use crate::{datapoint::Image, utils::files::read_file};

use super::{DatasetError, LoadableDataset};

/// Page datapoints read from a file holding one serialized page per line
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    datapoints: Vec<Image>,
}

impl Dataset {
    /// Parse datapoints from lines of JSON
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, DatasetError> {
        let datapoints = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line.as_ref())
                    .map_err(|source| DatasetError::Datapoint { line: i + 1, source })
            })
            .collect::<Result<Vec<Image>, _>>()?;

        Ok(Self { datapoints })
    }

    /// Returns a specific datapoint from the dataset
    pub fn get(&self, index: usize) -> Option<&Image> {
        self.datapoints.get(index)
    }

    /// Returns the length of the dataset
    pub fn len(&self) -> usize {
        self.datapoints.len()
    }

    /// Whether the dataset holds no datapoints
    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    /// Iterate over the datapoints
    pub fn iter(&self) -> impl Iterator<Item = &Image> {
        self.datapoints.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = Image;
    type IntoIter = std::vec::IntoIter<Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.datapoints.into_iter()
    }
}

#[async_trait]
impl LoadableDataset for Dataset {
    async fn load(path: &Path) -> Result<Self, DatasetError> {
        let lines = read_file(path)
            .await
            .map_err(|e| DatasetError::Io(path.display().to_string(), e))?;

        let dataset = Self::from_lines(lines.as_slice())?;

        log::info!(
            "Loaded {} datapoints from {}",
            dataset.len(),
            path.display()
        );

        Ok(dataset)
    }
}
