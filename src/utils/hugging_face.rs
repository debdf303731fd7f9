use std::path::PathBuf;

use hf_hub::api::tokio;

/// Download the tokenizer and config files of a model from the Hugging Face Hub.
/// Files already in the local cache are not downloaded again.
pub async fn download_hf_tokenizer(model_name: &str) -> anyhow::Result<(PathBuf, PathBuf)> {
    let api = tokio::Api::new()?;
    let repo = api.model(model_name.to_string());

    let tokenizer_filepath = repo.get("tokenizer.json").await.map_err(|e| {
        anyhow!(
            "Failed to download: {} tokenizer with name: tokenizer.json from HuggingFace Hub: {}",
            model_name,
            e
        )
    })?;

    let config_filepath = repo.get("config.json").await.map_err(|e| {
        anyhow!(
            "Failed to download: {} config with name: config.json from HuggingFace Hub: {}",
            model_name,
            e
        )
    })?;

    Ok((tokenizer_filepath, config_filepath))
}
