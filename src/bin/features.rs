//! Command line tool to inspect the LayoutLM features of page datapoints

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use deepdoc_lm::{
    cli::tokenizers::TokenizerSource,
    datasets::{jsonl, LoadableDataset},
    mapper::{image_to_layoutlm, image_to_layoutlm_features, Padding},
    pipelines::ServiceConfig,
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: features DATAPOINTS [OPTIONS]

Arguments:
  DATAPOINTS           A JSON lines file with one serialized page per line

Options:
  -h, --help           Print help
  -t, --tokenizer      A Hub model name or a tokenizer.json file
                       (defaults to 'microsoft/layoutlm-base-uncased')
  -c, --config         A JSON or YAML service config
  -m, --max-length     Maximum number of tokens per row
  --no-padding         Leave rows unpadded
  --overflow           Split long pages into several rows instead of truncating
  --legacy             Tokenize one word at a time
";

#[derive(Debug)]
struct Args {
    datapoints: PathBuf,
    tokenizer: Option<String>,
    config: Option<PathBuf>,
    max_length: Option<usize>,
    no_padding: bool,
    overflow: bool,
    legacy: bool,
}

impl Args {
    fn parse() -> Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            tokenizer: pargs.opt_value_from_str(["-t", "--tokenizer"])?,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            max_length: pargs.opt_value_from_str(["-m", "--max-length"])?,
            no_padding: pargs.contains("--no-padding"),
            overflow: pargs.contains("--overflow"),
            legacy: pargs.contains("--legacy"),
            datapoints: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => {
                    anyhow!("Missing required argument: DATAPOINTS")
                }
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }

    /// The config file, with command line flags taking precedence
    fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(tokenizer) = &self.tokenizer {
            config.tokenizer = tokenizer.clone();
        }

        if let Some(max_length) = self.max_length {
            config.features.max_length = Some(max_length);
        }

        if self.no_padding {
            config.features.padding = Padding::DoNotPad;
        }

        if self.overflow {
            config.features.return_overflowing_tokens = true;
        }

        if self.legacy {
            config.legacy_mapping = true;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.service_config()?;

    let source = TokenizerSource::try_from(config.tokenizer.as_str())?;
    let tokenizer = source.load(config.features.max_length).await?;

    let dataset = jsonl::Dataset::load(&args.datapoints).await?;

    for dp in dataset.iter() {
        let features = if config.legacy_mapping {
            image_to_layoutlm(dp, &tokenizer, &config.features)?
        } else {
            image_to_layoutlm_features(dp, &tokenizer, &config.features)?
        };

        match features {
            Some(features) => println!("{}", serde_json::to_string(&features)?),
            None => log::info!("Skipping {}: no words", dp.image_id),
        }
    }

    Ok(())
}
