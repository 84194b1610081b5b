//! The `marketmap extract` command.

use clap::Args;
use console::Term;
use marketmap_core::output::write_csv;
use marketmap_core::{load_image, CompanyRecord, Config, MarketMapError, MarketMapper, Progress};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::credentials;
use super::theme::lookup_progress_bar;

/// Arguments for the `extract` command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Market map image (jpg, jpeg or png)
    #[arg(required = true)]
    pub image: PathBuf,

    /// Output CSV path ("-" for stdout) [default: enriched_market_map.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Crunchbase API key
    #[arg(long, env = "CRUNCHBASE_API_KEY", hide_env_values = true)]
    pub crunchbase_api_key: Option<String>,

    /// Vision model name (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Company lookups to run at once (overrides config; 1 = sequential)
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Never prompt for missing API keys
    #[arg(long)]
    pub no_prompt: bool,
}

/// Where the enriched CSV goes.
#[derive(Debug, PartialEq, Eq)]
enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    fn resolve(output: Option<&Path>, config: &Config) -> Self {
        match output {
            Some(path) if path == Path::new("-") => Destination::Stdout,
            Some(path) => Destination::File(path.to_path_buf()),
            None => Destination::File(PathBuf::from(&config.output.file_name)),
        }
    }
}

/// Fold command-line overrides into the loaded config.
fn apply_overrides(args: &ExtractArgs, mut config: Config) -> anyhow::Result<Config> {
    if let Some(model) = &args.model {
        config.vision.model = model.clone();
    }
    if let Some(parallel) = args.parallel {
        config.lookup.parallel = parallel;
    }
    config.validate()?;
    Ok(config)
}

/// Execute the extract command.
pub async fn execute(args: ExtractArgs, config: Config) -> anyhow::Result<()> {
    let config = apply_overrides(&args, config)?;

    let interactive = !args.no_prompt && Term::stderr().is_term();
    let credentials = credentials::resolve(
        args.openai_api_key.clone(),
        args.crunchbase_api_key.clone(),
        &config,
    );
    let credentials = credentials::fill_missing(credentials, interactive)?;
    // Stop here, before any request, if a key is still missing.
    credentials.require()?;

    let image = load_image(&args.image)?;
    tracing::info!("Loaded {:?} ({}x{})", args.image, image.width(), image.height());

    let mapper = MarketMapper::new(&config);
    let pb = lookup_progress_bar();

    let result = mapper
        .run(image, &credentials, |progress| match progress {
            Progress::CandidatesFound(n) => {
                pb.set_length(n as u64);
                pb.set_message("enriching...");
            }
            Progress::Enriched(record) => {
                pb.set_message(record.name.clone());
                pb.inc(1);
            }
        })
        .await;
    pb.finish_and_clear();

    let table = match result {
        Ok(table) => table,
        Err(MarketMapError::UnexpectedResponse { message, raw }) => {
            eprintln!("Error extracting CSV content: {message}");
            eprintln!("{}", serde_json::to_string_pretty(&raw)?);
            anyhow::bail!("vision response did not contain a completion");
        }
        Err(e) => return Err(e.into()),
    };

    if table.records.is_empty() {
        tracing::warn!("No startups recognised in the model output");
        tracing::debug!("Model output was:\n{}", table.raw_completion);
    }

    match Destination::resolve(args.output.as_deref(), &config) {
        Destination::Stdout => write_csv(&table.records, std::io::stdout().lock())?,
        Destination::File(path) => {
            write_csv(&table.records, BufWriter::new(File::create(&path)?))?;
            print_summary(&table.records, table.resolved_count(), &path);
        }
    }

    Ok(())
}

fn print_summary(records: &[CompanyRecord], resolved: usize, path: &Path) {
    eprintln!(
        "Wrote {} startup(s) to {} ({} enriched, {} without data)",
        records.len(),
        path.display(),
        resolved,
        records.len() - resolved
    );
}
