use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nanogen::{
    logger::{self, LogLevel, LoggerConfig},
    AspectRatio, GeminiClient, GenerationRequest, ModelTier, DEFAULT_OUTPUT_PATH,
};

#[derive(Parser, Debug)]
#[command(name = "nanogen")]
#[command(version, about = "Generate an image from a text prompt with Google Gemini")]
#[command(after_help = "Examples:
  nanogen \"a cute cat illustration\"
  nanogen \"sunset landscape\" -a 16:9 -o sunset.png
  nanogen \"game icon\" --magenta-bg -o icon.png
  nanogen \"draw a dog in the same style\" -r reference.png
  nanogen \"combine these\" --refs img1.png img2.png img3.png")]
struct Cli {
    /// Image generation prompt
    prompt: String,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Aspect ratio
    #[arg(short, long, value_enum, default_value_t = AspectRatio::Square)]
    aspect_ratio: AspectRatio,

    /// Model: flash = fast, pro = high quality
    #[arg(short, long, value_enum, default_value_t = ModelTier::Pro)]
    model: ModelTier,

    /// Generate on a flat magenta background for later chroma-key removal
    #[arg(long)]
    magenta_bg: bool,

    /// Single reference image
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Multiple reference images
    #[arg(long, num_args = 1..)]
    refs: Option<Vec<PathBuf>>,

    /// Debug output
    #[arg(short, long)]
    verbose: bool,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Emit log lines as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// `--refs` wins over `-r` when both are given.
    fn reference_paths(&self) -> Vec<PathBuf> {
        match (&self.refs, &self.reference) {
            (Some(refs), Some(single)) if !refs.is_empty() => {
                log::warn!(
                    "⚠️  Both -r and --refs given; ignoring -r {}",
                    single.display()
                );
                refs.clone()
            }
            (Some(refs), _) if !refs.is_empty() => refs.clone(),
            (_, Some(single)) => vec![single.clone()],
            _ => Vec::new(),
        }
    }

    fn logger_config(&self) -> LoggerConfig {
        let mut config = if self.verbose {
            LoggerConfig::development()
        } else {
            LoggerConfig::cli()
        };
        config = config.with_json_output(self.json_logs);
        if let Some(path) = &self.log_file {
            config = config.with_file_output(&path.to_string_lossy());
        }
        if self.verbose {
            config = config.with_level(LogLevel::Debug);
        }
        config
    }

    fn into_request(self) -> GenerationRequest {
        let references = self.reference_paths();
        GenerationRequest::new(self.prompt)
            .with_output_path(self.output)
            .with_aspect_ratio(self.aspect_ratio)
            .with_model_tier(self.model)
            .with_flat_background(self.magenta_bg)
            .with_reference_images(references)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file first
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    if let Err(e) = logger::init_with_config(cli.logger_config()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match dotenv_result {
        Ok(path) => log::debug!("✅ Loaded {}", path.display()),
        Err(_) => log::debug!("No .env file found, using process environment"),
    }

    if cli.verbose {
        log::debug!("📚 Available image models:");
        for (id, tier) in GeminiClient::supported_models() {
            log::debug!("  {} ({})", id, tier);
        }
    }

    let request = cli.into_request();

    let client = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.generate(&request).await {
        Ok(result) => {
            if let Some(path) = result.saved_path {
                log::debug!("Result written to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("❌ {}", e);
            if !e.is_local() {
                log::debug!("The request was sent once and is not retried");
            }
            ExitCode::FAILURE
        }
    }
}
