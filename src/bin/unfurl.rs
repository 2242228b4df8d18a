//! unfurl CLI - applies a configured filter pipeline to NDJSON event streams.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use unfurl::{
    Event, EventEnvelope, EventWriter, FilterChain, FilterRegistry, OutputFormat, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "unfurl")]
#[command(version, about = "Applies a configured filter pipeline to NDJSON event streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a filter pipeline over an NDJSON event stream
    Run {
        /// Path to pipeline YAML configuration
        #[arg(short, long, default_value = "pipeline.yaml")]
        config: PathBuf,

        /// Input NDJSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (ndjson, json)
        #[arg(short, long, default_value = "ndjson")]
        format: String,

        /// Source tag recorded on each event envelope
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Validate a pipeline configuration without processing events
    Validate {
        /// Path to pipeline YAML configuration
        #[arg(short, long, default_value = "pipeline.yaml")]
        config: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            input,
            output,
            format,
            source,
        } => run_pipeline(config, input, output, format, source),
        Commands::Validate { config } => validate_pipeline(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parse the output format flag
fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "ndjson" => Ok(OutputFormat::Ndjson),
        "json" => Ok(OutputFormat::JsonArray),
        _ => Err(format!(
            "Unsupported output format: '{}'. Supported formats: ndjson, json",
            format
        )),
    }
}

/// Run a filter pipeline over an NDJSON event stream
fn run_pipeline(
    config: PathBuf,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    source: Option<String>,
) -> Result<(), String> {
    let format = parse_output_format(&format)?;

    let pipeline = PipelineConfig::load_from_file(&config)?;
    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&pipeline, &registry)
        .map_err(|e| format!("Failed to build pipeline: {}", e))?;

    tracing::info!("Pipeline ready with {} filter stage(s)", chain.len());

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => {
            let file = fs::File::open(path)
                .map_err(|e| format!("Failed to open input {}: {}", path.display(), e))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = fs::File::create(path)
                .map_err(|e| format!("Failed to create output {}: {}", path.display(), e))?;
            Box::new(file)
        }
        None => Box::new(io::stdout()),
    };
    let mut writer = EventWriter::new(writer, format)
        .map_err(|e| format!("Failed to open output stream: {}", e))?;

    let mut processed = 0usize;
    let mut skipped = 0usize;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }

        // A malformed line is skipped, never fatal
        let event = match Event::from_json_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line_number + 1, e);
                skipped += 1;
                continue;
            }
        };

        let mut envelope = EventEnvelope::new(event, source.clone());
        tracing::debug!("Processing event {}", envelope.event_id);
        chain.apply(&mut envelope.event);

        writer
            .write_event(&envelope.event)
            .map_err(|e| format!("Failed to write event: {}", e))?;
        processed += 1;
    }

    writer
        .finish()
        .map_err(|e| format!("Failed to finish output: {}", e))?;

    tracing::info!("Processed {} event(s), skipped {}", processed, skipped);

    Ok(())
}

/// Validate a pipeline configuration without processing events
fn validate_pipeline(config: PathBuf) -> Result<(), String> {
    println!("🔍 Validating pipeline in {}...", config.display());

    let pipeline = PipelineConfig::load_from_file(&config)?;
    println!("  ✓ Loaded {} filter stage(s)", pipeline.stage_count());

    let registry = FilterRegistry::with_builtin_filters();
    let chain = FilterChain::from_config(&pipeline, &registry)
        .map_err(|e| format!("Failed to build pipeline: {}", e))?;

    for name in chain.stage_names() {
        println!("    - {}", name);
    }

    println!("✅ Pipeline configuration is valid!");

    Ok(())
}
