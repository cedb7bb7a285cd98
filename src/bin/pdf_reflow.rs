//! Rebuild a text-content dump into an editable document.
//!
//! Usage:
//!   pdf_reflow report.json
//!   pdf_reflow report.json --format xlsx --output out/report.xlsx
//!   pdf_reflow report.json --config thresholds.json --dump-model
//!
//! Options:
//!   --format, -f     txt | doc | xlsx | pptx (default: txt)
//!   --output, -o     output path (default: input path with the target extension)
//!   --config, -c     JSON configuration file
//!   --class          generic | dense | loose threshold preset
//!   --dump-model     print the reconstructed model as JSON instead of emitting
//!   --verbose, -v    debug logging (RUST_LOG overrides)

use pdf_reflow::{DocumentClass, JsonPageSource, OutputKind, ReflowConfig, ReflowPipeline};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

struct CliOptions {
    input: PathBuf,
    format: OutputKind,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    class: Option<DocumentClass>,
    dump_model: bool,
    verbose: bool,
}

impl CliOptions {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut format = OutputKind::PlainText;
        let mut output = None;
        let mut config = None;
        let mut class = None;
        let mut dump_model = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--format" | "-f" => {
                    i += 1;
                    let value = args.get(i).ok_or("--format needs a value")?;
                    format = value.parse().map_err(|e| format!("{}", e))?;
                },
                "--output" | "-o" => {
                    i += 1;
                    output = Some(PathBuf::from(args.get(i).ok_or("--output needs a path")?));
                },
                "--config" | "-c" => {
                    i += 1;
                    config = Some(PathBuf::from(args.get(i).ok_or("--config needs a path")?));
                },
                "--class" => {
                    i += 1;
                    let value = args.get(i).ok_or("--class needs a value")?;
                    class = Some(value.parse::<DocumentClass>().map_err(|e| format!("{}", e))?);
                },
                "--dump-model" => dump_model = true,
                "--verbose" | "-v" => verbose = true,
                flag if flag.starts_with('-') => return Err(format!("unknown option: {}", flag)),
                path => {
                    if input.is_some() {
                        return Err(format!("unexpected argument: {}", path));
                    }
                    input = Some(PathBuf::from(path));
                },
            }
            i += 1;
        }

        Ok(Self {
            input: input.ok_or("missing input file")?,
            format,
            output,
            config,
            class,
            dump_model,
            verbose,
        })
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension(self.format.extension()))
    }
}

fn load_config(options: &CliOptions) -> pdf_reflow::Result<ReflowConfig> {
    match (&options.config, options.class) {
        (Some(path), _) => ReflowConfig::from_json(&fs::read_to_string(path)?),
        (None, Some(class)) => Ok(class.create_config()),
        (None, None) => Ok(ReflowConfig::default()),
    }
}

fn run(options: &CliOptions) -> pdf_reflow::Result<()> {
    let start = Instant::now();
    let pipeline = ReflowPipeline::with_config(load_config(options)?);
    let source = JsonPageSource::open(&options.input)?;
    let document = pipeline.reconstruct(&source)?;

    log::info!(
        "Reconstructed {} pages, {} lines, {} fragments in {:.2?}",
        document.page_count(),
        document.line_count(),
        document.fragment_count(),
        start.elapsed()
    );

    if options.dump_model {
        println!("{}", document.to_json()?);
        return Ok(());
    }

    let payload = pipeline.emit(&document, options.format)?;
    let output = options.output_path();
    write_output(&output, payload.as_bytes())?;
    log::info!("Wrote {} ({} bytes)", output.display(), payload.as_bytes().len());
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}

fn main() -> ExitCode {
    let options = match CliOptions::from_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!(
                "Usage: pdf_reflow <input.json> [--format txt|doc|xlsx|pptx] [--output PATH] \
                 [--config CONFIG.json] [--class generic|dense|loose] [--dump-model] [-v]"
            );
            return ExitCode::from(2);
        },
    };

    let default_level = if options.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
