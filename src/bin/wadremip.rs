use clap::Parser;
use quake_remip::container::TextureOutcome;
use quake_remip::mip::MipConfig;
use quake_remip::{palette_from_bytes, process_file, Options, RemipResult};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    version,
    about = "Generate better mips for Quake WADs and BSPs, in place"
)]
struct Args {
    /// Replace the built-in Quake palette with a 768 byte palette lump
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Number of mip levels, including the full size image
    #[arg(short, long, default_value_t = MipConfig::MAX_LEVELS)]
    levels: usize,

    /// Generate mips and report, but leave files untouched
    #[arg(short = 'n', long)]
    dry_run: bool,

    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn options(args: &Args) -> RemipResult<Options> {
    let mut options = Options {
        mip: MipConfig::new(args.levels)?,
        dry_run: args.dry_run,
        ..Options::default()
    };

    if let Some(path) = &args.palette {
        let bytes = std::fs::read(path)
            .map_err(quake_remip::RemipError::Unreadable)?;
        options.palette = palette_from_bytes(&bytes)?;
    }

    Ok(options)
}

fn remip(path: &Path, options: &Options) -> RemipResult<()> {
    println!("Processing \"{}\"", path.display());

    let report = process_file(path, options)?;

    for texture in &report.textures {
        match texture.outcome {
            TextureOutcome::Processed => {
                println!("Generated new mips for \"{}\"", texture.name)
            }
            outcome => println!("Skipped \"{}\": {outcome}", texture.name),
        }
    }

    println!(
        "Finished processing \"{}\" as {} ({} processed, {} skipped)",
        path.display(),
        report.kind,
        report.processed(),
        report.skipped(),
    );

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let options = match options(&args) {
        Ok(options) => options,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;

    for path in &args.files {
        match remip(path, &options) {
            Err(err) if err.is_file_fatal() => {
                error!(path = %path.display(), "{err}");
                failed = true;
            }
            Err(err) => warn!(path = %path.display(), "{err}"),
            Ok(()) => {}
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
