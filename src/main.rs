use clap::{Parser, Subcommand};
use optimedia::config::{self, OptimizerConfig};
use optimedia::{cache, output, process, video};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "optimedia")]
#[command(about = "Incremental image and video optimization for static sites")]
#[command(long_about = "\
Incremental image and video optimization for static sites

Mirrors a source tree into an optimized output tree:

  pics/                      pics-optimized/
  ├── img/a.png    (2000px)  ├── img/a.webp   (1600px, WebP q80)
  ├── img/b.jpg              ├── img/b.webp
  └── vid/c.mov              └── vid/c.mp4    (H.264 + AAC, faststart)

Only assets whose output is missing or older than the source are encoded.
Videos require ffmpeg (on PATH or [videos] ffmpeg); without it they are
skipped with a warning.

Run 'optimedia gen-config' to generate a documented optimedia.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file [default: optimedia.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source directory (overrides source_dir)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides output_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode every stale image and video
    Optimize {
        /// Exit with an error if any asset failed to transcode.
        /// Output collisions (a.png + a.jpg) are reported but don't fail the run
        #[arg(long)]
        strict: bool,
        /// Print the run summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show what would be encoded without encoding anything
    Check,
    /// Report external tool availability
    Tools,
    /// Print a stock optimedia.toml with all options documented
    GenConfig,
    /// Render the cache-first service worker for the [cache] settings
    GenSw {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "optimedia=debug".to_string()
        } else {
            "optimedia=info".to_string()
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source_dir = source;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }

    match cli.command {
        Command::Optimize { strict, json } => {
            init_thread_pool(&config.processing);
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    if !json {
                        output::print_process_event(&event);
                    }
                }
            });
            let result = process::run(
                &config.source_dir,
                &config.output_dir,
                &config,
                Some(tx),
            );
            printer
                .join()
                .map_err(|_| "output printer thread panicked")?;
            let summary = result?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                output::print_summary(&summary);
            }
            if strict && summary.has_failures() {
                return Err(format!("{} asset(s) failed", summary.failures.len()).into());
            }
        }
        Command::Check => {
            let plan = process::plan(&config.source_dir, &config.output_dir, &config)?;
            println!(
                "==> Checking {} → {}",
                config.source_dir.display(),
                config.output_dir.display()
            );
            output::print_plan(&plan);
        }
        Command::Tools => {
            let ffmpeg = video::find_ffmpeg(config.videos.ffmpeg.as_deref());
            output::print_tools(ffmpeg.as_deref());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenSw { out } => {
            let js = cache::render_service_worker(&config.cache.name, &config.cache.url_prefix);
            match out {
                Some(path) => {
                    std::fs::write(&path, js)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", js),
            }
        }
    }

    Ok(())
}

/// Load `--config`, or `optimedia.toml` from the working directory.
///
/// An explicit path must exist; the default one is optional.
fn load_config(explicit: Option<&Path>) -> Result<OptimizerConfig, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) if !path.exists() => {
            Err(format!("config file not found: {}", path.display()).into())
        }
        Some(path) => Ok(config::load_config(path)?),
        None => Ok(config::load_config(Path::new(config::CONFIG_FILENAME))?),
    }
}

/// Size the global rayon pool used by the image phase.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
