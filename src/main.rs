use clap::{Parser, Subcommand};
use simple_lightbox::lightbox::LightboxController;
use simple_lightbox::model::GalleryModel;
use simple_lightbox::{config, generate, input, manifest, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-lightbox")]
#[command(about = "Static image grid with a navigable lightbox overlay")]
#[command(long_about = "\
Static image grid with a navigable lightbox overlay

Images come from an explicit manifest (--manifest entries.toml|entries.json)
or from scanning the content directory. Each image becomes a tile on the
grid page and gets its own overlay page with previous/next links that wrap
around within the image's group.

Content structure (scan mode):

  content/
  ├── config.toml                  # Site config (optional)
  ├── 001-cover.jpg                # Ungrouped image, caption \"cover\"
  ├── 010-Landscapes/              # Group \"Landscapes\"
  │   ├── 001-dawn.jpg
  │   ├── 001-dawn.txt             # Caption sidecar
  │   └── 002-dusk.jpg
  └── 020-Portraits/
      └── 001-anna.jpg

Replay events: open:<id>, next, prev, close, backdrop, escape

Run 'simple-lightbox gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (scanned manifest)
    #[arg(long, default_value = ".simple-lightbox-temp", global = true)]
    temp_dir: PathBuf,

    /// Explicit manifest file (.toml or .json) instead of scanning --source
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Validate manifest and config without building
    Check,
    /// Render the grid and overlay pages
    Build,
    /// Drive the lightbox with scripted events and print every snapshot
    Replay {
        /// Events such as open:dawn, next, prev, close
        #[arg(required = true)]
        events: Vec<String>,

        /// Print snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let scanned = manifest::scan(&cli.source)?;
            let model = GalleryModel::from_entries(scanned.entries.clone())?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&scanned)?;
            std::fs::write(&manifest_path, json)?;
            output::print_gallery_output(&model, &cli.source);
            println!("==> Manifest written to {}", manifest_path.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let model = manifest::load_model(&cli.source, cli.manifest.as_deref())?;
            config::load_config(&cli.source)?;
            output::print_gallery_output(&model, &cli.source);
            println!("==> Content is valid");
        }
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let model = manifest::load_model(&cli.source, cli.manifest.as_deref())?;
            let site_config = config::load_config(&cli.source)?;

            println!("==> Generating HTML \u{2192} {}", cli.output.display());
            let report = generate::generate(&model, &site_config, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Replay { events, json } => {
            let model = manifest::load_model(&cli.source, cli.manifest.as_deref())?;
            let events = input::parse_events(&events)?;

            let mut controller = LightboxController::new(model);
            controller.subscribe_fn(move |snapshot| {
                if json {
                    match serde_json::to_string(snapshot) {
                        Ok(line) => println!("{}", line),
                        Err(e) => eprintln!("snapshot serialization failed: {e}"),
                    }
                } else {
                    for line in output::format_snapshot(snapshot) {
                        println!("{}", line);
                    }
                }
            });

            for event in &events {
                if !json {
                    println!("{}", output::format_event(event));
                }
                if let Err(e) = input::dispatch(&mut controller, event) {
                    eprintln!("{}", output::format_rejected(&e));
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
