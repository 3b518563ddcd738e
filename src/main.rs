use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use icongen::config::Config;
use icongen::font::FontSource;

/// Render the colour and outline app icons as PNG files.
#[derive(Parser, Debug)]
#[command(name = "icongen", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output directory (created if missing)
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Font file to try before the configured candidates (repeatable)
    #[arg(short, long = "font", value_name = "PATH")]
    fonts: Vec<PathBuf>,

    /// Skip every named font and draw with the built-in font
    #[arg(long, conflicts_with = "fonts")]
    builtin_font: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,icongen=info",
        1 => "warn,icongen=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(dir) = cli.out_dir {
        config.out_dir = dir;
    }
    if cli.builtin_font {
        config.fonts.clear();
    } else if !cli.fonts.is_empty() {
        let mut fonts: Vec<FontSource> = cli.fonts.into_iter().map(FontSource::new).collect();
        fonts.append(&mut config.fonts);
        config.fonts = fonts;
    }
    config.validate()?;

    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("create output directory {}", config.out_dir.display()))?;

    for spec in &config.icons {
        let generated = spec
            .generate(&config.fonts, &config.font_dirs, &config.out_dir)
            .with_context(|| format!("generate {}", spec.file))?;
        println!("✅ {} created ({}x{})", spec.file, generated.width, generated.height);
    }

    Ok(())
}
