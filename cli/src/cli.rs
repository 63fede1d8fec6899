use std::path::PathBuf;

/// Earthquake and tectonic plate map builder
#[derive(clap::Parser, Debug)]
#[command(name = "quakemap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Fetch both feeds and write the map (forbids stdout)
    Render(RenderArgs),

    /// Download both feeds to a directory for offline rendering
    Fetch(FetchArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum OutputFormat { Html, Svg }

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Output file, defaults to "./map.html" (or "./map.svg")
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// JSON map configuration file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Seismic feed URL or local GeoJSON file (overrides the config)
    #[arg(long)]
    pub seismic: Option<String>,

    /// Plate boundary feed URL or local GeoJSON file (overrides the config)
    #[arg(long)]
    pub plates: Option<String>,

    /// Give up on a feed after this many seconds (overrides the config)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// SVG canvas width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// JSON map configuration file (for feed locations)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Give up on a feed after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}
