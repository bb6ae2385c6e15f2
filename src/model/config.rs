use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sspm_txt",
    about = "Convert a Sound Space Plus .sspm map into a sorted note listing!"
)]
pub struct Args {
    /// Path to the target .sspm file.
    pub input: PathBuf,

    /// Time-scale factor. Every note timestamp is divided by this value (2.0 halves them).
    #[arg(short, long, default_value_t = 1.0)]
    pub speed: f64,

    /// Where to write the converted notes. Defaults to the input path with the format's extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format: txt|json.
    #[arg(short, long, default_value = "txt")]
    pub format: String,

    /// Dry run (print the first dry_run_max notes and exit without writing).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Maximum notes to print in dry run.
    #[arg(long, default_value_t = 80)]
    pub dry_run_max: usize,

    /// Convert the file even if it does not carry the .sspm extension.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "sspm_play",
    about = "Play a note listing (or a .sspm map) back by moving the mouse across a 3x3 grid!"
)]
pub struct PlayArgs {
    /// Path to an `x|y|ms` note listing, or a .sspm file to decode first.
    pub input: PathBuf,

    /// Time-scale factor applied when the input is a .sspm file.
    #[arg(short, long, default_value_t = 1.0)]
    pub speed: f64,

    /// Delays the start of the performance by N seconds after it is triggered.
    #[arg(long = "delay-start", default_value_t = 4.1)]
    pub delay_start: f64,

    /// Width and height of the on-screen grid in pixels.
    #[arg(short, long, default_value_t = 625)]
    pub grid_size: i32,

    /// Screen size used when no pointer backend is available, e.g. `1920x1080`.
    #[arg(long)]
    pub screen: Option<String>,

    /// Dry run (print the first dry_run_max pointer moves and exit).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Maximum moves to print in dry run.
    #[arg(long, default_value_t = 80)]
    pub dry_run_max: usize,

    /// Start right away and play once, without waiting for ENTER or offering a restart.
    #[arg(short = 'y', long = "no-prompt", default_value_t = false)]
    pub no_prompt: bool,

    /// Prints extra information to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}
