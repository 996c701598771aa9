use clap::{Parser, ValueEnum};
use scroll_page::RenderFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scroll-page")]
#[command(about = "Infinite-scrolling product list over a mock catalog")]
#[command(version)]
pub struct Args {
    /// Number of generated products (ignored when --catalog is given)
    #[arg(short = 'n', long, default_value_t = 25)]
    pub items: usize,

    /// JSON file with the product catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Records per page
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// Simulated network latency in milliseconds
    #[arg(short, long)]
    pub latency_ms: Option<u64>,

    /// Rows that fit in the viewport
    #[arg(long)]
    pub viewport_rows: Option<usize>,

    /// Output format for rendered frames
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Make the first fetch of this page fail
    #[arg(long)]
    pub fail_page: Option<u32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Text,
}

/// Convert from CLI argument format to the library's render format
pub fn convert_format(arg: FormatArg) -> RenderFormat {
    match arg {
        FormatArg::Html => RenderFormat::Html,
        FormatArg::Text => RenderFormat::Text,
    }
}
