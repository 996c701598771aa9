use clap::Parser;
use scroll_page::ProductList;
use scroll_page::render::{RenderFormat, Renderer};
use scroll_page::trigger::VisibilityEntry;
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON catalog file (a generated catalog is used when omitted)
    #[arg(long)]
    catalog: Option<String>,

    /// JSON configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Path to JSON configuration file
    #[arg(short = 'f', long)]
    config_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    let mut builder = match args.catalog {
        Some(path) => {
            println!("Loading catalog from file: {}", path);
            ProductList::from_catalog_file(path)?
        }
        None => ProductList::generated(40),
    };

    // Apply configuration from file if specified
    if let Some(config_file) = args.config_file {
        println!("Loading configuration from file: {}", config_file);
        builder = builder.with_config_file(config_file)?;
    }

    // Apply configuration from string if specified (overrides file config)
    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        builder = builder.with_config_str(&config_str)?;
    }

    let mut list = builder.mount();

    // Act as the host page's visibility observer: every rendered sentinel is
    // reported as visible, as if the user kept the last row on screen
    while let Some(frame) = list.next_frame().await {
        println!("{}", Renderer::render(&frame, RenderFormat::Html));

        if frame.is_end_of_list() || frame.can_retry() {
            break;
        }
        if frame.is_loading() {
            continue;
        }
        if let Some(observation) = frame.observation {
            list.report_visibility(VisibilityEntry {
                observation,
                is_intersecting: true,
            })
            .await?;
        }
    }

    let state = list.unmount().await?;
    println!(
        "Loaded {} records in {} pages.",
        state.items.len(),
        state.current_page
    );

    Ok(())
}
