use clap::Parser;
use scroll_page::render::Renderer;
use scroll_page::source::catalog;
use scroll_page::{FetchError, ListStatus, MockSource, ProductList};

mod args;
use args::{Args, convert_format};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let records = match &args.catalog {
        Some(path) => match catalog::from_json_file(path) {
            Ok(records) => records,
            Err(e) => {
                ::log::error!("Failed to load catalog {}: {}", path.display(), e);
                return;
            }
        },
        None => catalog::generate(args.items),
    };
    ::log::info!("Serving {} products", records.len());

    let source = MockSource::new(records);
    let mut builder = ProductList::new(source.clone());

    if let Some(path) = &args.config {
        builder = match builder.with_config_file(path) {
            Ok(builder) => builder,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return;
            }
        };
    }

    // Command-line values override the config file
    if let Some(page_size) = args.page_size {
        builder = builder.with_page_size(page_size);
    }
    if let Some(latency_ms) = args.latency_ms {
        builder = builder.with_latency_ms(latency_ms);
    }
    if let Some(rows) = args.viewport_rows {
        builder = builder.with_viewport_rows(rows);
    }

    let format = convert_format(args.format);

    if let Some(page) = args.fail_page {
        ::log::info!("Page {} will fail on its first fetch", page);
        source.inject_failure_at(page, simulated_failure());
    }

    let start_time = std::time::Instant::now();
    let mut list = builder.mount();
    let mut retried = false;

    while let Some(frame) = list.next_frame().await {
        println!("{}", Renderer::render(&frame, format));

        let outcome = match &frame.status {
            ListStatus::EndOfList => break,
            ListStatus::Loading => Ok(()),
            ListStatus::Failed(failure) => {
                if retried {
                    ::log::error!("Giving up on page {}", failure.page);
                    break;
                }
                retried = true;
                list.retry().await
            }
            // The user scrolls down to the last row
            ListStatus::Idle => list.scroll_to_bottom().await,
        };

        if let Err(e) = outcome {
            ::log::error!("List stopped responding: {}", e);
            break;
        }
    }

    match list.unmount().await {
        Ok(state) => ::log::info!(
            "Rendered {} rows over {} pages in {:.2} seconds",
            state.items.len(),
            state.current_page,
            start_time.elapsed().as_secs_f64()
        ),
        Err(e) => ::log::warn!("Unmount failed: {}", e),
    }
}

fn simulated_failure() -> FetchError {
    FetchError::Network("simulated connection reset".to_string())
}
