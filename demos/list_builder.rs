use clap::Parser;
use scroll_page::{ListStatus, ProductList};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of generated products
    #[arg(short, long, default_value_t = 25)]
    items: usize,

    /// Records per page
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Simulated latency in milliseconds
    #[arg(short, long)]
    latency_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Building a list over {} generated products", args.items);

    let mut builder = ProductList::generated(args.items);

    if let Some(page_size) = args.page_size {
        println!("Overriding page size: {}", page_size);
        builder = builder.with_page_size(page_size);
    }

    if let Some(latency_ms) = args.latency_ms {
        println!("Overriding latency: {}ms", latency_ms);
        builder = builder.with_latency_ms(latency_ms);
    }

    let mut list = builder.mount();
    let start_time = std::time::Instant::now();

    // Keep scrolling to the bottom until the list runs out
    while let Some(frame) = list.next_frame().await {
        println!(
            "Render {}: {} rows ({:?})",
            frame.revision,
            frame.rows.len(),
            frame.status
        );

        match frame.status {
            ListStatus::EndOfList | ListStatus::Failed(_) => break,
            ListStatus::Idle => {
                if list.scroll_to_bottom().await.is_err() {
                    break;
                }
            }
            ListStatus::Loading => {}
        }
    }

    println!(
        "Reached the end of the list in {:.2} seconds.",
        start_time.elapsed().as_secs_f64()
    );
}
