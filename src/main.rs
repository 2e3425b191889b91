#[tokio::main]
async fn main() {
    if let Err(err) = adgraph::cli::run().await {
        eprintln!("adgraph: {}", err);
        std::process::exit(1);
    }
}
