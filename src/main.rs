#[tokio::main]
async fn main() {
    if let Err(e) = diabcare_lib::run().await {
        eprintln!("{}: {e}", diabcare_lib::config::APP_NAME);
        std::process::exit(1);
    }
}
