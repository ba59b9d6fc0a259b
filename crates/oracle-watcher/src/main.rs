#[tokio::main]
async fn main() {
    oracle_watcher::start(std::env::args()).await;
}
