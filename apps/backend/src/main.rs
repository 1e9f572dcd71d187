#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quotedrill_backend::run().await
}
