#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quarry_cli::parse_and_run().await
}
