#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pipeval_lib::main().await
}
