#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lingua_backend::run().await
}
