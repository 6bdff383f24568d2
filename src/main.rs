use anyhow::Result;
use bittodrop::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
