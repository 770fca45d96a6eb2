use color_eyre::eyre::Result;

use roodeck::app::App;
use roodeck::logging;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    let mut app = App::new();
    app.run().await?;
    Ok(())
}
