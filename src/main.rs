use dotenvy::dotenv;
use shoestore::{
    config,
    core::{catalog::CatalogSnapshot, import},
    errors::Result,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// Single-user desktop workload; one thread is all the runtime needs
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally

    // 3. Load the main application configuration
    let app_config = config::load()?;
    info!("Successfully processed application configuration.");

    // 4. Connect to the store and make sure the schema exists
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 5. Import seed data when a seed file is present
    if app_config.seed_path.exists() {
        let seed = config::seed::load_seed(&app_config.seed_path)
            .inspect_err(|e| error!("Failed to read seed file: {e}"))?;
        let summary = import::import_all(&db, &seed)
            .await
            .inspect_err(|e| error!("Seed import failed: {e}"))?;
        for (stage, report) in [
            ("pickup_points", &summary.pickup_points),
            ("users", &summary.users),
            ("products", &summary.products),
            ("orders", &summary.orders),
        ] {
            for failure in &report.failed {
                warn!(stage, row = failure.row, reason = %failure.reason, "seed row skipped");
            }
        }
    } else {
        info!(path = %app_config.seed_path.display(), "No seed file found, skipping import.");
    }

    // 6. Confirm the catalog is readable
    let snapshot = CatalogSnapshot::load(&db).await?;
    info!(products = snapshot.len(), "Catalog ready.");

    Ok(())
}
