// Create or update a catalog user. The optional first argument selects the
// database file (default `library.db`).

use library_catalog::{logging, ui, Config, Database};

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_args(std::env::args().skip(1));
    let db = Database::open(&config.database_path)?;
    tracing::info!(path = %db.path().display(), "provisioning user");

    ui::provision_user(&mut ui::Terminal::new(), &db)
}
