// Entrypoint for the interactive catalog.
// - Keeps `main` small: open the database and hand it to the UI loop.
// - The loop only ends when the console does (for example on end of input).

use library_catalog::{logging, ui, BookManager, Config, Database};

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::default();
    let db = Database::open(&config.database_path)?;
    let mut manager = BookManager::new(db);

    ui::main_menu(&mut ui::Terminal::new(), &mut manager)
}
