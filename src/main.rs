//! Binary entry point: set up logging, build the starting catalog, and drive
//! the Ratatui event loop until the user exits.
use digital_library::{logging, run_app, App, AppConfig, Catalog};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::default();
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err:#}");
    }

    let catalog = if config.seed_demo_records {
        Catalog::with_demo_records()?
    } else {
        Catalog::new()
    };

    let mut app = App::new(catalog);
    run_app(&mut app, &config)
}
