//! Binary entry point: read the configuration, make sure the catalog exists
//! and run the menu until the user leaves.
use std::io::{self, IsTerminal};

use env_logger::Env;
use library_catalog::ui::interrupt;
use library_catalog::{
    ensure_schema, load_dotenv, BookRepository, DbConfig, Menu, StdinInput, TerminalInput,
};
use log::{debug, warn};

/// Exit status is 0 for both a menu exit and an interrupt. Database problems
/// are reported inside the loop; only a broken terminal surfaces here.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("error")).init();

    if let Err(err) = interrupt::install() {
        warn!("could not install the SIGINT handler: {err}");
    }

    load_dotenv();
    let config = DbConfig::from_env();
    debug!("configuration: {config:?}");

    if let Err(err) = ensure_schema(&config) {
        warn!("could not prepare the catalog database: {err}");
    }

    let repo = BookRepository::new(config);
    let stdout = io::stdout();
    let color = stdout.is_terminal();

    let outcome = if io::stdin().is_terminal() {
        Menu::new(repo, TerminalInput::new(), stdout.lock())
            .with_color(color)
            .run()?
    } else {
        Menu::new(repo, StdinInput::stdin(), stdout.lock())
            .with_color(color)
            .run()?
    };
    debug!("menu finished: {outcome:?}");

    Ok(())
}
