// Entrypoint: set up logging, load settings once, build the client and the
// terminal console, then hand off to the workflow loop. This is the only
// place the process decides to terminate.

use doctran_cli::{api::ApiClient, config::Settings, ui::TermConsole, workflow};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(e) = run() {
        let cause = format!("{e:#}");
        error!(error = %cause, "session failed");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let api = ApiClient::new(&settings)?;
    let console = TermConsole::new();
    workflow::run(&api, &console)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
