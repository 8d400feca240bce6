// Entrypoint for the CLI application.
// - Keeps `main` small: load the config, create an API client and hand
//   both to the screen flow.
// - Returns `anyhow::Result` so any failure is reported with its cause.

use vdeploy::{api::ApiClient, config, ui};

fn main() -> anyhow::Result<()> {
    println!("vdeploy {}", env!("CARGO_PKG_VERSION"));

    // First run writes the config file and asks the user to rerun.
    let Some(cfg) = config::load_or_configure()? else {
        return Ok(());
    };

    let api = ApiClient::new(&cfg)?;

    // Start the interactive session. This call blocks until the flow
    // completes or the user cancels.
    ui::run(&api, &cfg)
}
