// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive tool.
//
// Module responsibilities:
// - `api`: the blocking Vercel REST client (list, inspect, cancel,
//   redeploy) and the wire types.
// - `config`: the credential env file under the home directory, with the
//   one-time interactive bootstrap.
// - `menu`: the interactive terminal menus (single-choice, checkbox) and
//   the info table.
// - `ui`: the screen flow wiring menus to the API client.
// - `util`: shared formatting helpers.

pub mod api;
pub mod config;
pub mod menu;
pub mod ui;
pub mod util;
