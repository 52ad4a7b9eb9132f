//! CSR entry point; Trunk builds this into the served WASM bundle.

use taxonomy_admin::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
