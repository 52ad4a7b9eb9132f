//! Runtime configuration, provided to the component tree via context.

/// Where the taxonomy service lives and which locale to resolve display
/// names against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Base URL of the REST service, without a trailing slash.
	pub base_url: String,
	/// Locale key used when resolving `name` maps.
	pub locale: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			base_url: "https://localhost:5021".to_owned(),
			locale: "nb-NO".to_owned(),
		}
	}
}
