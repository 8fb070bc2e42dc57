/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &["rs_babble_server", "rs_babble_core"];

/// Initialize logging based on CLI verbosity level.
///
/// Mapping:
/// - 0 (none) -> info
/// - 1 (-v)   -> debug
/// - 2+ (-vv) -> trace
///
/// `RUST_LOG` env var overrides the CLI flag if set.
pub fn init(verbosity: u8) {
	let level = match verbosity {
		0 => "info",
		1 => "debug",
		_ => "trace",
	};

	let default_filter: String = CRATE_TARGETS
		.iter()
		.map(|t| format!("{t}={level}"))
		.collect::<Vec<_>>()
		.join(",");

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}
