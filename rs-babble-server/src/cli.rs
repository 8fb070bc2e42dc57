use std::path::PathBuf;

use clap::Parser;

/// HTTP front end for the Markov babbler.
#[derive(Parser, Debug)]
#[command(
	name = "rs-babble-server",
	version,
	about = "Serves Markov-generated speech over HTTP"
)]
pub struct Cli {
	/// Increase verbosity (-v debug, -vv trace).
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Path to TOML configuration file.
	#[arg(short, long, default_value = "babble.toml")]
	pub config: PathBuf,

	/// Override the corpus to load at startup (file name without extension).
	#[arg(long)]
	pub corpus: Option<String>,

	/// Override the RNG seed from config.
	#[arg(short, long)]
	pub seed: Option<u64>,
}
