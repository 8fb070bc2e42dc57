mod cli;
mod config;
mod logging;
mod routes;

use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::cli::Cli;
use crate::config::ServerConfig;
use crate::routes::{AppContext, SharedData};

/// Main entry point for the server.
///
/// Loads the configuration and the startup corpus, wraps the generator in
/// a `Mutex` (the random source is mutable state) and starts an Actix-web
/// HTTP server.
///
/// # Notes
/// - Binds to `bind:port` from the configuration (127.0.0.1:5000 by default).
/// - Without a startup corpus, generation endpoints answer 503 until
///   `PUT /v1/load_corpus` succeeds.
#[actix_web::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	logging::init(cli.verbose);

	let mut config = ServerConfig::load_or_default(&cli.config)?;
	if let Some(corpus) = cli.corpus {
		config.corpus = Some(corpus);
	}
	if let Some(seed) = cli.seed {
		config.seed = Some(seed);
	}

	let shared_data = SharedData::from_config(&config)?;
	let shared_model = web::Data::new(Mutex::new(shared_data));

	let address = (config.bind.clone(), config.port);
	let context = web::Data::new(AppContext::new(config));

	info!("listening on {}:{}", address.0, address.1);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.app_data(context.clone())
			.configure(routes::configure)
	})
		.bind((address.0.as_str(), address.1))
		.with_context(|| format!("failed to bind {}:{}", address.0, address.1))?
		.run()
		.await?;

	Ok(())
}
