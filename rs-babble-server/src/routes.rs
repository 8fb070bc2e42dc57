use std::sync::Mutex;

use actix_web::{HttpResponse, Responder, get, post, put, web};
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde::Deserialize;

use rs_babble_core::io::{get_filename, list_files, read_corpus};
use rs_babble_core::{CommandParser, Generator, MarkovModel, Request};

use crate::config::ServerConfig;

/// Reply posted when a generation comes back empty.
pub const EMPTY_MESSAGE_REPLY: &str = "Can't post an empty message";

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	word: Option<String>,
	num_words: Option<i64>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	name: Option<String>,
}

/// Read-only settings shared by every handler.
pub struct AppContext {
	pub config: ServerConfig,
	pub parser: CommandParser,
}

impl AppContext {
	pub fn new(config: ServerConfig) -> Self {
		let parser = CommandParser::new(&config.bot.name, &config.bot.prefix);
		Self { config, parser }
	}
}

/// The corpus currently served.
pub struct LoadedCorpus {
	name: String,
	generator: Generator,
}

/// Mutable state behind the server's mutex.
#[derive(Default)]
pub struct SharedData {
	corpus: Option<LoadedCorpus>,
}

impl SharedData {
	/// Loads the corpus named in the configuration, if any.
	pub fn from_config(config: &ServerConfig) -> Result<Self> {
		let corpus = match &config.corpus {
			Some(name) => Some(load_corpus(config, name)?),
			None => None,
		};
		Ok(Self { corpus })
	}
}

/// Trains a generator on `<corpora_dir>/<name>.txt`.
///
/// # Errors
/// Fails on names that could leave the corpora directory, unreadable
/// files, and corpora the model rejects.
pub fn load_corpus(config: &ServerConfig, name: &str) -> Result<LoadedCorpus> {
	if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
		bail!("invalid corpus name '{name}'");
	}

	let path = config.corpora_dir.join(format!("{name}.txt"));
	let text = read_corpus(&path, config.max_lines)
		.with_context(|| format!("failed to read corpus '{}'", path.display()))?;

	let mut model = MarkovModel::new(&text, config.max_retries)
		.with_context(|| format!("failed to train on corpus '{name}'"))?;
	if let Some(max) = config.max_sentence_tokens {
		model = model.with_max_sentence_tokens(max);
	}

	let generator = match config.seed {
		Some(seed) => Generator::with_seed(model, seed),
		None => Generator::new(model),
	};

	info!("loaded corpus '{name}' from {}", path.display());
	Ok(LoadedCorpus {
		name: name.to_owned(),
		generator,
	})
}

/// Reply posted instead of a message longer than `max_len` characters.
pub fn too_long_reply(max_len: usize) -> String {
	format!("The generated message was too long. Messages longer than {max_len} characters don't go through.")
}

/// Applies the chat transport's length policy to a generated reply.
pub fn fit_message(speech: String, max_len: usize) -> String {
	if speech.is_empty() {
		return EMPTY_MESSAGE_REPLY.to_owned();
	}
	if speech.chars().count() > max_len {
		warn!("generated reply of {} characters exceeds the limit", speech.chars().count());
		return too_long_reply(max_len);
	}
	speech
}

/// Returns `true` if no reply to `request` can fit in `max_len` characters.
///
/// `n` words joined by single spaces take at least `2n - 1` characters, so
/// such requests are refused before any sampling.
pub fn cannot_fit(request: &Request, max_len: usize) -> bool {
	request
		.num_words()
		.and_then(|n| usize::try_from(n).ok())
		.is_some_and(|n| n > 0 && n.saturating_mul(2) - 1 > max_len)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates speech for the request shape given by the optional `word`
/// and `num_words` parameters. The word is lowercased before use.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	context: web::Data<AppContext>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let word = query
		.word
		.as_deref()
		.map(|w| w.trim().to_lowercase())
		.filter(|w| !w.is_empty());
	let request = Request::new(word, query.num_words);
	let max_len = context.config.max_message_len;
	if cannot_fit(&request, max_len) {
		debug!("refusing {request:?} before generation");
		return HttpResponse::PayloadTooLarge().body(too_long_reply(max_len));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(corpus) = shared_data.corpus.as_mut() else {
		return HttpResponse::ServiceUnavailable().body("No corpus loaded");
	};

	let speech = corpus.generator.respond(&request);
	if speech.chars().count() > max_len {
		return HttpResponse::PayloadTooLarge().body(fit_message(speech, max_len));
	}
	HttpResponse::Ok().body(speech)
}

/// HTTP POST endpoint `/v1/command`
///
/// Takes a raw chat message as body and answers with the text the bot
/// would post. Messages that do not invoke the bot get `204 No Content`.
#[post("/v1/command")]
async fn post_command(
	data: web::Data<Mutex<SharedData>>,
	context: web::Data<AppContext>,
	body: String,
) -> impl Responder {
	let request = match context.parser.parse(&body) {
		None => return HttpResponse::NoContent().finish(),
		Some(Err(e)) => return HttpResponse::Ok().body(e.to_string()),
		Some(Ok(request)) => request,
	};
	debug!("command parsed as {request:?}");
	let max_len = context.config.max_message_len;
	if cannot_fit(&request, max_len) {
		return HttpResponse::Ok().body(too_long_reply(max_len));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(corpus) = shared_data.corpus.as_mut() else {
		return HttpResponse::ServiceUnavailable().body("No corpus loaded");
	};

	let speech = corpus.generator.respond(&request);
	HttpResponse::Ok().body(fit_message(speech, max_len))
}

#[get("/v1/corpora")]
async fn get_corpora(context: web::Data<AppContext>) -> impl Responder {
	match list_files(&context.config.corpora_dir, "txt") {
		Ok(files) => {
			let names: Vec<String> = files.iter().filter_map(|f| get_filename(f).ok()).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/loaded_corpus")]
async fn get_loaded_corpus(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.corpus {
		Some(corpus) => HttpResponse::Ok().body(corpus.name.clone()),
		None => HttpResponse::ServiceUnavailable().body("No corpus loaded"),
	}
}

#[put("/v1/load_corpus")]
async fn put_corpus(
	data: web::Data<Mutex<SharedData>>,
	context: web::Data<AppContext>,
	query: web::Query<CorpusQuery>,
) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	// Train before locking, so generation keeps running on the old corpus
	let corpus = match load_corpus(&context.config, name) {
		Ok(c) => c,
		Err(e) => return HttpResponse::BadRequest().body(format!("Failed to load corpus: {e:#}")),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.corpus = Some(corpus);

	HttpResponse::Ok().body("Corpus loaded successfully")
}

/// Registers every endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(post_command)
		.service(get_corpora)
		.service(get_loaded_corpus)
		.service(put_corpus);
}
