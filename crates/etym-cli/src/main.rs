//! Etymology database CLI.
//!
//! Provides the `etym` binary, a thin wrapper over `etym-core` and
//! `etym-storage`: convert a database between its two JSON shapes, inspect
//! languages and roots, look up words, and add entries.
//!
//! Every subcommand loads through `JsonFileStore`, so legacy files without a
//! `format` field are accepted; files are always written with one.

mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use etym_core::{CoreError, EtymologyGraph, Info, LangKey, Root, RootKey};
use etym_storage::{DocumentForm, DocumentStore, JsonFileStore, StorageError};

use crate::config::CliConfig;

/// Etymology database tools.
#[derive(Parser)]
#[command(name = "etym", about = "Etymology database tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Read a database and write it in the chosen shape.
    Convert {
        /// Input database file.
        #[arg(short, long)]
        input: PathBuf,

        /// Output database file.
        #[arg(short, long)]
        output: PathBuf,

        /// Output shape: graph or dict (default: $ETYM_FORM, else graph).
        #[arg(short, long)]
        form: Option<DocumentForm>,
    },

    /// Print a language with its ancestry and vocabulary.
    ShowLang {
        /// Path to the database file.
        #[arg(short, long)]
        db: PathBuf,

        /// Language name.
        name: String,
    },

    /// Print a root with its derivation and classification.
    ShowRoot {
        /// Path to the database file.
        #[arg(short, long)]
        db: PathBuf,

        /// Canonical root key, e.g. "la pater father".
        key: String,
    },

    /// Find the single root of a language by text, or by gloss as "<gloss>".
    Lookup {
        /// Path to the database file.
        #[arg(short, long)]
        db: PathBuf,

        /// Language name.
        lang: String,

        /// Root text, or gloss in angle brackets.
        query: String,
    },

    /// Add a language, optionally descending from a source language.
    AddLang {
        /// Path to the database file (created if missing).
        #[arg(short, long)]
        db: PathBuf,

        /// Language name.
        name: String,

        /// Direct source language.
        #[arg(short, long)]
        source: Option<String>,

        /// Attribute bag as a JSON object; replaces any existing one.
        #[arg(long)]
        info: Option<String>,

        /// Output shape (default: $ETYM_FORM, else graph).
        #[arg(short, long)]
        form: Option<DocumentForm>,
    },

    /// Add a root, optionally derived from one or more etyma.
    AddRoot {
        /// Path to the database file (created if missing).
        #[arg(short, long)]
        db: PathBuf,

        /// Canonical root key, e.g. "it padre father".
        key: String,

        /// Etymon root key; repeat for compounds.
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Attribute bag as a JSON object; replaces any existing one.
        #[arg(long)]
        info: Option<String>,

        /// Output shape (default: $ETYM_FORM, else graph).
        #[arg(short, long)]
        form: Option<DocumentForm>,
    },
}

fn main() {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?config, "resolved configuration");

    let exit_code = match cli.command {
        Commands::Convert {
            input,
            output,
            form,
        } => run_convert(&input, &output, config.form(form)),
        Commands::ShowLang { db, name } => run_show_lang(&db, &name),
        Commands::ShowRoot { db, key } => run_show_root(&db, &key),
        Commands::Lookup { db, lang, query } => run_lookup(&db, &lang, &query),
        Commands::AddLang {
            db,
            name,
            source,
            info,
            form,
        } => run_add_lang(&db, &name, source.as_deref(), info.as_deref(), config.form(form)),
        Commands::AddRoot {
            db,
            key,
            sources,
            info,
            form,
        } => run_add_root(&db, &key, &sources, info.as_deref(), config.form(form)),
    };
    process::exit(exit_code);
}

/// Execute the convert subcommand.
///
/// Returns exit code: 0 = success, 1 = invalid data, 3 = I/O error.
fn run_convert(input: &Path, output: &Path, form: DocumentForm) -> i32 {
    if !input.exists() {
        eprintln!("Error: input file '{}' does not exist", input.display());
        return 3;
    }
    let graph = match JsonFileStore::new(input).load() {
        Ok(g) => g,
        Err(e) => return report(&e),
    };
    match JsonFileStore::new(output).save(&graph, form) {
        Ok(()) => {
            print_json(&json!({
                "output": output.display().to_string(),
                "form": form.to_string(),
                "languages": graph.language_count(),
                "roots": graph.root_count(),
            }));
            0
        }
        Err(e) => report(&e),
    }
}

/// Execute the show-lang subcommand.
fn run_show_lang(db: &Path, name: &str) -> i32 {
    let graph = match open(db) {
        Ok(g) => g,
        Err(code) => return code,
    };
    let result = LangKey::new(name).and_then(|key| {
        let lang = graph.language(&key)?;
        Ok(json!({
            "name": lang.name(),
            "source": lang.source().map(ToString::to_string),
            "children": lang.children().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "vocabulary": lang.vocabulary().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "info": lang.info(),
        }))
    });
    finish(result)
}

/// Execute the show-root subcommand.
fn run_show_root(db: &Path, key: &str) -> i32 {
    let graph = match open(db) {
        Ok(g) => g,
        Err(code) => return code,
    };
    let result = RootKey::parse(key).and_then(|key| graph.root(&key).map(describe_root));
    finish(result)
}

/// Execute the lookup subcommand.
fn run_lookup(db: &Path, lang: &str, query: &str) -> i32 {
    let graph = match open(db) {
        Ok(g) => g,
        Err(code) => return code,
    };
    let result = LangKey::new(lang).and_then(|key| {
        let lang = graph.language(&key)?;
        lang.lookup(query).map(describe_root)
    });
    finish(result)
}

/// Execute the add-lang subcommand.
fn run_add_lang(
    db: &Path,
    name: &str,
    source: Option<&str>,
    info: Option<&str>,
    form: DocumentForm,
) -> i32 {
    let info = match info.map(parse_info).transpose() {
        Ok(info) => info,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };
    let mut store = JsonFileStore::new(db);
    let mut graph = match store.load() {
        Ok(g) => g,
        Err(e) => return report(&e),
    };

    let added = add_lang(&mut graph, name, source, info);
    save_and_finish(&mut store, &graph, form, added)
}

/// Execute the add-root subcommand.
fn run_add_root(
    db: &Path,
    key: &str,
    sources: &[String],
    info: Option<&str>,
    form: DocumentForm,
) -> i32 {
    let info = match info.map(parse_info).transpose() {
        Ok(info) => info,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };
    let mut store = JsonFileStore::new(db);
    let mut graph = match store.load() {
        Ok(g) => g,
        Err(e) => return report(&e),
    };

    let added = add_root(&mut graph, key, sources, info);
    save_and_finish(&mut store, &graph, form, added)
}

/// Parses the keys and adds the language, describing the result.
fn add_lang(
    graph: &mut EtymologyGraph,
    name: &str,
    source: Option<&str>,
    info: Option<Info>,
) -> Result<serde_json::Value, CoreError> {
    let name = LangKey::new(name)?;
    let source = source.map(LangKey::new).transpose()?;
    let lang = graph.add_language(name, source, info)?;
    Ok(json!({
        "name": lang.name(),
        "source": lang.source().map(ToString::to_string),
    }))
}

/// Parses the keys and adds the root, describing the result.
fn add_root(
    graph: &mut EtymologyGraph,
    key: &str,
    sources: &[String],
    info: Option<Info>,
) -> Result<serde_json::Value, CoreError> {
    let key = RootKey::parse(key)?;
    let sources = sources
        .iter()
        .map(|source| RootKey::parse(source))
        .collect::<Result<Vec<_>, _>>()?;
    let root = graph.add_root(key, Some(sources.as_slice()), info)?;
    Ok(describe_root(root))
}

/// Loads a database that must already exist.
fn open(db: &Path) -> Result<EtymologyGraph, i32> {
    if !db.exists() {
        eprintln!("Error: database '{}' does not exist", db.display());
        return Err(3);
    }
    JsonFileStore::new(db).load().map_err(|e| report(&e))
}

fn describe_root(root: Root<'_>) -> serde_json::Value {
    json!({
        "root": root.key().to_string(),
        "lang": root.lang().to_string(),
        "text": root.text(),
        "gloss": root.gloss(),
        "sources": root.sources().iter().map(ToString::to_string).collect::<Vec<_>>(),
        "children": root.children().iter().map(ToString::to_string).collect::<Vec<_>>(),
        "compound": root.is_compound(),
        "inherited": root.is_inherited(),
        "info": root.info(),
    })
}

/// Parses an `--info` argument, which must be a JSON object.
fn parse_info(text: &str) -> Result<Info, String> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("--info must be a JSON object".to_string()),
        Err(e) => Err(format!("--info is not valid JSON: {}", e)),
    }
}

fn save_and_finish(
    store: &mut JsonFileStore,
    graph: &EtymologyGraph,
    form: DocumentForm,
    added: Result<serde_json::Value, CoreError>,
) -> i32 {
    let value = match added {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Err(e) = store.save(graph, form) {
        return report(&e);
    }
    print_json(&value);
    0
}

fn finish(result: Result<serde_json::Value, CoreError>) -> i32 {
    match result {
        Ok(value) => {
            print_json(&value);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Prints an error and returns its exit code: 3 for I/O, 1 otherwise.
fn report(err: &StorageError) -> i32 {
    eprintln!("Error: {}", err);
    match err {
        StorageError::Io(_) => 3,
        _ => 1,
    }
}

fn print_json(value: &serde_json::Value) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize result: {}\"}}", e));
    println!("{}", json);
}
