pub mod ircore;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use clap::{Parser, Subcommand, ValueEnum};
use ircore::cache::{DirCache, TokenCache};
use ircore::doc::cfg::RankConfig;
use ircore::doc::dir::load_corpus;
use ircore::engine::{Engine, RankRun};

#[derive(Parser)]
#[derive(Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// Related document finder for a directory of posts
struct Cli {
    #[clap(short, long, global = true)]
    /// Log run progress
    verbose: bool,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[derive(Debug)]
enum Commands {
    /// Print related documents of every document
    Related {
        #[clap(flatten)]
        run: RunArgs,
        #[clap(long, value_parser)]
        /// Maximum number of related documents per document
        limit: Option<usize>,
        #[clap(long, value_parser)]
        /// Directory keeping tokenized documents between runs
        cache_dir: Option<PathBuf>,
        #[clap(long, value_enum, default_value = "lines")]
        /// Output format
        format: OutputFormat,
    },
    /// Print the top keywords of every document
    Keywords {
        #[clap(flatten)]
        run: RunArgs,
    },
}

#[derive(clap::Args)]
#[derive(Debug)]
struct RunArgs {
    #[clap(short, long, value_parser)]
    /// Corpus directory
    corpus_dir: PathBuf,
    #[clap(long, value_parser)]
    /// Document language code (en, zh)
    lang: Option<String>,
    #[clap(long, value_parser)]
    /// Number of keywords each document contributes
    bow_size: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Lines,
    Json,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let res = match &cli.command {
        Commands::Related { run, limit, cache_dir, format } =>
            command_related(run, *limit, cache_dir.as_deref(), *format),
        Commands::Keywords { run } => command_keywords(run),
    };
    if let Err(e) = res {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn load_config(args: &RunArgs) -> Result<RankConfig, Box<dyn Error>> {
    let mut cfg = RankConfig::load(&args.corpus_dir)?;
    if let Some(lang) = &args.lang {
        cfg.doc_lang = lang.clone();
    }
    if let Some(bow_size) = args.bow_size {
        cfg.each_bow_size = bow_size;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run_engine(args: &RunArgs, cfg: RankConfig, cache: Option<&dyn TokenCache>) -> Result<RankRun, Box<dyn Error>> {
    let documents = load_corpus(&args.corpus_dir, &cfg);
    let engine = Engine::new(cfg);
    Ok(engine.run(&documents, cache)?)
}

fn command_related(args: &RunArgs, limit: Option<usize>, cache_dir: Option<&Path>, format: OutputFormat)
    -> Result<(), Box<dyn Error>> {
    let cfg = load_config(args)?;
    let limit = limit.or(cfg.limit);
    let cache = cache_dir.map(DirCache::new);
    let run = run_engine(args, cfg, cache.as_ref().map(|c| c as &dyn TokenCache))?;
    let entries = run.rank_all(limit)?;
    match format {
        OutputFormat::Lines => {
            for entry in &entries {
                println!("{}: {}", entry.id, entry.related.join(", "));
            }
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}

fn command_keywords(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let cfg = load_config(args)?;
    let run = run_engine(args, cfg, None)?;
    println!("{} documents, {} keywords", run.doc_count(), run.dimension());
    for id in run.index().doc_ids() {
        let terms: Vec<String> = run.top_terms(id)
            .iter()
            .map(|tw| format!("{}:{:.3}", tw.term, tw.tfidf))
            .collect();
        println!("{}: {}", id, terms.join(" "));
    }
    Ok(())
}
