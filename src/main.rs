use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use folio::compare::SimilarityMethod;
use folio::config::Config;
use folio::output::terminal;
use folio::pipeline::{AnalysisOptions, AnalysisRun, Analyzer, Document};

/// Folio: word frequency, theme, and comparison analysis for classic novels.
///
/// Each input file is one book. Its id is the file stem and its title the
/// file name without `.txt`.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Word frequencies, statistics, and optional themes for a set of books
    Analyze {
        /// Plain-text book files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        normalize: NormalizeArgs,

        /// Number of corpus-wide top words (default: FOLIO_TOP_WORDS or 50)
        #[arg(long, allow_negative_numbers = true)]
        top_words: Option<i64>,

        /// Infer latent themes (needs at least two books)
        #[arg(long)]
        themes: bool,

        /// Number of themes to infer (default: FOLIO_NUM_TOPICS or 5)
        #[arg(long, allow_negative_numbers = true)]
        num_topics: Option<i64>,

        /// Seed for theme inference (default: FOLIO_SEED or 42)
        #[arg(long)]
        seed: Option<u64>,

        /// Include word-cloud weights
        #[arg(long)]
        wordcloud: bool,

        /// Include the frequency histogram
        #[arg(long)]
        charts: bool,

        /// Print the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Rank the words whose relative frequency differs most between two books
    Compare {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Id (file stem) of the first book
        #[arg(long)]
        first: String,

        /// Id (file stem) of the second book
        #[arg(long)]
        second: String,

        /// Rows to display (default: 15)
        #[arg(long, default_value = "15")]
        limit: usize,

        #[command(flatten)]
        normalize: NormalizeArgs,

        #[arg(long)]
        json: bool,
    },

    /// Pairwise similarity matrix across books
    Similarity {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value = "cosine")]
        method: MethodArg,

        #[command(flatten)]
        normalize: NormalizeArgs,

        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct NormalizeArgs {
    /// Drop English stopwords (plus FOLIO_CUSTOM_STOPWORDS)
    #[arg(long)]
    remove_stopwords: bool,

    /// Reduce words to their dictionary base form
    #[arg(long)]
    lemmatize: bool,

    /// Reduce words to Snowball stems (ignored with --lemmatize)
    #[arg(long)]
    stem: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Cosine,
    Jaccard,
}

impl From<MethodArg> for SimilarityMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Cosine => SimilarityMethod::Cosine,
            MethodArg::Jaccard => SimilarityMethod::Jaccard,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            files,
            normalize,
            top_words,
            themes,
            num_topics,
            seed,
            wordcloud,
            charts,
            json,
        } => {
            let options = AnalysisOptions {
                remove_stopwords: normalize.remove_stopwords,
                lemmatize: normalize.lemmatize,
                stem: normalize.stem,
                top_words: top_words.unwrap_or(config.top_words),
                generate_wordcloud: wordcloud,
                generate_charts: charts,
                analyze_themes: themes,
                num_topics: num_topics.unwrap_or(config.num_topics),
                seed: seed.unwrap_or(config.seed),
            };

            let run = run_analysis(&config, &files, options).await?;
            let report = run.report();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report);
            }
        }

        Commands::Compare {
            files,
            first,
            second,
            limit,
            normalize,
            json,
        } => {
            let options = normalize.options(&config);
            let run = run_analysis(&config, &files, options).await?;

            let result = run.compare(&first, &second)?;
            let correlation = run.rank_correlation(&first, &second)?;

            if json {
                let rows = result.top(limit);
                let payload = serde_json::json!({
                    "first": first,
                    "second": second,
                    "rows": rows,
                    "rank_correlation": correlation,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                terminal::display_comparison(&result, &first, &second, Some(&correlation), limit);
            }
        }

        Commands::Similarity {
            files,
            method,
            normalize,
            json,
        } => {
            let options = normalize.options(&config);
            let run = run_analysis(&config, &files, options).await?;
            let matrix = run.similarity_matrix(method.into());

            if json {
                println!("{}", serde_json::to_string_pretty(&matrix)?);
            } else {
                terminal::display_similarity(&matrix);
            }
        }
    }

    Ok(())
}

impl NormalizeArgs {
    /// Options for the comparison commands: normalization only, no themes.
    fn options(&self, config: &Config) -> AnalysisOptions {
        AnalysisOptions {
            remove_stopwords: self.remove_stopwords,
            lemmatize: self.lemmatize,
            stem: self.stem,
            top_words: config.top_words,
            num_topics: config.num_topics,
            seed: config.seed,
            ..AnalysisOptions::default()
        }
    }
}

/// Load the files, then run the CPU-bound analysis off the async runtime.
async fn run_analysis(
    config: &Config,
    files: &[PathBuf],
    options: AnalysisOptions,
) -> Result<AnalysisRun> {
    let documents: Vec<Document> = folio::input::load_documents(files, config.concurrency).await?;
    info!(documents = documents.len(), "Books loaded");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg}")?);
    spinner.set_message(if options.analyze_themes {
        "Analyzing books and inferring themes..."
    } else {
        "Analyzing books..."
    });
    spinner.enable_steady_tick(Duration::from_millis(100));

    let analyzer: Analyzer = config.analyzer();
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&documents, &options))
        .await
        .context("analysis task panicked")?;
    spinner.finish_and_clear();

    Ok(result?)
}
