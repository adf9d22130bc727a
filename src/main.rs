use clap::{Parser, Subcommand};
use phrasediff::{
    backfill::{backfill, BackfillOptions},
    config::{Config, ConfigStore, FileConfigStore, OutputFormat},
    formats::{self, InputFormat},
    score_batch, score_with_breakdown,
    store::SqlitePhraseStore,
};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{error, info};

/// deterministic difficulty scoring for scrambled phrases
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Scores how hard a phrase is to unscramble on a 1-100 scale, from letter rarity and letter arrangement, with English and Swedish frequency tables and automatic language detection."
)]
pub struct Cli {
    /// how to render results (defaults to the configured format)
    #[clap(short = 'o', long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// read configuration from this file instead of the default location
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// score a single phrase
    Score {
        text: String,

        /// language tag (en, sv, ...); unknown or missing tags are detected from the text
        #[clap(short = 'l', long)]
        language: Option<String>,

        /// show the normalized text and both sub-scores
        #[clap(long)]
        explain: bool,
    },

    /// print the detected language of a phrase
    Detect { text: String },

    /// print the label for a score
    Label {
        #[clap(allow_negative_numbers = true)]
        score: i64,
    },

    /// score many phrases read from a file or stdin
    Batch {
        /// input file; stdin when omitted
        #[clap(short = 'i', long)]
        input: Option<PathBuf>,

        #[clap(short = 'f', long, value_enum, default_value_t = InputFormat::Lines)]
        format: InputFormat,
    },

    /// fill in the difficulty of every unscored phrase in the database
    Backfill {
        /// SQLite database (defaults to the configured or standard location)
        #[clap(short = 'd', long)]
        database: Option<PathBuf>,

        /// stop after this many phrases
        #[clap(long)]
        limit: Option<usize>,
    },
}

fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, config: Config) -> phrasediff::Result<()> {
    let output = cli.output.unwrap_or(config.output);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Score {
            text,
            language,
            explain,
        } => {
            let breakdown = score_with_breakdown(Some(text.as_str()), language.as_deref());
            formats::write_breakdown(&mut out, &breakdown, explain, output)?;
        }
        Command::Detect { text } => {
            let language = phrasediff::detect_language(Some(text.as_str()));
            writeln!(out, "{} ({})", language, language.code())?;
        }
        Command::Label { score } => {
            writeln!(out, "{}", phrasediff::label(score))?;
        }
        Command::Batch { input, format } => {
            let reader: Box<dyn Read> = match input {
                Some(path) => Box::new(File::open(path)?),
                None => Box::new(io::stdin()),
            };
            let items = formats::read_phrases(reader, format)?;
            info!(items = items.len(), "scoring batch");
            formats::write_scored(&mut out, &score_batch(&items), output)?;
        }
        Command::Backfill { database, limit } => {
            let mut store = match database.or(config.database) {
                Some(path) => SqlitePhraseStore::open(path)?,
                None => SqlitePhraseStore::open_default()?,
            };
            let options = BackfillOptions {
                limit: limit.or(config.batch_limit),
                cancel: None,
            };
            let summary = backfill(&mut store, &options)?;
            formats::write_summary(&mut out, &summary, output)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FileConfigStore::with_path(path).load(),
        None => FileConfigStore::new().load(),
    };
    init_tracing(&config);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "phrasediff failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_score_with_language() {
        let cli = Cli::parse_from(["phrasediff", "score", "hej", "-l", "sv", "--explain"]);
        match cli.command {
            Command::Score {
                text,
                language,
                explain,
            } => {
                assert_eq!(text, "hej");
                assert_eq!(language.as_deref(), Some("sv"));
                assert!(explain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_global_output_after_subcommand() {
        let cli = Cli::parse_from(["phrasediff", "batch", "-f", "csv", "--output", "json"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Command::Batch { input, format } => {
                assert_eq!(input, None);
                assert_eq!(format, InputFormat::Csv);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_negative_label() {
        let cli = Cli::parse_from(["phrasediff", "label", "-5"]);
        match cli.command {
            Command::Label { score } => assert_eq!(score, -5),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
