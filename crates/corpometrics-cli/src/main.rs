use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use corpometrics_annotate::{BasicAnnotator, HfSubwordTokenizer};
use corpometrics_core::{Level, MetricOptions, SentenceIndexing, Stimulus, TypeCounting};
use corpometrics_metrics::{CountColumns, Table, UnitCounts};

mod load;

#[derive(Parser)]
#[command(
    name = "corpometrics",
    version,
    about = "Corpus-level linguistic metrics over paged text stimuli"
)]
struct Cli {
    /// JSON file holding an array of stimuli.
    #[arg(long)]
    stimuli: PathBuf,

    /// Aggregation level: sentence, page, doc, or lang.
    #[arg(long, default_value = "page")]
    level: Level,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    metric: MetricCommand,
}

#[derive(Subcommand)]
enum MetricCommand {
    /// Pronoun and word counts per sentence.
    Pronouns {
        /// Run sentence indices continuously across pages instead of
        /// restarting at each page.
        #[arg(long)]
        continuous_sentences: bool,
    },
    /// Punctuation counts per sentence.
    Punctuation {
        #[arg(long)]
        continuous_sentences: bool,
    },
    /// Word and subword-token counts per page.
    Fertility {
        /// HuggingFace tokenizer.json to count subwords with.
        #[arg(long)]
        tokenizer: PathBuf,
    },
    /// Type-token ratio per page.
    Ttr {
        /// Case-fold and strip non-alphanumeric characters before counting.
        #[arg(long)]
        normalize: bool,
        /// Sum per-page distinct type counts at doc/lang instead of unioning
        /// the type sets.
        #[arg(long)]
        page_sum_types: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let stimuli = load::stimuli_from_json(&cli.stimuli)?;
    run(&cli, &stimuli)
}

fn run(cli: &Cli, stimuli: &[Stimulus]) -> anyhow::Result<()> {
    let annotator = BasicAnnotator;
    match &cli.metric {
        MetricCommand::Pronouns {
            continuous_sentences,
        } => {
            let options = sentence_options(*continuous_sentences);
            let table = corpometrics_metrics::pronouns(stimuli, &annotator, cli.level, &options);
            emit(&table, cli.format)
        }
        MetricCommand::Punctuation {
            continuous_sentences,
        } => {
            let options = sentence_options(*continuous_sentences);
            let table =
                corpometrics_metrics::punctuation(stimuli, &annotator, cli.level, &options);
            emit(&table, cli.format)
        }
        MetricCommand::Fertility { tokenizer } => {
            let tokenizer = HfSubwordTokenizer::from_file(tokenizer)?;
            let table =
                corpometrics_metrics::fertility(stimuli, &annotator, &tokenizer, cli.level)?;
            emit(&table, cli.format)
        }
        MetricCommand::Ttr {
            normalize,
            page_sum_types,
        } => {
            let options = MetricOptions {
                normalize_ttr: *normalize,
                type_counting: if *page_sum_types {
                    TypeCounting::PageSum
                } else {
                    TypeCounting::ExactUnion
                },
                ..MetricOptions::default()
            };
            let table = corpometrics_metrics::ttr(stimuli, &annotator, cli.level, &options)?;
            emit(&table, cli.format)
        }
    }
}

fn sentence_options(continuous: bool) -> MetricOptions {
    MetricOptions {
        sentence_indexing: if continuous {
            SentenceIndexing::Continuous
        } else {
            SentenceIndexing::PerPage
        },
        ..MetricOptions::default()
    }
}

fn emit<C>(table: &Table<C>, format: OutputFormat) -> anyhow::Result<()>
where
    C: UnitCounts + CountColumns,
    C::Totals: CountColumns,
{
    match format {
        OutputFormat::Table => {
            let batch = table.to_record_batch()?;
            println!("{}", arrow::util::pretty::pretty_format_batches(&[batch])?);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(table)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_level_and_metric() {
        let cli = Cli::parse_from([
            "corpometrics",
            "--stimuli",
            "stimuli.json",
            "--level",
            "lang",
            "ttr",
            "--normalize",
        ]);
        assert_eq!(cli.level, Level::Lang);
        assert!(matches!(
            cli.metric,
            MetricCommand::Ttr {
                normalize: true,
                page_sum_types: false
            }
        ));
    }

    #[test]
    fn rejects_unknown_level() {
        let result = Cli::try_parse_from([
            "corpometrics",
            "--stimuli",
            "stimuli.json",
            "--level",
            "paragraph",
            "pronouns",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn sentence_options_map_the_flag() {
        assert_eq!(
            sentence_options(false).sentence_indexing,
            SentenceIndexing::PerPage
        );
        assert_eq!(
            sentence_options(true).sentence_indexing,
            SentenceIndexing::Continuous
        );
    }
}
