use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use roster_importer::app::import_service::ImportService;
use roster_importer::config::{Config, ImportOptions, LogConfig};
use roster_importer::domain::{ParsedRow, RowStatus};
use roster_importer::error::ImportError;
use roster_importer::infra::rest_store::RestRosterStore;
use roster_importer::logging;
use roster_importer::pipeline::{edit, parse_roster, payload};

#[derive(Parser)]
#[command(name = "roster_importer")]
#[command(about = "Race participant roster import pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a roster file without submitting anything
    Validate {
        /// Path to the roster file (comma-delimited text)
        file: std::path::PathBuf,
        #[command(flatten)]
        flags: OptionFlags,
    },
    /// Validate a roster file and submit the importable rows
    Import {
        /// Path to the roster file (comma-delimited text)
        file: std::path::PathBuf,
        /// Campaign the participants belong to
        #[arg(long)]
        campaign: String,
        /// Distance/category assigned to every imported participant
        #[arg(long)]
        category: String,
        /// Chip-code correction applied before submission, ROW=CODE (repeatable)
        #[arg(long = "set-chip", value_name = "ROW=CODE")]
        set_chip: Vec<String>,
        /// Build the payload but skip the outbound request
        #[arg(long)]
        dry_run: bool,
        /// Path to the configuration file
        #[arg(long, default_value = "config.toml")]
        config: String,
        #[command(flatten)]
        flags: OptionFlags,
    },
}

#[derive(Args)]
struct OptionFlags {
    /// Disable duplicate-bib detection
    #[arg(long)]
    no_duplicate_check: bool,

    /// Disable derived age-group buckets
    #[arg(long)]
    no_auto_age_group: bool,

    /// Accepted for parity with the operator UI; consulted by no rule
    #[arg(long)]
    update_existing: bool,
}

impl OptionFlags {
    fn apply(&self, mut options: ImportOptions) -> ImportOptions {
        if self.no_duplicate_check {
            options.check_duplicate_bib = false;
        }
        if self.no_auto_age_group {
            options.auto_age_group = false;
        }
        if self.update_existing {
            options.update_existing = true;
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file, flags } => {
            let _log_guard = logging::init_logging(&LogConfig::default());
            let options = flags.apply(ImportOptions::default());
            let rows = load_and_parse(&file, &options).await?;
            print_report(&rows);
        }
        Commands::Import {
            file,
            campaign,
            category,
            set_chip,
            dry_run,
            config,
            flags,
        } => {
            let Config {
                store,
                import,
                logging: log_config,
            } = Config::load_from(&config)?;
            let _log_guard = logging::init_logging(&log_config);
            let options = flags.apply(import);

            let mut rows = load_and_parse(&file, &options).await?;
            for spec in &set_chip {
                let (row_num, code) = parse_chip_spec(spec)?;
                if edit::apply_chip_code(&mut rows, row_num, &code) {
                    info!(row = row_num, "chip code updated before submission");
                } else {
                    println!("⚠️  No row {} in the roster; chip edit skipped", row_num);
                }
            }
            print_report(&rows);

            if dry_run {
                let batch = payload::build_payload(&rows, &category);
                println!("\n📦 Dry run: {} record(s) would be submitted", batch.len());
                if !batch.is_empty() {
                    println!("{}", payload::render_json(&batch)?);
                }
                return Ok(());
            }

            let store = Arc::new(RestRosterStore::from_config(&store)?);
            let service = ImportService::new(store);
            match service.submit(&rows, &campaign, &category).await {
                Ok(outcome) => {
                    println!(
                        "\n✅ Imported {} of {} submitted record(s)",
                        outcome.created, outcome.submitted
                    );
                }
                Err(e) => {
                    error!("Import failed: {}", e);
                    println!("\n❌ Import failed: {}", e);
                    println!("   No rows were modified; fix the issue and retry the import.");
                }
            }
        }
    }
    Ok(())
}

async fn load_and_parse(
    file: &Path,
    options: &ImportOptions,
) -> Result<Vec<ParsedRow>, ImportError> {
    // Reading the upload is the only async boundary before submission; the
    // parse itself is synchronous CPU work
    let text = tokio::fs::read_to_string(file).await?;
    let today = chrono::Utc::now().date_naive();
    parse_roster(&text, options, today)
}

fn parse_chip_spec(spec: &str) -> Result<(usize, String), ImportError> {
    let Some((row, code)) = spec.split_once('=') else {
        return Err(ImportError::Config(format!(
            "Invalid --set-chip value '{}', expected ROW=CODE",
            spec
        )));
    };
    let row_num = row.trim().parse::<usize>().map_err(|_| {
        ImportError::Config(format!("Invalid row number in --set-chip value '{}'", spec))
    })?;
    Ok((row_num, code.to_string()))
}

fn print_report(rows: &[ParsedRow]) {
    let ready = rows.iter().filter(|r| r.status == RowStatus::Ready).count();
    let warning = rows.iter().filter(|r| r.status == RowStatus::Warning).count();
    let errors = rows.iter().filter(|r| r.status == RowStatus::Error).count();

    println!("\n📋 Roster validation results:");
    println!("   Total rows: {}", rows.len());
    println!("   ✅ Ready: {}   ⚠️  Warning: {}   ❌ Error: {}", ready, warning, errors);

    for row in rows.iter().filter(|r| r.status != RowStatus::Ready) {
        let marker = match row.status {
            RowStatus::Warning => "⚠️ ",
            _ => "❌",
        };
        println!(
            "   {} row {} (bib '{}'): {}",
            marker, row.row_num, row.bib, row.error_msg
        );
    }
}
