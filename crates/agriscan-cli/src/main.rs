mod display;
mod scan;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agriscan_client::classifier::mime_for_path;
use agriscan_client::{ChatClient, ClassifierClient};
use agriscan_core::{ClassifiedScan, NewFraudReport, PluCode, PluLookup, chat_context, digits_only};
use agriscan_store::{FraudReportStore, HistoryStore, JsonFileRepository};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agriscan")]
#[command(about = "Check whether produce is organic from a scan and its PLU sticker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print JSON instead of text cards
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding saved history and fraud reports
    #[arg(long, global = true, env = "AGRISCAN_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// PLU table file to use instead of the built-in table
    #[arg(long, global = true, env = "AGRISCAN_PLU_TABLE")]
    plu_table: Option<PathBuf>,
}

#[derive(Args)]
struct ScanOpts {
    /// PLU code typed in by hand; replaces the detected code
    #[arg(long)]
    manual_plu: Option<String>,

    /// Save the result to the user's history
    #[arg(long, requires = "user")]
    save: bool,

    /// User the scan belongs to
    #[arg(long)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a classifier payload (JSON file, or - for stdin)
    Reconcile {
        input: PathBuf,
        #[command(flatten)]
        opts: ScanOpts,
    },
    /// Look up a PLU code in the table
    Lookup { code: String },
    /// Show the PLU table
    Table,
    /// Send an image to the classifier and reconcile the result
    Scan {
        image: PathBuf,
        /// Classifier backend base URL
        #[arg(long, env = "AGRISCAN_CLASSIFIER_URL", default_value = "http://localhost:8000")]
        classifier_url: String,
        #[command(flatten)]
        opts: ScanOpts,
    },
    /// List a user's saved scans, newest first
    History {
        #[arg(long)]
        user: String,
    },
    /// Submit or list fraud reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Ask the produce assistant a question
    Chat {
        message: String,
        /// Produce being discussed
        #[arg(long)]
        produce: Option<String>,
        /// Its organic status
        #[arg(long)]
        status: Option<String>,
        #[arg(long, env = "AGRISCAN_CHAT_URL", default_value = "https://api.openai.com/v1")]
        chat_url: String,
        #[arg(long, env = "AGRISCAN_CHAT_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        #[arg(long, env = "AGRISCAN_CHAT_MODEL", default_value = agriscan_client::chat::DEFAULT_MODEL)]
        model: String,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Report a vendor selling produce with a suspicious organic label
    Add {
        #[arg(long)]
        vendor: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        produce: String,
        /// The label the vendor displayed
        #[arg(long, default_value = "Organic")]
        label: String,
        #[arg(long)]
        plu: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// List reports, newest first
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("agriscan v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Reconcile { input, opts } => {
            let classified = scan::read_scan(input)?;
            report_scan(&cli, classified, opts, None).await?;
        }
        Commands::Lookup { code } => {
            let table = scan::load_table(cli.plu_table.as_deref())?;
            let code = PluCode::parse(&digits_only(code))?;
            let found = table.lookup(&code)?;
            if cli.json {
                display::print_json(&found)?;
            } else {
                println!("{}", display::lookup_line(&found));
            }
        }
        Commands::Table => {
            let table = scan::load_table(cli.plu_table.as_deref())?;
            if cli.json {
                display::print_json(&table.entries())?;
            } else {
                display::print_table(&table);
            }
        }
        Commands::Scan {
            image,
            classifier_url,
            opts,
        } => {
            let bytes = tokio::fs::read(image)
                .await
                .with_context(|| format!("reading {}", image.display()))?;
            let client = ClassifierClient::new(classifier_url.clone());
            let classified = client
                .classify(&bytes, mime_for_path(image))
                .await
                .context("classifying image")?;
            let image_ref = Some(image.display().to_string());
            report_scan(&cli, classified, opts, image_ref).await?;
        }
        Commands::History { user } => {
            let history = HistoryStore::new(open_repo(&cli.data_dir)?);
            let records = history.list(user).await?;
            if cli.json {
                display::print_json(&records)?;
            } else {
                display::print_history(user, &records);
            }
        }
        Commands::Report { command } => {
            let reports = FraudReportStore::new(open_repo(&cli.data_dir)?);
            match command {
                ReportCommands::Add {
                    vendor,
                    location,
                    produce,
                    label,
                    plu,
                    email,
                    description,
                    user,
                } => {
                    let stored = reports
                        .submit(NewFraudReport {
                            user_id: user.clone(),
                            email: email.clone(),
                            produce_label: produce.clone(),
                            organic_label: label.clone(),
                            vendor_name: vendor.clone(),
                            location: location.clone(),
                            plu: plu.as_deref().map(digits_only),
                            description: description.clone(),
                        })
                        .await?;
                    if cli.json {
                        display::print_json(&stored)?;
                    } else {
                        println!("Report {} submitted.", stored.id);
                    }
                }
                ReportCommands::List => {
                    let listed = reports.list().await?;
                    if cli.json {
                        display::print_json(&listed)?;
                    } else {
                        display::print_reports(&listed);
                    }
                }
            }
        }
        Commands::Chat {
            message,
            produce,
            status,
            chat_url,
            api_key,
            model,
        } => {
            let client = ChatClient::new(chat_url.clone(), api_key.clone(), model.clone());
            let context = chat_context(produce.as_deref(), status.as_deref());
            let answer = client
                .complete(message, context.as_deref())
                .await
                .context("asking the assistant")?;
            if cli.json {
                display::print_json(&serde_json::json!({ "response": answer }))?;
            } else {
                println!("{answer}");
            }
        }
    }

    Ok(())
}

fn open_repo(dir: &Path) -> Result<Arc<JsonFileRepository>> {
    let repo = JsonFileRepository::open(dir)
        .with_context(|| format!("opening data directory {}", dir.display()))?;
    Ok(Arc::new(repo))
}

/// Reconcile, print, and optionally save one scan.
async fn report_scan(
    cli: &Cli,
    classified: ClassifiedScan,
    opts: &ScanOpts,
    image_ref: Option<String>,
) -> Result<()> {
    let table = scan::load_table(cli.plu_table.as_deref())?;
    let eval = scan::evaluate(classified, opts.manual_plu.as_deref(), &table)
        .context("could not analyze scan")?;

    if cli.json {
        display::print_json(&eval)?;
    } else {
        print!("{}", display::verdict_card(&eval)?);
    }

    if opts.save {
        let user = opts.user.as_deref().unwrap_or_default();
        let history = HistoryStore::new(open_repo(&cli.data_dir)?);
        let record = history.save(user, eval.into_new_scan(image_ref)).await?;
        if !cli.json {
            println!();
            println!("Saved as {}.", record.id);
        }
    }
    Ok(())
}
