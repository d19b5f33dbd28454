//! `docket` - command-line client for the case records API

mod client;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client::{ApiClient, CreateOutcome, DEFAULT_BASE_URL};
use serde_json::Value;
use std::path::PathBuf;

const SAMPLE_CASES: &str = include_str!("../data/sample_cases.json");

#[derive(Parser)]
#[command(name = "docket", about = "Docket case records client", version)]
struct Cli {
    /// Server base URL
    #[arg(long, global = true, env = "DOCKET_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load sample cases (or cases from a JSON file) into the server
    Seed {
        /// JSON array of case payloads
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Search cases
    Search(SearchArgs),
    /// List suggestion values: case-types, statuses, judges or counties
    Suggest { field: String },
    /// Print one case as JSON
    Get { id: String },
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text query
    #[arg(short, long)]
    q: Option<String>,
    #[arg(long)]
    case_number: Option<String>,
    #[arg(long)]
    case_type: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    county: Option<String>,
    #[arg(long)]
    judge: Option<String>,
    #[arg(long)]
    party: Option<String>,
    #[arg(long)]
    attorney: Option<String>,
    /// Earliest filing date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Latest filing date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    #[arg(long)]
    page: Option<u64>,
    #[arg(long)]
    page_size: Option<u32>,
}

impl SearchArgs {
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("q", &self.q),
            ("case_number", &self.case_number),
            ("case_type", &self.case_type),
            ("status", &self.status),
            ("county", &self.county),
            ("judge_name", &self.judge),
            ("party_name", &self.party),
            ("attorney_name", &self.attorney),
            ("filed_date_from", &self.from),
            ("filed_date_to", &self.to),
        ];
        let mut params: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
            .collect();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("page_size", page_size.to_string()));
        }
        params
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.base_url)?;

    match cli.command {
        Commands::Seed { file } => seed(&api, file).await,
        Commands::Search(args) => search(&api, &args).await,
        Commands::Suggest { field } => {
            for value in api.suggest(&field).await? {
                println!("{value}");
            }
            Ok(())
        }
        Commands::Get { id } => {
            let case = api.get_case(&id).await?;
            println!("{}", serde_json::to_string_pretty(&case)?);
            Ok(())
        }
    }
}

async fn seed(api: &ApiClient, file: Option<PathBuf>) -> Result<()> {
    let status = api
        .health()
        .await
        .context("server is not reachable; is it running?")?;
    println!("Server status: {status}");

    let raw = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?,
        None => SAMPLE_CASES.to_string(),
    };
    let cases: Vec<Value> = serde_json::from_str(&raw).context("parse case list")?;

    let (mut created, mut skipped, mut failed) = (0, 0, 0);
    for case in &cases {
        let number = case["case_number"].as_str().unwrap_or("<no case_number>");
        match api.create_case(case).await? {
            CreateOutcome::Created(stored) => {
                created += 1;
                println!("created  {number} ({})", stored.id);
            }
            CreateOutcome::Conflict => {
                skipped += 1;
                println!("exists   {number}");
            }
            CreateOutcome::Rejected { status, detail } => {
                failed += 1;
                println!("rejected {number}: {status} {detail}");
            }
        }
    }

    println!("{created} created, {skipped} already present, {failed} rejected");
    if failed > 0 {
        anyhow::bail!("{failed} case(s) were rejected");
    }
    Ok(())
}

async fn search(api: &ApiClient, args: &SearchArgs) -> Result<()> {
    let page = api.search(&args.query_params()).await?;
    println!(
        "{} match(es), page {}/{} ({} per page)",
        page.total_count, page.page, page.total_pages, page.page_size
    );
    for case in &page.results {
        println!(
            "{:<20} {:<10} {} {}",
            case.data.case_number,
            case.data.status.as_str(),
            case.data.filed_date,
            case.data.description
        );
    }
    Ok(())
}
