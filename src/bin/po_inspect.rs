use anyhow::{Context, Result, bail};
use clap::Parser;
use pocat::Catalog;
use serde_json::json;
use std::path::PathBuf;

/// Summarize a gettext PO catalog as one JSON record on stdout.
#[derive(Parser)]
#[command(name = "po-inspect", version)]
struct Args {
    /// Catalog file to inspect.
    file: PathBuf,

    /// Restrict the report to one domain.
    #[arg(long)]
    domain: Option<String>,

    /// Include one record per message.
    #[arg(long)]
    messages: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let mut catalog = Catalog::new();
    catalog
        .read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let domains = match &args.domain {
        Some(domain) => {
            if !catalog.domains().iter().any(|d| d == domain) {
                bail!(
                    "no domain '{domain}' in {}; available: {:?}",
                    args.file.display(),
                    catalog.domains()
                );
            }
            vec![domain.clone()]
        }
        None => catalog.domains(),
    };

    let mut domain_reports = Vec::new();
    let mut records = Vec::new();
    for domain in &domains {
        let mut total = 0usize;
        let mut translated = 0usize;
        let mut fuzzy = 0usize;
        for message in catalog.messages_in(domain) {
            total += 1;
            if message.is_translated() {
                translated += 1;
            }
            if message.is_fuzzy() {
                fuzzy += 1;
            }
            if args.messages {
                records.push(message.to_record());
            }
        }
        domain_reports.push(json!({
            "name": domain,
            "messages": total,
            "translated": translated,
            "fuzzy": fuzzy,
        }));
    }

    let mut record = json!({
        "file": args.file.display().to_string(),
        "domains": domain_reports,
        "diagnostics": catalog.diagnostics(),
    });
    if args.messages {
        record["messages"] = serde_json::to_value(&records)?;
    }

    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}
