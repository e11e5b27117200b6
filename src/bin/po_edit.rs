use anyhow::{Context, Result, bail};
use clap::Parser;
use pocat::{Catalog, DEFAULT_DOMAIN};
use serde_json::json;
use std::path::PathBuf;

/// Set one message's translation in a PO catalog and write the catalog back.
#[derive(Parser)]
#[command(name = "po-edit", version)]
struct Args {
    /// Catalog file to edit.
    file: PathBuf,

    /// The msgid of the message to update.
    #[arg(long)]
    msgid: String,

    /// Disambiguating msgctxt, for messages that carry one.
    #[arg(long)]
    msgctxt: Option<String>,

    /// New translation text.
    #[arg(long)]
    msgstr: String,

    /// Domain to search.
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    domain: String,

    /// Write here instead of editing the catalog in place.
    #[arg(long)]
    output: Option<PathBuf>,
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

    let target = catalog
        .messages_in(&args.domain)
        .find(|m| m.msgid() == args.msgid && m.msgctxt().as_deref() == args.msgctxt.as_deref());
    let Some(message) = target else {
        bail!(
            "no message with msgid {:?} (msgctxt {:?}) in domain '{}'",
            args.msgid,
            args.msgctxt,
            args.domain
        );
    };

    message
        .set_msgstr(&args.msgstr)
        .with_context(|| format!("updating msgid {:?}", args.msgid))?;

    let output = args.output.unwrap_or_else(|| args.file.clone());
    catalog
        .write(&output)
        .with_context(|| format!("writing {}", output.display()))?;

    let record = json!({
        "file": output.display().to_string(),
        "domain": args.domain,
        "msgid": args.msgid,
        "msgstr": args.msgstr,
        "updated": true,
    });
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}
