pub mod commands;
pub mod logging;

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

use crate::commands::classify::ClassifyArgs;

#[derive(Debug, Parser)]
#[command(
    name = "tariffy",
    about = "Tariffy HS-code classifier CLI",
    long_about = "Classify products into HS chapters and codes, inspect shortlists, and browse saved classifications.",
    after_help = "Examples:\n  tariffy classify --name \"Men's Cotton T-Shirt\" --json\n  tariffy shortlist --name \"Seiko watch\"\n  tariffy history --search seiko\n  tariffy doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ProductArgs {
    #[arg(long, help = "Product title")]
    name: String,
    #[arg(long, default_value = "", help = "Free-text product description")]
    description: String,
    #[arg(
        long = "attr",
        value_name = "KEY=VALUE",
        value_parser = parse_attribute,
        help = "Item specific, repeatable (e.g. --attr Material=Leather)"
    )]
    attributes: Vec<(String, String)>,
    #[arg(long, default_value = "", help = "Marketplace category path, `>`-separated")]
    category: String,
}

impl ProductArgs {
    fn into_classify_args(self, json: bool, save: bool) -> ClassifyArgs {
        ClassifyArgs {
            name: self.name,
            description: self.description,
            attributes: self.attributes,
            category: self.category,
            json,
            save,
            ..ClassifyArgs::default()
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank up to three HS candidates for a product")]
    Classify {
        #[command(flatten)]
        product: ProductArgs,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
        #[arg(long, help = "Persist the result to classification history")]
        save: bool,
        #[arg(
            long,
            default_value = "",
            help = "Listing URL or other reference stored with a saved result"
        )]
        reference: String,
    },
    #[command(about = "Show the chapters a product is most likely to fall under")]
    Shortlist {
        #[command(flatten)]
        product: ProductArgs,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List or search saved classifications, newest first")]
    History {
        #[arg(long, help = "Case-insensitive match on product name or reference")]
        search: Option<String>,
        #[arg(long, default_value_t = commands::history::DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, classifier corpus, and DB connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute key is empty in `{raw}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init_from_env();

    let result = match cli.command {
        Command::Classify { product, json, save, reference } => {
            commands::classify::run(ClassifyArgs {
                reference,
                ..product.into_classify_args(json, save)
            })
        }
        Command::Shortlist { product, json } => {
            commands::shortlist::run(product.into_classify_args(json, false))
        }
        Command::History { search, limit, json } => commands::history::run(search, limit, json),
        Command::Migrate => commands::migrate::run(),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
