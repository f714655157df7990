//! Multiselect CLI - inspect multiselect attribute definitions
//!
//! # Commands
//!
//! ```bash
//! multiselect describe colors.json                  # Show configuration
//! multiselect encode colors.json query '["r","b"]'  # Logical value -> text form
//! multiselect decode colors.json storage 'r,b'      # Text form -> logical value
//! multiselect validate colors.json '"r"'            # Check a candidate value
//! multiselect filter colors.json r --target query   # Build a filter fragment
//! multiselect diff colors.json '["r"]'              # Diff viewer markup
//! multiselect sync colors.json master.json          # Take over master options
//! ```
//!
//! Defaults for `--protocol`, `--target` and `--csv-empty` come from
//! `MULTISELECT_*` environment variables (a `.env` file is honoured).

use clap::{Parser, Subcommand, ValueEnum};
use multiselect::{
    ConversionSettings, CsvEmptyPolicy, EditProtocol, FilterParams, FilterTarget,
    MultiselectDescriptor,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "multiselect")]
#[command(about = "Inspect and exercise multiselect attribute definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the configuration of a definition
    Describe {
        /// Definition JSON file
        definition: PathBuf,
    },

    /// Encode a logical value (JSON) into a text form
    Encode {
        /// Definition JSON file
        definition: PathBuf,
        /// Target form
        form: EncodeForm,
        /// Logical value as JSON, e.g. '["a","b"]'
        value: String,
    },

    /// Decode a text form into a logical value
    Decode {
        /// Definition JSON file
        definition: PathBuf,
        /// Source form
        form: DecodeForm,
        /// Encoded text (JSON when --protocol structured)
        text: String,
        /// Edit protocol of the editing surface
        #[arg(long)]
        protocol: Option<EditProtocol>,
        /// What an empty CSV field imports as
        #[arg(long)]
        csv_empty: Option<CsvEmptyPolicy>,
    },

    /// Check a candidate value (JSON)
    Validate {
        /// Definition JSON file
        definition: PathBuf,
        /// Candidate value as JSON
        value: String,
        /// Skip the mandatory check
        #[arg(long)]
        omit_mandatory: bool,
    },

    /// Build a filter fragment
    Filter {
        /// Definition JSON file
        definition: PathBuf,
        /// Value to match
        value: String,
        /// Filter operator
        #[arg(long, default_value = "=")]
        operator: String,
        /// Column identifier (default: attribute name)
        #[arg(long)]
        column: Option<String>,
        /// Column to match against
        #[arg(long)]
        target: Option<FilterTarget>,
    },

    /// Render the diff viewer markup for a logical value (JSON)
    Diff {
        /// Definition JSON file
        definition: PathBuf,
        /// Logical value as JSON
        value: String,
    },

    /// Copy the option list of a master definition
    Sync {
        /// Definition JSON file
        definition: PathBuf,
        /// Master definition JSON file
        master: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodeForm {
    Storage,
    Query,
    Edit,
    Csv,
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum DecodeForm {
    Storage,
    Edit,
    Csv,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match ConversionSettings::from_env() {
        Ok(settings) => run(cli.command, settings),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, settings: ConversionSettings) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Describe { definition } => cmd_describe(&definition),

        Commands::Encode {
            definition,
            form,
            value,
        } => cmd_encode(&definition, form, &value),

        Commands::Decode {
            definition,
            form,
            text,
            protocol,
            csv_empty,
        } => cmd_decode(
            &definition,
            form,
            &text,
            protocol.unwrap_or(settings.edit_protocol),
            csv_empty.unwrap_or(settings.csv_empty),
        ),

        Commands::Validate {
            definition,
            value,
            omit_mandatory,
        } => cmd_validate(&definition, &value, omit_mandatory),

        Commands::Filter {
            definition,
            value,
            operator,
            column,
            target,
        } => {
            let mut params = settings.filter_params();
            if let Some(target) = target {
                params = params.with_target(target);
            }
            if let Some(column) = column {
                params = params.with_name(column);
            }
            cmd_filter(&definition, &value, &operator, &params)
        }

        Commands::Diff { definition, value } => cmd_diff(&definition, &value),

        Commands::Sync {
            definition,
            master,
            output,
        } => cmd_sync(&definition, &master, output.as_deref()),
    }
}

fn load(definition: &Path) -> Result<MultiselectDescriptor, Box<dyn std::error::Error>> {
    eprintln!("📄 Definition: {}", definition.display());
    Ok(MultiselectDescriptor::from_file(definition)?)
}

fn parse_value(raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    serde_json::from_str(raw).map_err(|e| format!("value is not valid JSON: {}", e).into())
}

fn cmd_describe(definition: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let d = load(definition)?;

    println!("Name:         {}", d.name());
    if !d.title().is_empty() {
        println!("Title:        {}", d.title());
    }
    println!("Type:         {} ({})", d.field_type(), d.value_type_hint());
    println!("Mandatory:    {}", d.is_mandatory());
    println!("Column:       {} / query {}", d.column_type(), d.query_column_type());
    println!(
        "Size:         {} x {}",
        d.width().map_or("-".to_string(), |w| w.to_string()),
        d.height().map_or("-".to_string(), |h| h.to_string())
    );
    println!("Options ({}):", d.options().len());
    for option in d.options() {
        println!("  {:<16} {}", option.value, option.key);
    }
    Ok(())
}

fn cmd_encode(definition: &Path, form: EncodeForm, raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let d = load(definition)?;
    let value = parse_value(raw)?;

    if let Some(tokens) = value.as_array() {
        let selection: Vec<String> = tokens.iter().map(multiselect::coerce::token).collect();
        let unknown = d.unknown_tokens(&selection);
        if !unknown.is_empty() {
            eprintln!("⚠️  Not in option list: {}", unknown.join(", "));
        }
    }

    let encoded = match form {
        EncodeForm::Storage => d.get_data_for_resource(&value),
        EncodeForm::Query => d.get_data_for_query_resource(&value),
        EncodeForm::Edit => d.get_data_for_editmode(&value),
        EncodeForm::Csv => d.csv_export(&value),
        EncodeForm::Version => d.get_version_preview(&value),
    };

    println!("{}", serde_json::to_string(&encoded)?);
    Ok(())
}

fn cmd_decode(
    definition: &Path,
    form: DecodeForm,
    text: &str,
    protocol: EditProtocol,
    csv_empty: CsvEmptyPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let d = load(definition)?;

    let decoded = match form {
        DecodeForm::Storage => d.get_data_from_resource(Some(text)),
        DecodeForm::Edit => {
            let input = match protocol {
                EditProtocol::Structured => parse_value(text)?,
                EditProtocol::Legacy => Value::String(text.to_string()),
            };
            d.get_data_from_editmode(&input, protocol)
        }
        DecodeForm::Csv => d.get_from_csv_import(text, csv_empty),
    };

    println!("{}", serde_json::to_string(&decoded)?);
    Ok(())
}

fn cmd_validate(definition: &Path, raw: &str, omit_mandatory: bool) -> Result<(), Box<dyn std::error::Error>> {
    let d = load(definition)?;
    let value = parse_value(raw)?;

    d.check_validity(&value, omit_mandatory)?;
    eprintln!("✅ Valid");
    Ok(())
}

fn cmd_filter(
    definition: &Path,
    value: &str,
    operator: &str,
    params: &FilterParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let d = load(definition)?;
    let condition = d.get_filter_condition_ext(value, operator, params)?;
    println!("{}", condition.trim_end());
    Ok(())
}

fn cmd_diff(definition: &Path, raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let d = load(definition)?;
    let value = parse_value(raw)?;
    println!("{}", serde_json::to_string_pretty(&d.get_diff_version_preview(&value))?);
    Ok(())
}

fn cmd_sync(definition: &Path, master: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut d = load(definition)?;
    let m = load(master)?;

    d.synchronize_with_master_definition(&m);
    eprintln!("🔄 {} options taken from '{}'", d.options().len(), m.name());

    let json = d.to_json()?;
    write_output(&json, output)
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
