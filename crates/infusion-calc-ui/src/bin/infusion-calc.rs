//! Command-line infusion calculator.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use infusion_calc_core::catalog::Catalog;
use infusion_calc_core::db::Database;
use infusion_calc_core::engine::number_text;
use infusion_calc_ui::logging::env_log_filter;
use infusion_calc_ui::{Calculator, Language, Preferences, ResultView, Theme};

/// Environment variable naming the SQLite store.
const DATABASE_ENV: &str = "INFUSION_CALC_DB";

#[derive(Parser, Debug)]
#[command(name = "infusion-calc", version, about = "Offline infusion rate and dose calculator")]
struct Cli {
    /// SQLite store holding the catalog and preferences
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON catalog file (takes precedence over the store's catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List drugs in catalog order
    List,

    /// Replace the store's catalog with a JSON file
    Import {
        /// JSON array of drug records
        file: PathBuf,
    },

    /// Calculate rate and doses for one drug
    Calc {
        /// Drug position or name
        #[arg(long)]
        drug: String,

        /// Patient weight, kg
        #[arg(long, default_value = "")]
        weight: String,

        /// Infusion rate, mL/h
        #[arg(long, default_value = "")]
        rate: String,

        /// Target dose, mg/kg/h
        #[arg(long, default_value = "")]
        dose: String,

        /// Display language (fi, en); defaults to the stored preference
        #[arg(long)]
        lang: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change stored preferences
    Prefs {
        /// Display language (fi, en)
        #[arg(long)]
        lang: Option<String>,

        /// Color theme (light, dark)
        #[arg(long)]
        theme: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(env_log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = cli
        .db
        .clone()
        .or_else(|| std::env::var(DATABASE_ENV).ok().map(PathBuf::from));

    match cli.command {
        Command::List => {
            let catalog = load_catalog(cli.catalog.as_deref(), db_path.as_deref())?;
            for (index, drug) in catalog.iter().enumerate() {
                println!(
                    "{:>3}  {:<24} {} {}  [{}–{} mg/kg/h]",
                    index,
                    drug.name,
                    number_text(drug.concentration),
                    drug.unit,
                    number_text(drug.min_dose),
                    number_text(drug.max_dose)
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Import { file } => {
            let Some(path) = db_path else {
                bail!("import needs a store: pass --db or set {}", DATABASE_ENV);
            };
            let catalog = Catalog::load(&file)
                .with_context(|| format!("reading catalog {}", file.display()))?;
            let db = open_store(&path)?;
            db.replace_catalog(&catalog)?;
            println!("Imported {} drugs ({})", catalog.len(), catalog.fingerprint());
            Ok(ExitCode::SUCCESS)
        }
        Command::Calc {
            drug,
            weight,
            rate,
            dose,
            lang,
            json,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref(), db_path.as_deref())?;
            let mut preferences = match &db_path {
                Some(path) => Preferences::load(&open_store(path)?)?,
                None => Preferences::default(),
            };
            if let Some(code) = lang {
                preferences.language = parse_language(&code)?;
            }

            let Some(index) = catalog.lookup(&drug) else {
                bail!("no drug matches '{}'", drug);
            };

            let mut calculator = Calculator::new(catalog, preferences)?;
            calculator.select_drug(index)?;
            calculator.set_weight(&weight);
            calculator.set_rate(&rate);
            let view = calculator.set_target_dose(&dose);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&calculator, &view);
            }

            Ok(if view.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Command::Prefs { lang, theme } => {
            let Some(path) = db_path else {
                bail!("preferences need a store: pass --db or set {}", DATABASE_ENV);
            };
            let db = open_store(&path)?;
            let mut preferences = Preferences::load(&db)?;
            if let Some(code) = lang {
                preferences.language = parse_language(&code)?;
            }
            if let Some(code) = theme {
                preferences.theme = Theme::from_code(&code)
                    .with_context(|| format!("unknown theme '{}'", code))?;
            }
            preferences.save(&db)?;
            println!(
                "language={} theme={}",
                preferences.language.code(),
                preferences.theme.code()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_store(path: &Path) -> anyhow::Result<Database> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Database::open(path).with_context(|| format!("opening store {}", path.display()))
}

fn load_catalog(file: Option<&Path>, db_path: Option<&Path>) -> anyhow::Result<Catalog> {
    if let Some(file) = file {
        return Catalog::load(file).with_context(|| format!("reading catalog {}", file.display()));
    }
    if let Some(path) = db_path {
        return Ok(open_store(path)?.load_catalog()?);
    }
    bail!("no catalog: pass --catalog, --db or set {}", DATABASE_ENV)
}

fn parse_language(code: &str) -> anyhow::Result<Language> {
    Language::from_code(code).with_context(|| format!("unknown language '{}'", code))
}

fn print_view(calculator: &Calculator, view: &ResultView) {
    let strings = calculator.strings();
    let drug = calculator.selected_drug();

    println!("{}", strings.title);
    println!("{}: {} ({})", strings.drug, drug.name, view.concentration);
    if let Some(values) = &view.values {
        println!("{}: {} mL/h", strings.calculated_rate, values.ml_per_hour);
        println!("{}:", strings.calculated_doses);
        println!("  {} mg/h", values.mg_per_hour);
        println!("  {} mg/kg/h", values.mg_per_kg_per_hour);
        println!("  {} mcg/kg/h", values.ug_per_kg_per_hour);
        println!("  {} mcg/kg/min", values.ug_per_kg_per_minute);
    }
    if let Some(info) = &view.dose_info {
        println!("{}", info);
    }
    if let Some(warning) = &view.warning_text {
        println!("! {}", warning);
    }
}
