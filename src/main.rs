use anyhow::Context;
use clap::{Parser, Subcommand};
use mobidex::{
    BrowseQuery, DeviceRecord, ExplainedMatch, MatchQuery, PredictionInput, SpecVector, Workspace,
    WorkspaceConfig,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Browse phone specs, estimate prices, and find the closest catalog device
#[derive(Parser, Debug)]
#[command(name = "mobidex")]
#[command(about = "Mobile phone catalog explorer and price estimator", long_about = None)]
struct Args {
    /// Path to the device dataset (CSV)
    #[arg(short, long, default_value = "mobile_data_cleaned_2026.csv")]
    dataset: PathBuf,

    /// Path to a pre-trained price model (JSON)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List brand choices
    Brands,
    /// List the distinct values of a text column
    Values {
        /// Column name, e.g. OS or Chipset
        field: String,
    },
    /// Filter the catalog by brand and model name
    Browse {
        #[arg(long)]
        brand: Option<String>,
        /// Case-insensitive model name substring
        #[arg(long, default_value = "")]
        search: String,
        /// Maximum number of devices to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Estimate a price and show the closest device image
    Predict {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        os: String,
        #[arg(long)]
        chipset: String,
    },
    /// Find the closest catalog device to the given specs
    Match {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        os: Option<String>,
        #[arg(long)]
        chipset: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct TargetArgs {
    /// RAM in GB
    #[arg(long, allow_negative_numbers = true)]
    ram: f64,
    /// Battery capacity in mAh
    #[arg(long, allow_negative_numbers = true)]
    battery: f64,
    /// Primary camera resolution in MP
    #[arg(long, allow_negative_numbers = true)]
    camera: f64,
    /// Weight in grams
    #[arg(long, allow_negative_numbers = true)]
    weight: f64,
}

impl TargetArgs {
    fn specs(&self) -> SpecVector {
        SpecVector::new(self.ram, self.battery, self.camera, self.weight)
    }
}

#[derive(Serialize)]
struct PredictResponse {
    price_eur: f64,
    illustration: ExplainedMatch,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Mobidex v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);

    let mut config = WorkspaceConfig::new(&args.dataset);
    if let Some(model) = &args.model {
        info!("Model: {:?}", model);
        config = config.with_model(model);
    }

    let workspace = Workspace::open(config).with_context(|| {
        format!(
            "Error loading data. Make sure '{}' exists and is a valid dataset",
            args.dataset.display()
        )
    })?;

    match args.command {
        Command::Brands => {
            let brands = workspace.store().brand_options()?;
            print_list(&brands, args.json)?;
        }
        Command::Values { field } => {
            let values = workspace.store().distinct_values(&field)?;
            print_list(&values, args.json)?;
        }
        Command::Browse {
            brand,
            search,
            limit,
        } => {
            let page = workspace.store().browse(&BrowseQuery {
                brand,
                search,
                limit,
            });
            if args.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                println!("Currently exploring {} devices", page.total);
                if page.records.is_empty() {
                    println!("No devices found matching your criteria. Try adjusting the filters!");
                }
                for record in &page.records {
                    print_card(record, workspace.placeholder_image());
                }
            }
        }
        Command::Predict {
            target,
            brand,
            os,
            chipset,
        } => {
            let input = PredictionInput {
                brand,
                specs: target.specs(),
                os,
                chipset,
            };
            let price = workspace.predict(&input)?;
            let outcome = workspace.illustrate(&input)?;
            let illustration = ExplainedMatch::from_outcome(
                &outcome,
                &Workspace::match_query(&input),
                workspace.placeholder_image(),
            );

            if args.json {
                let response = PredictResponse {
                    price_eur: price,
                    illustration,
                };
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("Estimated price: {:.2} EUR", price);
                print_match(&illustration);
            }
        }
        Command::Match {
            target,
            brand,
            os,
            chipset,
        } => {
            let query = MatchQuery {
                target: target.specs(),
                brand,
                os,
                chipset,
            };
            info!(
                "{} of {} devices are match candidates",
                workspace.engine().candidate_count(&query),
                workspace.catalog().len()
            );
            let outcome = workspace.engine().find(&query)?;
            let explained =
                ExplainedMatch::from_outcome(&outcome, &query, workspace.placeholder_image());

            if args.json {
                println!("{}", serde_json::to_string_pretty(&explained)?);
            } else {
                print_match(&explained);
                for (field, term) in &explained.explain {
                    println!("  {:<18} {:.3}", field, term);
                }
            }
        }
    }

    Ok(())
}

fn print_list(values: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(values)?);
    } else {
        for value in values {
            println!("{}", value);
        }
    }
    Ok(())
}

fn print_card(record: &DeviceRecord, placeholder: &str) {
    let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string());

    println!("{}", record.display_name());
    println!("  Price: {} EUR", number(record.price_eur));
    println!(
        "  Battery: {} mAh | RAM: {} GB",
        number(record.battery_mah),
        number(record.ram_gb)
    );
    println!("  Image: {}", record.image_url().unwrap_or(placeholder));
}

fn print_match(explained: &ExplainedMatch) {
    match &explained.record {
        Some(record) => println!(
            "Closest device: {} ({:?} match, distance {:.3})",
            record.display_name(),
            explained.kind,
            explained.distance.unwrap_or_default()
        ),
        None => println!("No matching device image found"),
    }
    println!("Image: {}", explained.image);
}
