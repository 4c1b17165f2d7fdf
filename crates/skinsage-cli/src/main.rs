use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use skinsage_core::{recommend, Catalog, EffectNormalizer, RecommendQuery, SkinProblem, SortOrder};
use skinsage_vision::SkinClassifier;
use std::path::PathBuf;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "skinsage", about = "Skin-condition detection and skincare product recommendation CLI")]
struct Cli {
    /// Product catalog CSV (overrides SKINSAGE_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the seven skin problems the classifier can detect
    Problems,
    /// Recommend products for a manually selected skin problem
    Recommend {
        /// Skin problem identifier (e.g. "jerawat", "pori_pori_besar")
        #[arg(short, long)]
        problem: String,
        #[command(flatten)]
        opts: QueryOpts,
    },
    /// Classify a facial photo, then recommend products for the result
    Detect {
        /// Path to the facial photo (jpg/jpeg/png)
        #[arg(short, long)]
        image: PathBuf,
        /// ONNX model path (overrides SKINSAGE_MODEL)
        #[arg(long)]
        model: Option<PathBuf>,
        #[command(flatten)]
        opts: QueryOpts,
    },
    /// List every product in the catalog
    Products,
}

#[derive(clap::Args)]
struct QueryOpts {
    /// Maximum number of recommendations
    #[arg(long)]
    top_n: Option<usize>,
    /// Result ordering
    #[arg(long, value_enum, default_value_t = SortArg::Relevance)]
    sort: SortArg,
    /// Case-insensitive product-name filter
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Relevance,
    Name,
    Price,
    Brand,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Relevance => SortOrder::Relevance,
            SortArg::Name => SortOrder::Name,
            SortArg::Price => SortOrder::Price,
            SortArg::Brand => SortOrder::Brand,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let normalizer = match &config.alias_path {
        Some(path) => EffectNormalizer::from_json_path(path)
            .with_context(|| format!("loading alias table from {}", path.display()))?,
        None => EffectNormalizer::builtin(),
    };

    match &cli.command {
        Commands::Problems => {
            for problem in SkinProblem::ALL {
                let info = problem.info();
                println!("{problem}");
                println!("  {}", info.description);
                println!("  {}", info.image_url);
                println!();
            }
        }
        Commands::Recommend { problem, opts } => {
            let catalog = load_catalog(&cli, &config, &normalizer)?;
            let query = build_query(&opts, &config);
            print_recommendations(&catalog, problem, &query);
        }
        Commands::Detect { image, model, opts } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("reading image {}", image.display()))?;

            let model_path = model.clone().unwrap_or_else(|| config.model_path.clone());
            let mut classifier = SkinClassifier::load(&model_path.to_string_lossy())
                .with_context(|| format!("loading model {}", model_path.display()))?;
            let prediction = classifier.classify_bytes(&bytes)?;

            println!(
                "Detected skin problem: {} (confidence {:.1}%)",
                prediction.problem,
                prediction.confidence * 100.0
            );
            println!();

            let catalog = load_catalog(&cli, &config, &normalizer)?;
            let query = build_query(&opts, &config);
            print_recommendations(&catalog, prediction.problem.as_str(), &query);
        }
        Commands::Products => {
            let catalog = load_catalog(&cli, &config, &normalizer)?;
            for product in catalog.products() {
                print_product(&product.name, &product.brand, &product.raw_effects, &product.price, &product.product_url);
            }
        }
    }

    Ok(())
}

fn load_catalog(cli: &Cli, config: &Config, normalizer: &EffectNormalizer) -> Result<Catalog> {
    let path = cli.catalog.as_ref().unwrap_or(&config.catalog_path);
    Catalog::from_csv_path(path, normalizer)
        .with_context(|| format!("loading catalog {}", path.display()))
}

fn build_query(opts: &QueryOpts, config: &Config) -> RecommendQuery {
    RecommendQuery {
        top_n: opts.top_n.unwrap_or(config.default_top_n),
        sort: opts.sort.into(),
        search: opts.search.clone(),
    }
}

fn print_recommendations(catalog: &Catalog, problem_id: &str, query: &RecommendQuery) {
    let results = recommend(catalog, problem_id, query);
    if results.is_empty() {
        println!("No matching products.");
        return;
    }
    for r in &results {
        println!("[score {}]", r.match_score);
        print_product(
            &r.product.name,
            &r.product.brand,
            &r.product.raw_effects,
            &r.product.price,
            &r.product.product_url,
        );
    }
}

fn print_product(name: &str, brand: &str, effects: &str, price: &str, url: &str) {
    println!("{name} by {brand}");
    println!("  effects: {effects}");
    println!("  price:   {price}");
    if !url.is_empty() {
        println!("  link:    {url}");
    }
    println!();
}
