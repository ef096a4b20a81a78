//! IMDB Plex Sync - IMDB list to Plex collection importer
//!
//! Imports an exported IMDB list into a Plex movie collection and writes a
//! CSV report of what was added, skipped, missing or ambiguous.

use clap::Parser;
use imdb_plex_sync::matching::options::{
    DEFAULT_MARGIN, DEFAULT_MAX_YEAR_DRIFT, DEFAULT_THRESHOLD, DEFAULT_YEAR_WEIGHT,
};
use imdb_plex_sync::report::default_report_path;
use imdb_plex_sync::{
    read_imdb_csv, run_import, write_report_csv, ImportRequest, MatchOptions, PlexClient,
    ServerConfig,
};
use std::path::PathBuf;

/// Import an IMDB list export into a Plex collection
#[derive(Parser, Debug)]
#[command(name = "imdb_plex_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Plex server URL (default: saved value or http://127.0.0.1:32400)
    #[arg(short, long)]
    url: Option<String>,

    /// Plex authentication token
    #[arg(short, long)]
    token: Option<String>,

    /// Plex movie library name (default: saved value or Movies)
    #[arg(short, long)]
    library: Option<String>,

    /// Path to the IMDB list CSV export
    #[arg(short, long, required_unless_present_any = ["instructions", "list_collections"])]
    csv: Option<PathBuf>,

    /// Name of the collection to create or update
    #[arg(short, long, required_unless_present_any = ["instructions", "list_collections"])]
    name: Option<String>,

    /// Minimum similarity score for a match (0..=1)
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Required lead of the best candidate over the runner-up
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    margin: f64,

    /// Share of the score decided by an exact release-year match (0 disables)
    #[arg(long, default_value_t = DEFAULT_YEAR_WEIGHT)]
    year_weight: f64,

    /// Ignore library entries whose year differs by more than this
    #[arg(long, default_value_t = DEFAULT_MAX_YEAR_DRIFT)]
    max_year_drift: u32,

    /// Do not exclude candidates by release year
    #[arg(long, default_value_t = false)]
    no_year_guard: bool,

    /// Show what would be added without changing the collection
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Report file (default: plex_collection_report_<name>_<timestamp>.csv)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Config file with saved server settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save URL, token and library after a successful import
    #[arg(long, default_value_t = false)]
    save_config: bool,

    /// List the collections of the library and exit
    #[arg(long, default_value_t = false)]
    list_collections: bool,

    /// Display setup instructions and exit
    #[arg(short, long, default_value_t = false)]
    instructions: bool,
}

impl Args {
    fn match_options(&self) -> MatchOptions {
        MatchOptions {
            threshold: self.threshold,
            margin: self.margin,
            year_weight: self.year_weight,
            max_year_drift: (!self.no_year_guard).then_some(self.max_year_drift),
            ..MatchOptions::default()
        }
    }
}

fn print_instructions() {
    println!("=== Instructions ===");
    println!("1. Open an IMDB list and export it as .CSV (list menu -> Export)");
    println!("2. Rename the exported file to something memorable");
    println!("3. Get your Plex token: https://support.plex.tv/articles/204059436-finding-an-authentication-token-x-plex-token/");
    println!("4. Run: imdb_plex_sync --token <TOKEN> --csv <FILE> --name <COLLECTION>");
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.instructions {
        print_instructions();
        return;
    }

    let config_path = args.config.clone().unwrap_or_else(ServerConfig::default_path);
    let saved = match ServerConfig::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
            ServerConfig::default()
        }
    };
    let config = saved.merge(args.url.clone(), args.token.clone(), args.library.clone());
    if let Err(e) = config.validate() {
        log::error!("{}", e);
        print_instructions();
        std::process::exit(1);
    }

    let client = PlexClient::from_config(&config);

    if args.list_collections {
        list_collections(&client, &config.library).await;
        return;
    }

    let options = args.match_options();
    if let Err(e) = options.validate() {
        log::error!("Invalid matching options: {}", e);
        std::process::exit(1);
    }

    let (Some(csv_path), Some(collection)) = (args.csv.clone(), args.name.clone()) else {
        log::error!("--csv and --name are required");
        std::process::exit(1);
    };

    let list = match read_imdb_csv(&csv_path) {
        Ok(list) => list,
        Err(e) => {
            log::error!("Error reading CSV file: {}", e);
            std::process::exit(1);
        }
    };

    let request = ImportRequest {
        library: config.library.clone(),
        collection: collection.clone(),
        options,
        dry_run: args.dry_run,
    };

    let report = match run_import(&client, &list, &request).await {
        Ok(report) => report,
        Err(e) => {
            log::error!("Import failed: {}", e);
            std::process::exit(1);
        }
    };

    if args.save_config {
        match config.save_to(&config_path) {
            Ok(()) => log::info!("Saved server settings to {}", config_path.display()),
            Err(e) => log::warn!("Failed to save config: {}", e),
        }
    }

    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| default_report_path(&collection, &chrono::Local::now()));
    let report_written = write_report_csv(&report_path, &report.rows);

    println!("{}", report.summary);
    if let Err(e) = report_written {
        log::error!("Failed to write report {}: {}", report_path.display(), e);
        std::process::exit(1);
    }
    if report.summary.ambiguous > 0 {
        println!(
            "{} ambiguous titles need manual resolution, see {}",
            report.summary.ambiguous,
            report_path.display()
        );
    }
}

/// Prints the collections of a library section
async fn list_collections(client: &PlexClient, library: &str) {
    let section = match client.find_section(library).await {
        Ok(section) => section,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    match client.collections(&section).await {
        Ok(collections) if collections.is_empty() => {
            println!("Library '{}' has no collections", section.title);
        }
        Ok(collections) => {
            println!("Collections in '{}':", section.title);
            for (i, collection) in collections.iter().enumerate() {
                println!("{}. {}", i + 1, collection.title);
            }
        }
        Err(e) => {
            log::error!("Error retrieving collections: {}", e);
            std::process::exit(1);
        }
    }
}
