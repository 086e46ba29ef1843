use log::{error, info, warn};
use review_insight::config::{Config, load_config};
use review_insight::{analyze_review_file, version};
use std::path::Path;
use std::time::Instant;

fn main() {
    // Initialize logger
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        error!("Not enough arguments provided");
        eprintln!(
            "Usage: {} <input_file> [output_name] [num_threads] [config.yaml]",
            args[0]
        );
        eprintln!("Version: {}", version());
        std::process::exit(1);
    }

    let input_path = Path::new(&args[1]);
    let output_name = args.get(2).map(String::as_str);

    let num_threads = if args.len() >= 4 {
        args[3].parse().unwrap_or_else(|_| {
            let cpu_count = num_cpus::get();
            warn!(
                "Invalid thread count provided, defaulting to {} CPUs",
                cpu_count
            );
            cpu_count
        })
    } else {
        let cpu_count = num_cpus::get();
        info!("Using default thread count: {}", cpu_count);
        cpu_count
    };

    let config = if let Some(config_path) = args.get(4) {
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration {:?}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    info!("Review Insight v{}", version());
    info!("Input file: {:?}", input_path);
    info!("Using {} threads", num_threads);

    let start_time = Instant::now();

    match analyze_review_file(input_path, output_name, &config, num_threads) {
        Ok(paths) => {
            let elapsed = start_time.elapsed();
            info!("Analysis completed in {:.2?}", elapsed);
            info!("Text report: {:?}", paths.text);
            info!("Spreadsheet report: {:?}", paths.spreadsheet);
            info!("JSON export: {:?}", paths.json);
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    }
}
