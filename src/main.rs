use clap::Parser;
use job_scout::Scout;
use job_scout::config::ScoutConfig;
use std::process::ExitCode;

mod args;
use args::{Args, convert_format, convert_source};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    ::log::info!("Scouting job posting at: {}", args.source);

    // File values first, then environment, then CLI flags
    let config = match &args.config {
        Some(path) => match ScoutConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ScoutConfig::default(),
    };
    let mut config = config
        .apply_env()
        .apply_overrides(args.backend_url.clone(), args.webdriver_url.clone());
    if let Some(format) = args.format {
        config.format = convert_format(format);
    }

    let source = convert_source(args.type_, &args.source);
    if let job_scout::PageSource::Web(_) = &source {
        eprintln!("Note: reading live pages requires a WebDriver server (e.g., ChromeDriver).");
        eprintln!(
            "Set WEBDRIVER_URL or --webdriver-url if not using the default {}",
            config.webdriver_url
        );
    }

    let start_time = std::time::Instant::now();
    match Scout::new(source).with_config(config).run().await {
        Ok(output) => {
            println!("{}", output);
            ::log::info!(
                "Finished in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to start: {}", e);
            ExitCode::FAILURE
        }
    }
}
