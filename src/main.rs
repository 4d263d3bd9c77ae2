// src/main.rs — prompt-enhancer entry point

use clap::Parser;

use prompt_enhancer::cli::dry_run::run_dry_run;
use prompt_enhancer::cli::run::run_enhance;
use prompt_enhancer::cli::signal::{interrupted, EXIT_INTERRUPTED};
use prompt_enhancer::cli::Cli;
use prompt_enhancer::infra::config::Config;
use prompt_enhancer::infra::errors::EnhancerError;
use prompt_enhancer::infra::logger;

#[tokio::main]
async fn main() {
    // A missing .env is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tokio::select! {
        result = run(&cli) => {
            if let Err(e) = result {
                report_error(&e);
                std::process::exit(1);
            }
        }
        _ = interrupted(tokio::signal::ctrl_c()) => {
            eprintln!("\nInterrupted by user. Exiting...");
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    logger::init_logging(cli.verbose, config.logging.file_path().as_deref());
    tracing::debug!(
        target_model = %cli.target_model(&config),
        enhancement_model = %cli.enhancement_model(&config),
        token_limit = cli.token_limit,
        "starting"
    );

    if cli.dry_run {
        run_dry_run(cli, &config).await
    } else {
        run_enhance(cli, &config).await
    }
}

fn report_error(e: &anyhow::Error) {
    eprintln!("error: {e}");
    if matches!(
        e.downcast_ref::<EnhancerError>(),
        Some(EnhancerError::MissingApiKey)
    ) {
        eprintln!();
        eprintln!("Set your API key using one of these methods:");
        eprintln!("  1. Environment variable: export ANTHROPIC_API_KEY='your-key'");
        eprintln!("  2. .env file: ANTHROPIC_API_KEY=your-key");
        eprintln!("  3. Command line: --api-key your-key");
    }
    tracing::error!("{e:#}");
}
