use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use transcache::cli::commands::{cache, detect, providers, translate};
use transcache::cli::{Args, Command};
use transcache::error::TranslateError;
use transcache::translation::{print_languages, validate_target};
use transcache::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", Style::error("Error:"));
        std::process::exit(exit_code(&e));
    }
}

/// Logs go to stderr so stdout stays pipeable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "transcache=debug"
    } else {
        "transcache=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Detect { file }) => {
            detect::run_detect(file.as_deref()).await?;
        }
        Some(Command::Providers) => {
            providers::print_providers()?;
        }
        Some(Command::Cache { command }) => {
            cache::run_cache(command).await?;
        }
        None => {
            if let Some(ref lang) = args.to {
                validate_target(lang)?;
            }

            let options = translate::TranslateOptions {
                file: args.file,
                to: args.to,
                from: args.from,
                no_cache: args.no_cache,
                json: args.json,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> exitcode::ExitCode {
    match error.downcast_ref::<TranslateError>() {
        Some(TranslateError::InvalidInput | TranslateError::UnsupportedLanguage(_)) => {
            exitcode::USAGE
        }
        Some(TranslateError::AllProvidersFailed(_)) => exitcode::UNAVAILABLE,
        None => exitcode::SOFTWARE,
    }
}
