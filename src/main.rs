use anyhow::Result;
use clap::Parser;
use jclec::cli::{Cli, Commands};
use jclec::config::Settings;
use jclec::dataset;
use jclec::report::Reporter;
use jclec::resolver::ArtifactResolver;
use jclec::search::SearchClient;
use jclec::transport::{HttpTransport, Transport};
use jclec::verifier::ArtifactVerifier;
use log::{error, info};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let settings = Settings::from_cli(cli)?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);

    let resolver = ArtifactResolver::new(
        settings.local_repository.clone(),
        settings.remotes.clone(),
        Arc::clone(&transport),
    )
    .offline(settings.offline);
    info!(
        "Local repository: {}",
        resolver.local_repository().display()
    );
    let verifier = ArtifactVerifier::new(resolver);
    let search = SearchClient::new(transport)
        .endpoint(settings.search_url.clone())
        .offline(settings.offline);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command_or_default() {
        Commands::Check { dataset } => {
            info!("Starting vulnerability verification");
            let loaded = match dataset {
                Some(path) => dataset::load_from_path(&path),
                None => dataset::load_bundled(),
            };
            let components = match loaded {
                Ok(components) => components,
                Err(e) => {
                    error!("Error: {e}");
                    return Ok(ExitCode::SUCCESS);
                }
            };
            Reporter::new(&verifier, &search).run(&components, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify {
            coordinates,
            class_name,
        } => {
            let outcome = verifier.verify_class_in_artifact(&coordinates, &class_name);
            writeln!(out, "{class_name} in {coordinates}: {outcome}")?;
            Ok(if outcome.is_found() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Search { class_name, rows } => {
            for artifact in search.rows(rows).search_for_class(&class_name) {
                writeln!(out, "{artifact}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
