use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;
use tracing_subscriber::EnvFilter;

use journey_link::config::AppConfig;
use journey_link::console::{self, Command};
use journey_link::navigation::{
    DeepLinkBuilder, Field, NavigationForm, SessionContext, SessionError,
};
use journey_link::search::SearchDebouncer;
use journey_link::stopfinder::{MockStopFinder, StopFinder, StopFinderClient};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match config.mock_stops_dir.clone() {
        Some(dir) => match MockStopFinder::from_dir(&dir) {
            Ok(finder) => {
                println!(
                    "Using {} mock stop responses from {}",
                    finder.known_queries().len(),
                    dir.display()
                );
                run(finder, config).await
            }
            Err(e) => {
                eprintln!("Failed to load mock stops: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => match StopFinderClient::new(config.stop_finder.clone()) {
            Ok(finder) => run(finder, config).await,
            Err(e) => {
                eprintln!("Failed to create stop finder client: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Resolve the destination, then serve commands from stdin until EOF or `quit`.
async fn run<F: StopFinder + 'static>(finder: F, config: AppConfig) -> Result<(), SessionError> {
    let finder = Arc::new(finder);

    // Fail fast: without a destination no link can be built.
    println!("Resolving destination {:?}...", config.destination_address);
    let session = SessionContext::initialize(finder.as_ref(), &config.destination_address).await?;

    let search = SearchDebouncer::new(finder, config.quiet_period);
    let links = DeepLinkBuilder::new(config.deep_link);
    let mut form = NavigationForm::new(Arc::new(session), search, links);
    println!("Destination: {}", form.session().destination());

    let mut updates = form.candidates();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let text = console::render_candidates(&updates.borrow_and_update());
            if !text.is_empty() {
                println!("{}", text);
            }
        }
    });

    println!();
    println!("{}", console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let command = match console::parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Address(text) => {
                form.input_address(text);
                print_field_error(&form, Field::FromAddress);
            }
            Command::Pick(n) => match form.select_candidate(n - 1) {
                Some(stop) => println!("Selected {}", stop),
                None => println!("No candidate {}", n),
            },
            Command::Date(date) => {
                form.set_date(date);
                print_field_error(&form, Field::Date);
            }
            Command::Time(time) => {
                form.set_time(time);
                print_field_error(&form, Field::Time);
            }
            Command::Go => match form.submit() {
                Ok(link) => println!("{}", link),
                Err(result) => {
                    println!("{}", result.first_error);
                    println!("{}", console::render_errors(&result));
                }
            },
            Command::Show => println!("{}", console::render_form(form.state())),
            Command::Help => println!("{}", console::HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn print_field_error<F: StopFinder + 'static>(form: &NavigationForm<F>, field: Field) {
    if let Some(message) = form.field_error(field) {
        println!("  {}", message);
    }
}
