use std::env;
use std::process::ExitCode;

use anyhow::Result;
use routecast::{
    ClickEvent, ClickOutcome, PageController, PanelKind, ResultItem, RoutecastConfig,
    SearchApiClient, Trigger,
};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("routecast - directions and forecasts for nearby places");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  routecast directions <place-id> <origin-address>");
    eprintln!("  routecast forecast <lat,lon>");
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = RoutecastConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Each CLI invocation is one simulated click on a result item.
    let (event, origin_address) = match args.first().map(String::as_str) {
        Some("directions") if args.len() == 3 => (
            ClickEvent {
                trigger: Trigger::Directions,
                item: ResultItem {
                    place_id: Some(args[1].clone()),
                    coords: None,
                },
            },
            args[2].clone(),
        ),
        Some("forecast") if args.len() == 2 => (
            ClickEvent {
                trigger: Trigger::Forecast,
                item: ResultItem {
                    place_id: None,
                    coords: Some(args[1].clone()),
                },
            },
            String::new(),
        ),
        _ => {
            print_usage();
            return Ok(ExitCode::from(2));
        }
    };

    let client = SearchApiClient::new(&config)?;
    let mut controller = PageController::new(client, origin_address);

    let outcome = controller.handle_click(event).await;
    tracing::debug!("Click outcome: {:?}", outcome);

    match outcome {
        ClickOutcome::Rendered(kind) | ClickOutcome::Failed(kind) => {
            let panel = match kind {
                PanelKind::Directions => controller.directions_panel(),
                PanelKind::Forecast => controller.forecast_panel(),
            };
            print!("{}", panel.to_text());

            if panel.error().is_some() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        ClickOutcome::Stale(_) | ClickOutcome::Ignored => {
            print_usage();
            Ok(ExitCode::from(2))
        }
    }
}
