mod attendees;
mod cli;
mod client;
mod error;
mod events;
mod output;
mod pager;
mod roster;
mod timezone;

use clap::Parser;
use cli::Command;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    // Shared cancellation token + signal handlers.
    let cancel = setup_signal_handlers();

    // Display timezone: explicit flag, else the system zone.
    let tz = match &cli.timezone {
        Some(name) => match timezone::parse_timezone(name) {
            Ok(tz) => tz,
            Err(e) => {
                tracing::error!(error = %e, "unrecognized timezone");
                std::process::exit(2);
            }
        },
        None => timezone::resolve_local_timezone(),
    };

    let api = client::connect(cli.api_url.as_deref());

    let result = match cli.command {
        Command::Events => events::list(&api, tz).await,
        Command::Show(args) => events::show(&api, args.event_id, tz).await,
        Command::Create(args) => events::create(&api, &args, tz).await,
        Command::Update(args) => events::update(&api, &args, tz).await,
        Command::Cancel(args) => events::cancel(&api, args.event_id).await,
        Command::Attendees(args) => attendees::list(&api, &args, tz).await,
        Command::Register(args) => attendees::register(&api, &args).await,
        Command::Unregister(args) => attendees::unregister(&api, args.event_id, args.attendee_id).await,
        Command::Timezones => {
            output::print_timezones();
            Ok(())
        }
        Command::Roster(args) => {
            roster::run_roster(api, args.event_id, args.page_size, args.threshold, tz, cancel).await
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            let mut sig = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");
            sig.recv().await;
            info!("received SIGTERM, shutting down");
            cancel_clone.cancel();
        });
    }

    cancel
}
