use clap::ArgMatches;
use tracing::info;

mod catalogue;
mod helpers;
mod json_types;
mod run;
mod stats;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        event = "cli.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );

    match matches.subcommand() {
        Some(("run", sub_matches)) => run::handle_run_command(sub_matches),
        Some(("stats", sub_matches)) => stats::handle_stats_command(sub_matches),
        Some(("catalogue", sub_matches)) => catalogue::handle_catalogue_command(sub_matches),
        _ => {
            // clap enforces a subcommand, so this only fires on a new
            // command that was registered but not wired up here
            Err("Unknown command".into())
        }
    }
}
