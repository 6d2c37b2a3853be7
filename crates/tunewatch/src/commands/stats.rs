use clap::ArgMatches;
use tracing::info;

use tunewatch_core::{ArtistStat, LedgerStore, StatsLedger};

use super::helpers::load_config;
use super::json_types::{ArtistRow, StatsResponse};

pub(crate) fn handle_stats_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let top = matches.get_one::<usize>("top").copied();

    info!(
        event = "cli.stats_started",
        json_output = json_output,
        top = ?top
    );

    let config = load_config(matches)?;
    let store = LedgerStore::new(config.storage.data_dir());
    let ledger = store.load();

    let response = stats_response(&ledger, top);
    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_stats_table(&response);
    }

    info!(
        event = "cli.stats_completed",
        incidents = response.incidents,
        artists = response.tracked_artists
    );
    Ok(())
}

/// Most detected first, optionally cut to the top `limit`.
fn stats_response(ledger: &StatsLedger, limit: Option<usize>) -> StatsResponse<'_> {
    let ranked = ledger.ranked();
    let take = limit.unwrap_or(ranked.len());

    StatsResponse {
        incidents: ledger.incident_count(),
        tracked_artists: ranked.len(),
        artists: ranked
            .into_iter()
            .take(take)
            .map(|(name, stat): (&str, &ArtistStat)| ArtistRow {
                name,
                first_detected_at: stat.first_detected_at,
                total_detects: stat.total_detects,
            })
            .collect(),
    }
}

fn print_stats_table(response: &StatsResponse<'_>) {
    println!("Incidents reported: {}", response.incidents);
    println!("Artists detected:   {}", response.tracked_artists);

    if response.artists.is_empty() {
        return;
    }
    println!();

    // Minimum widths = header label lengths
    let mut name_w = "Artist".len();
    let mut detects_w = "Detects".len();
    let first_w = "YYYY-MM-DD HH:MM".len();

    for row in &response.artists {
        name_w = name_w.max(row.name.chars().count());
        detects_w = detects_w.max(row.total_detects.to_string().len());
    }

    println!(
        "{:<name_w$}  {:>detects_w$}  {:<first_w$}",
        "Artist", "Detects", "First detected"
    );
    println!(
        "{}  {}  {}",
        "-".repeat(name_w),
        "-".repeat(detects_w),
        "-".repeat(first_w)
    );
    for row in &response.artists {
        println!(
            "{:<name_w$}  {:>detects_w$}  {:<first_w$}",
            row.name,
            row.total_detects,
            row.first_detected_at.format("%Y-%m-%d %H:%M")
        );
    }
}
