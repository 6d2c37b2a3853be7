use clap::ArgMatches;
use tracing::{error, info};

use tunewatch_core::notify::format_report_url;
use tunewatch_core::{CatalogueSource, HttpCatalogueSource, TunewatchError};

use super::helpers::{load_config, runtime};

pub(crate) fn handle_catalogue_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let lookup = matches.get_one::<String>("lookup");
    let config = load_config(matches)?;
    let url = config.catalogue.url();

    info!(event = "cli.catalogue_started", url = url, lookup = ?lookup);

    let source = HttpCatalogueSource::new(url, config.catalogue.fetch_timeout())?;
    let rt = runtime()?;

    let catalogue = match rt.block_on(source.fetch()) {
        Ok(catalogue) => catalogue,
        Err(e) => {
            eprintln!("Error: Could not fetch catalogue from {}: {}", url, e);
            error!(
                event = "cli.catalogue_failed",
                url = url,
                error = %e,
                error_code = e.error_code()
            );
            return Err(e.into());
        }
    };

    println!("{} entries in {}", catalogue.len(), url);

    if let Some(name) = lookup {
        match catalogue.lookup(name) {
            Some(entry) => {
                let report_url =
                    format_report_url(config.catalogue.report_url_template(), &entry.id);
                println!("'{}' is listed (id {})", entry.name, entry.id);
                println!("{}", report_url);
            }
            None => println!("'{}' is not listed", name),
        }
    }

    info!(
        event = "cli.catalogue_completed",
        entries = catalogue.len(),
        found = lookup.map(|name| catalogue.lookup(name).is_some())
    );
    Ok(())
}
