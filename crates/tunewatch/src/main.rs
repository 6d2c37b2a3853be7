use tunewatch_core::init_logging;

mod app;
mod commands;
mod discord;
mod shutdown;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    let verbose = matches.get_flag("verbose");
    let json_logs = matches
        .subcommand_matches("run")
        .is_some_and(|m| m.get_flag("json-logs"));

    // `run` is a long-lived service: it logs at info unless asked otherwise.
    // The one-shot commands stay quiet so their output is just the answer.
    let quiet = !verbose && matches.subcommand_name() != Some("run");
    init_logging(quiet, json_logs);

    if let Err(e) = commands::run_command(&matches) {
        // Error already printed to user via eprintln! in command handlers.
        drop(e);
        std::process::exit(1);
    }
}
