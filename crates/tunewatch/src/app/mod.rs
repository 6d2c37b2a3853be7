mod global;
mod query;
mod watch;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(watch::run_command())
        .subcommand(query::stats_command())
        .subcommand(query::catalogue_command())
}
