use clap::{Arg, ArgAction, Command};

pub fn run_command() -> Command {
    Command::new("run")
        .about("Log in to Discord and watch presences until interrupted")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Extra config file, applied on top of ~/.tunewatch/config.toml")
                .value_name("PATH")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Emit logs as JSON lines")
                .action(ArgAction::SetTrue),
        )
}
