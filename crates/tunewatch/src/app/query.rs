use clap::{Arg, ArgAction, Command};

pub fn stats_command() -> Command {
    Command::new("stats")
        .about("Show the incident counter and per-artist detection statistics")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Extra config file, applied on top of ~/.tunewatch/config.toml")
                .value_name("PATH")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .short('n')
                .help("Only show the N most detected artists")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
}

pub fn catalogue_command() -> Command {
    Command::new("catalogue")
        .about("Fetch the catalogue once and report its size")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Extra config file, applied on top of ~/.tunewatch/config.toml")
                .value_name("PATH")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("lookup")
                .long("lookup")
                .help("Look up one artist name (exact match)")
                .value_name("NAME"),
        )
}
