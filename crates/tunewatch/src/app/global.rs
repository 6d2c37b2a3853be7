use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("tunewatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Warn Discord listeners when the artist they are playing is on the Soul Over AI index")
        .long_about("tunewatch watches the presences of every guild the bot shares with a user. When someone listens to an artist listed in the Soul Over AI catalogue, it sends them one direct message per artist and keeps running detection statistics on disk.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
