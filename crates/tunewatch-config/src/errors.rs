#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error(
        "No Discord token configured. Set TUNEWATCH_DISCORD_TOKEN or [discord] token in ~/.tunewatch/config.toml"
    )]
    MissingToken,

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}
