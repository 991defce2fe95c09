use std::path::PathBuf;

use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "soil-monitor", author, about)]
pub struct Opts {
    /// Show only warnings and errors
    #[structopt(short = "s", long = "silent", conflicts_with = "verbose")]
    pub silent: bool,

    /// Show all log messages
    #[structopt(short = "v", long = "verbose", conflicts_with = "silent")]
    pub verbose: bool,

    /// Suppress timestamps in logs, useful with journald
    #[structopt(long = "suppress-log-timestamps")]
    pub suppress_log_timestamps: bool,

    /// Setting files
    #[structopt(
        parse(from_os_str),
        env = "SOIL_MONITOR_SETTINGS",
        default_value = "soil-monitor.toml"
    )]
    pub settings: Vec<PathBuf>,
}
