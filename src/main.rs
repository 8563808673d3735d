use anyhow::Result;
use clap::Parser;
use split_sky::{
    cli::Cli,
    logging::{self, LogSink},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let sink = match (&cli.log_file, cli.one_shot) {
        (Some(path), _) => LogSink::File(path),
        (None, true) => LogSink::Stderr,
        (None, false) => LogSink::Silent,
    };
    let _log_guard = logging::init(sink)?;

    if cli.one_shot {
        split_sky::run_one_shot(&cli).await
    } else {
        split_sky::run(cli).await
    }
}
