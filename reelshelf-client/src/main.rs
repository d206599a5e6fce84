use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;

use reelshelf_client::app::{self, Cli};

fn init_logger(quiet: bool) {
    let own_level = if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("reelshelf_client", own_level)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        init_logger(cli.quiet);
    } else {
        env_logger::init();
    }

    app::run(cli).await
}
