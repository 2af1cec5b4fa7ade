mod cli;
mod commands;
mod target;

use app::{AppBuilder, Application};
use clap::Parser;
use color_eyre::Result;

use crate::cli::Cli;
use crate::commands::Services;

struct Onboard;

impl Application for Onboard {
    const APP_ID: &'static str = "onboard";
}

#[tokio::main]
pub async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let version = env!("CARGO_PKG_VERSION");
    let builder = match args.data_dir.clone() {
        Some(base) => AppBuilder::<Onboard>::with_base_path(base, version)?,
        None => AppBuilder::<Onboard>::new(version)?,
    };
    let ctx = builder.build();
    let services = Services::from_context(&ctx)?;

    commands::run(args.cmd, &services).await
}
