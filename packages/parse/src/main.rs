#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the rent-stabilization dataset pipeline.
//!
//! Fixed-path batch tool: reads the two CSV extracts under `data/` and
//! regenerates every JSON artifact under `public/data/` and `src/data/`.
//! Takes no flags; rerunning is always safe (full overwrite).

use std::path::Path;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "stabmap_parse",
    about = "Rent-stabilization CSV to JSON dataset pipeline"
)]
struct Cli {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let Cli {} = Cli::parse();

    stabmap_parse::run(
        Path::new(stabmap_parse::PRIMARY_CSV_PATH),
        Path::new(stabmap_parse::V2_CSV_PATH),
        Path::new(stabmap_parse::PUBLIC_DATA_DIR),
        Path::new(stabmap_parse::SRC_DATA_DIR),
    )?;

    Ok(())
}
