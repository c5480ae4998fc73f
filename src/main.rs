mod atlas;
mod commands;
mod data;
mod definition;
mod options;
mod sampling;
mod uv;

use std::process;

use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    env_logger::init();

    let options = Options::from_args();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:?}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> Result<(), anyhow::Error> {
    match options.command {
        Subcommand::Pack(pack_options) => commands::pack(pack_options)?,
        Subcommand::Fit(fit_options) => commands::fit(fit_options)?,
        Subcommand::Remap(remap_options) => commands::remap(remap_options)?,
    }

    Ok(())
}
