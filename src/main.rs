//! inikit - configuration document inspector and converter

use clap::Parser;
use inikit::{app::App, cli::Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    let use_color = !cli.no_color;

    let app = App::new(cli);
    if let Err(error) = app.run() {
        eprintln!("{}", error.format_for_console(use_color));
        process::exit(error.exit_code());
    }
}
