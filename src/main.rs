use clap::Parser;

use early_retire::cli::{Cli, run};

fn main() {
    let cli = Cli::parse();
    early_retire::logging::init(&cli.log_level);
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
