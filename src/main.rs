use clap::Parser;
use micac::{cli::Cli, driver, errors::Diagnostic};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = driver::run_compiler(&cli) {
        // Diagnostics render their own multi-line snippet.
        match err.downcast_ref::<Diagnostic>() {
            Some(diagnostic) => eprint!("{diagnostic}"),
            None => eprintln!("{err:#}"),
        }
        std::process::exit(1);
    }
}
