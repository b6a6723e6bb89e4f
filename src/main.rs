use std::env;
use std::process;

use popdash::cli;

fn main() {
    cli::init_logging();
    let args: Vec<String> = env::args().collect();
    process::exit(cli::run_with_args(&args));
}
