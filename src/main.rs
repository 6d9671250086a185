mod app;

use std::process;

fn main() {
    if let Err(err) = app::run() {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
