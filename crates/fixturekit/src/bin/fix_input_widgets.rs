//! Removes the configured parameter (default `value`) from widget
//! declarations under `lib/`, editing files in place.

use std::path::PathBuf;

use fixturekit::config::load_default_config;
use fixturekit::error::FixtureError;
use fixturekit::strip::WidgetStripper;
use fixturekit::{logging, report};

fn main() {
    logging::init();

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match load_default_config(&root) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", report::failure_line("loading configuration", &FixtureError::from(e)));
            return;
        }
    };
    let parameter = config.stripper.parameter.as_str();

    // each file's lines are printed as soon as it is processed
    let summary = WidgetStripper::from_config(&config.stripper).and_then(|stripper| {
        stripper.run_with(&root, &config.stripper, |entry| {
            for line in report::strip_entry_lines(entry, &root, parameter) {
                println!("{}", line);
            }
        })
    });

    match summary {
        Ok(summary) => println!("{}", report::strip_total_line(&summary)),
        Err(e) => {
            println!("Error: {}", e);
            println!("Fixed 0 files");
        }
    }
}
