//! Sample games for the turtle engine.
//!
//! `turtle-demo` runs the physics sandbox; `turtle-demo turtle` runs the
//! floating-turtle sample (expects `assets/turtle.png` and `assets/hearth.png`).

mod floating;
mod sandbox;

use turtle_engine::logging::{init_logging, LoggingConfig};
use turtle_engine::Runtime;

fn main() {
    init_logging(LoggingConfig::default());

    let sample = std::env::args().nth(1).unwrap_or_default();
    let result = match sample.as_str() {
        "turtle" => Runtime::run(floating::FloatingTurtle::default()),
        _ => Runtime::run(sandbox::Sandbox::default()),
    };

    match result {
        Ok(report) => {
            log::info!("exited cleanly: {report:?}");
            std::process::exit(report.exit_code);
        }
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    }
}
