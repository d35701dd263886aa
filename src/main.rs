mod config;
mod convert;
mod display;
mod error;
mod pgm;
mod raster;
mod selftest;
mod sketch;
mod viewer;

use std::path::Path;
use std::process::ExitCode;

use config::CanvasConfig;
use convert::{is_pgm, is_sk, pgm_to_sk, sk_to_pgm};
use error::SketchError;

fn print_usage() {
    println!("Usage: sketchpad [OPTIONS] <file.pgm|file.sk>");
    println!();
    println!("Converts .pgm images to .sk sketches and back, writing the");
    println!("result next to the input. With no arguments, runs the built-in");
    println!("self-test.");
    println!();
    println!("Options:");
    println!("  --view, -v   Open a .sk file in a window instead of converting");
    println!("  --help       Show this help message");
}

/// Parsed command line: flags in any position, at most one positional
/// filename.
struct Args {
    view: bool,
    file: Option<String>,
    extra: bool,
}

fn parse_args() -> Args {
    let mut parsed = Args {
        view: false,
        file: None,
        extra: false,
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--view" | "-v" => parsed.view = true,
            "--help" => {
                print_usage();
                std::process::exit(0);
            },
            _ => {
                if parsed.file.is_none() {
                    parsed.file = Some(arg);
                } else {
                    parsed.extra = true;
                }
            },
        }
    }

    parsed
}

fn load_canvas_config() -> CanvasConfig {
    match CanvasConfig::load("canvas.json") {
        Ok(config) => {
            log::info!(
                "canvas.json: {}x{}, background {}",
                config.width,
                config.height,
                config.background
            );
            config
        },
        Err(e) => {
            log::debug!("no canvas.json ({}), using 200x200", e);
            CanvasConfig::default()
        },
    }
}

fn dispatch(name: &str, view: bool) -> Result<(), SketchError> {
    let path = Path::new(name);

    if view {
        if !is_sk(name) {
            return Err(SketchError::UnsupportedExtension(name.into()));
        }
        println!("=== sketchpad viewer ===");
        println!("Controls:");
        println!("  Escape - Quit");
        return viewer::view(path, &load_canvas_config());
    }

    if is_pgm(name) {
        let out = pgm_to_sk(path)?;
        println!("File converted: {}", out.display());
    } else if is_sk(name) {
        let out = sk_to_pgm(path, &load_canvas_config())?;
        println!("File converted: {}", out.display());
        println!("Note: only one grayscale channel of the sketch color register is used.");
        println!("Note: show/pause/frame commands are ignored during conversion.");
    } else {
        return Err(SketchError::UnsupportedExtension(name.into()));
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = parse_args();
    if args.extra {
        eprintln!("Error: expected exactly one filename");
        print_usage();
        return ExitCode::FAILURE;
    }

    let Some(name) = args.file else {
        if args.view {
            eprintln!("Error: --view needs a .sk file");
            return ExitCode::FAILURE;
        }
        // Zero arguments: self-test, like the original converter
        return match selftest::run() {
            Ok(()) => {
                println!("All tests passed.");
                ExitCode::SUCCESS
            },
            Err(what) => {
                println!("Self-test assertion failed: {}.", what);
                ExitCode::FAILURE
            },
        };
    };

    match dispatch(&name, args.view) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
