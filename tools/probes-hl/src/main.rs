//! Probes highlighter CLI
//!
//! Dumps the styled runs of an Nmap service probe file, lints it, and lists
//! the lexer's styles.

mod commands;
mod config;
mod logging;

use commands::{check_file, list_styles, print_runs, CliError};
use config::HighlightConfig;

fn main() {
    logging::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "runs" => with_file(
            &args[2..],
            "Usage: probes-hl runs <file> [options]",
            print_runs,
        ),
        "check" => with_file(
            &args[2..],
            "Usage: probes-hl check <file> [options]",
            |path, config| {
                if !check_file(path, config)? {
                    std::process::exit(1);
                }
                Ok(())
            },
        ),
        "styles" => {
            list_styles();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("probes-hl {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Parse the options of a file command and run it.
fn with_file(
    args: &[String],
    usage: &str,
    run: impl FnOnce(&str, &HighlightConfig) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let (config, path) = HighlightConfig::parse_options(args)?;
    let Some(path) = path else {
        eprintln!("error: missing file path");
        eprintln!("{usage}");
        std::process::exit(1);
    };
    run(&path, &config)
}

fn print_usage() {
    println!("Nmap service probes highlighter");
    println!();
    println!("Usage: probes-hl <command> [options]");
    println!();
    println!("Commands:");
    println!("  runs <file>          Print every styled run");
    println!("  check <file>         Report malformed spans (exit 1 if any)");
    println!("  styles               List style ids, names and default colours");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --chunk-lines=<n>    Lex <n> lines per call, resuming between calls");
    println!("  --strict-values      Flag directive values not starting with a digit");
    println!("  --any-template-key   Accept any key as the first match template");
    println!();
    println!("Set RUST_LOG=probes_lexer=debug to trace lexer calls.");
    println!();
    println!("Examples:");
    println!("  probes-hl runs nmap-service-probes");
    println!("  probes-hl runs nmap-service-probes --chunk-lines=50");
    println!("  probes-hl check nmap-service-probes --strict-values");
}
