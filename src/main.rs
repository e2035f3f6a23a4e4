//! CLI entry point for the element searcher.
//!
//! Runs a search against a recorded surface and prints the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Is there an "OK" button anywhere on the recorded surface?
//! element-search --surface screen.json --button OK
//!
//! # Are there at least three "Item" texts on the first page?
//! element-search --surface screen.json --text Item --matches 3 --no-scroll
//!
//! # Use custom timings
//! element-search --surface screen.json --edit-text "Name" --config search.toml
//!
//! # Show the timings a search would use
//! element-search --print-config --config search.toml
//! ```

use std::env;
use std::path::PathBuf;
use std::process;

use element_searcher::{
    ElementCategory, ElementSearcher, ReplaySurface, SearchConfig, SearchRequest,
};

/// A fully parsed search invocation
#[derive(Debug, Clone, PartialEq)]
struct SearchArgs {
    surface: PathBuf,
    category: ElementCategory,
    pattern: String,
    matches: usize,
    allow_scroll: bool,
    config: Option<PathBuf>,
}

/// CLI command to execute
#[derive(Debug, Clone, PartialEq)]
enum Command {
    /// Search a recorded surface
    Search(SearchArgs),
    /// Print the effective configuration as TOML
    PrintConfig { config: Option<PathBuf> },
    /// Show help message
    Help,
}

/// Parse command line arguments (without the program name)
fn parse_args(args: &[String]) -> Result<Command, String> {
    if args.is_empty() {
        return Ok(Command::Help);
    }

    let mut surface = None;
    let mut target: Option<(ElementCategory, String)> = None;
    let mut matches = 0usize;
    let mut allow_scroll = true;
    let mut config = None;
    let mut print_config = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        match flag {
            "--help" | "-h" => return Ok(Command::Help),
            "--surface" | "-f" => {
                let value = iter
                    .next()
                    .ok_or("--surface requires a recording file (e.g., --surface screen.json)")?;
                surface = Some(PathBuf::from(value));
            }
            "--config" | "-c" => {
                let value = iter
                    .next()
                    .ok_or("--config requires a TOML file (e.g., --config search.toml)")?;
                config = Some(PathBuf::from(value));
            }
            "--matches" | "-m" => {
                let value = iter.next().ok_or("--matches requires a number")?;
                matches = value
                    .parse()
                    .map_err(|_| format!("Invalid match count: {}", value))?;
            }
            "--no-scroll" => allow_scroll = false,
            "--print-config" => print_config = true,
            "--text" | "--edit-text" | "--button" | "--toggle-button" => {
                if target.is_some() {
                    return Err(
                        "Only one of --text, --edit-text, --button, --toggle-button may be given"
                            .into(),
                    );
                }
                let category = category_from_flag(flag)
                    .ok_or_else(|| format!("Unknown target: {}", flag))?;
                let pattern = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a pattern argument", flag))?;
                target = Some((category, pattern.clone()));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    if print_config {
        return Ok(Command::PrintConfig { config });
    }

    let surface = surface.ok_or("--surface is required")?;
    let (category, pattern) =
        target.ok_or("One of --text, --edit-text, --button, --toggle-button is required")?;

    if !allow_scroll && category != ElementCategory::Text {
        return Err("--no-scroll is only supported with --text".into());
    }

    Ok(Command::Search(SearchArgs {
        surface,
        category,
        pattern,
        matches,
        allow_scroll,
        config,
    }))
}

/// Map a target flag such as `--edit-text` to its category.
fn category_from_flag(flag: &str) -> Option<ElementCategory> {
    let name = flag.strip_prefix("--")?.replace('-', "_");
    ElementCategory::from_name(&name)
}

/// Print help message to stdout
fn print_help() {
    println!("element-search - Search a recorded UI surface for matching elements");
    println!();
    println!("USAGE:");
    println!("    element-search --surface <FILE> <TARGET> <PATTERN> [OPTIONS]");
    println!();
    println!("TARGETS:");
    println!("        --text <PATTERN>           Search all text elements");
    println!("        --edit-text <PATTERN>      Search edit fields (first match wins)");
    println!("        --button <PATTERN>         Search buttons");
    println!("        --toggle-button <PATTERN>  Search toggle buttons");
    println!();
    println!("OPTIONS:");
    println!("    -f, --surface <FILE>    Recorded surface (JSON)");
    println!("    -m, --matches <N>       Required number of matches (0 means at least one)");
    println!("        --no-scroll         Do not scroll (only with --text)");
    println!("    -c, --config <FILE>     Search timings (TOML)");
    println!("        --print-config      Print the effective timings as TOML and exit");
    println!("    -h, --help              Print this help message");
    println!();
    println!("OUTPUT:");
    println!("    The result is printed as JSON to stdout.");
    println!("    Errors are written to stderr.");
}

/// Load the config file if one was given, otherwise the defaults
fn load_config(path: Option<&PathBuf>) -> Result<SearchConfig, String> {
    match path {
        Some(path) => SearchConfig::load_from_path(path)
            .map_err(|e| format!("failed to load config {:?}: {}", path, e)),
        None => Ok(SearchConfig::default()),
    }
}

/// Handle a print-config command
fn handle_print_config(path: Option<&PathBuf>) -> i32 {
    let rendered = load_config(path).and_then(|config| {
        config
            .to_toml_string()
            .map_err(|e| format!("failed to render config: {}", e))
    });
    match rendered {
        Ok(toml) => {
            print!("{}", toml);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Handle a search command
fn handle_search(args: &SearchArgs) -> i32 {
    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let surface = match ReplaySurface::load_from_path(&args.surface) {
        Ok(surface) => surface,
        Err(e) => {
            eprintln!("Error: failed to load surface {:?}: {}", args.surface, e);
            return 1;
        }
    };

    let searcher = ElementSearcher::new(&surface, &surface, &surface).with_config(config);
    let request = SearchRequest::new(args.pattern.as_str())
        .with_matches(args.matches)
        .with_scroll(args.allow_scroll);

    match searcher.search(args.category, &request) {
        Ok(found) => {
            let output = serde_json::json!({
                "found": found,
                "category": args.category,
                "pattern": args.pattern,
            });
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    env_logger::init();

    log::debug!("element-search starting");

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information.");
            process::exit(1);
        }
    };

    log::debug!("Executing command: {:?}", command);

    let exit_code = match command {
        Command::Search(search) => handle_search(&search),
        Command::PrintConfig { config } => handle_print_config(config.as_ref()),
        Command::Help => {
            print_help();
            0
        }
    };

    log::debug!("Exiting with code: {}", exit_code);

    process::exit(exit_code);
}
