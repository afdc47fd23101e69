//! Stepwise CLI
//!
//! Source-level stepping debugger for small scripts.

use stepwisec::commands::{
    ast_file, debug_example, debug_file, example_names, parse_debug_options, DebugOptions, Mode,
};

fn main() {
    stepwisec::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "step" | "run" => {
            let mode = if command == "step" { Mode::Step } else { Mode::Run };
            let (path, options) = options_or_exit(&args[2..]);
            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: stepwise {command} <file.js> [--break=<line>] [--json]");
                std::process::exit(1);
            };
            if mode == Mode::Run && options.breakpoint_line.is_some() {
                eprintln!("warning: `run` ignores --break; use `step` to stop at a line");
            }
            debug_file(&path, mode, &options);
        }
        "example" => {
            let mode = if args.iter().any(|a| a == "--step") {
                Mode::Step
            } else {
                Mode::Run
            };
            let rest: Vec<String> = args[2..]
                .iter()
                .filter(|a| *a != "--step")
                .cloned()
                .collect();
            let (name, options) = options_or_exit(&rest);
            let name = name.unwrap_or_else(|| "error".to_owned());
            debug_example(&name, mode, &options);
        }
        "examples" => {
            println!("{}", example_names());
        }
        "ast" => {
            if args.len() < 3 {
                eprintln!("Usage: stepwise ast <file.js>");
                std::process::exit(1);
            }
            ast_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Stepwise {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn options_or_exit(args: &[String]) -> (Option<String>, DebugOptions) {
    match parse_debug_options(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Stepwise - source-level stepping debugger");
    println!();
    println!("Usage: stepwise <command> [options]");
    println!();
    println!("Commands:");
    println!("  step <file.js>       Interpret directly, stopping at the breakpoint");
    println!("  run <file.js>        Run as a function body; `debugger` suspends");
    println!("  example [name]       Show and run a built-in example (default: error)");
    println!("  examples             List built-in examples");
    println!("  ast <file.js>        Print the syntax tree outline");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --break=<line>       Breakpoint line, 1-based (step only)");
    println!("  --json               Print the debug view as JSON");
    println!("  --step               With `example`: use the step path");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing (e.g. RUST_LOG=stepwise_debug=debug)");
    println!();
    println!("Examples:");
    println!("  stepwise step prog.js --break=5");
    println!("  stepwise run prog.js --json");
    println!("  stepwise example fibonacci --step --break=3");
}
