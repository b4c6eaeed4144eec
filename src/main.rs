//! Trampex - Pattern Matching CLI

use trampex::{Matcher, PatternFile, ZeroWidthPolicy};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use tracing::Level;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every input matched (or every case passed)
const EXIT_MATCH: i32 = 0;
/// At least one input did not match (or one case failed)
const EXIT_NO_MATCH: i32 = 1;
/// Usage, file, or step-limit error
const EXIT_ERROR: i32 = 2;

fn print_usage() {
    eprintln!("Trampex v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    trampex [OPTIONS] <PATTERN_FILE> [INPUT]...");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help             Print this help message");
    eprintln!("    -v, --version          Print version information");
    eprintln!("    -o, --output <FILE>    Write output to FILE (default: stdout)");
    eprintln!("    --show                 Print the pattern instead of matching");
    eprintln!("    --max-steps <N>        Abort a match after N driver steps");
    eprintln!("    --faithful             Let zero-width repetitions loop (needs a step limit)");
    eprintln!("    --verbose              Log match summaries to stderr");
    eprintln!("    --trace                Log every driver step to stderr");
    eprintln!("    --                     Treat every later argument as a file or input");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("    <PATTERN_FILE>         TOML pattern file");
    eprintln!("    [INPUT]...             Strings to match (use '-' to read lines from stdin);");
    eprintln!("                           without inputs the file's [[case]] entries are checked");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("    TRAMPEX_MAX_STEPS      Default step limit");
    eprintln!("    TRAMPEX_ZERO_WIDTH     'guard' (default) or 'faithful'");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    trampex scala.toml Scala Scalalala");
    eprintln!("    trampex --show scala.toml");
    eprintln!("    cat inputs.txt | trampex scala.toml -");
    eprintln!("    trampex scala.toml -- -Scala");
}

fn print_version() {
    println!("Trampex {}", VERSION);
}

struct Options {
    pattern_file: Option<String>,
    inputs: Vec<String>,
    output: Option<String>,
    show: bool,
    max_steps: Option<u64>,
    faithful: bool,
    log_level: Level,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut pattern_file = None;
    let mut inputs = Vec::new();
    let mut output = None;
    let mut show = false;
    let mut max_steps = None;
    let mut faithful = false;
    let mut log_level = Level::WARN;
    let mut options_done = false;
    let mut i = 1;

    while i < args.len() {
        if options_done {
            if pattern_file.is_none() {
                pattern_file = Some(args[i].clone());
            } else {
                inputs.push(args[i].clone());
            }
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--" => options_done = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(EXIT_MATCH);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(EXIT_MATCH);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing output file after -o".to_string());
                }
                output = Some(args[i].clone());
            }
            "--max-steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing step count after --max-steps".to_string());
                }
                let steps = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid step count: {}", args[i]))?;
                max_steps = Some(steps);
            }
            "--show" => show = true,
            "--faithful" => faithful = true,
            "--verbose" => log_level = log_level.max(Level::DEBUG),
            "--trace" => log_level = Level::TRACE,
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if pattern_file.is_none() {
                    pattern_file = Some(arg.to_string());
                } else {
                    inputs.push(arg.to_string());
                }
            }
        }
        i += 1;
    }

    Ok(Options {
        pattern_file,
        inputs,
        output,
        show,
        max_steps,
        faithful,
        log_level,
    })
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn read_stdin_lines() -> Result<Vec<String>, String> {
    io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Failed to read from stdin: {}", e))
}

fn expand_inputs(inputs: Vec<String>) -> Result<Vec<String>, String> {
    let mut expanded = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input == "-" {
            expanded.extend(read_stdin_lines()?);
        } else {
            expanded.push(input);
        }
    }
    Ok(expanded)
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), String> {
    let (mut sink, target): (Box<dyn Write>, &str) = match output {
        Some(path) => {
            let file = fs::File::create(path)
                .map_err(|e| format!("Cannot create '{}': {}", path, e))?;
            (Box::new(file), path)
        }
        None => (Box::new(io::stdout().lock()), "stdout"),
    };
    sink.write_all(content.as_bytes())
        .and_then(|()| sink.flush())
        .map_err(|e| format!("Cannot write to {}: {}", target, e))
}

/// Run the inputs (or the file's cases) and return the report and exit code
fn run(file: &PatternFile, matcher: &Matcher, inputs: &[String]) -> Result<(String, i32), String> {
    let expr = file.expr().map_err(|e| e.to_string())?;
    let mut output = String::new();
    let mut code = EXIT_MATCH;

    if inputs.is_empty() {
        let mut failed = 0;
        for case in &file.cases {
            let actual = matcher
                .is_match(&expr, &case.input)
                .map_err(|e| format!("{:?}: {}", case.input, e))?;
            let verdict = if actual == case.expect { "ok" } else { "FAILED" };
            if actual != case.expect {
                failed += 1;
            }
            output.push_str(&format!(
                "{} {:?} (expected {}, got {})\n",
                verdict,
                case.input,
                describe(case.expect),
                describe(actual)
            ));
        }
        output.push_str(&format!(
            "{} passed, {} failed\n",
            file.cases.len() - failed,
            failed
        ));
        if failed > 0 {
            code = EXIT_NO_MATCH;
        }
    } else {
        for input in inputs {
            let matched = matcher
                .is_match(&expr, input)
                .map_err(|e| format!("{:?}: {}", input, e))?;
            output.push_str(&format!("{} {:?}\n", describe(matched), input));
            if !matched {
                code = EXIT_NO_MATCH;
            }
        }
    }

    Ok((output, code))
}

fn describe(matched: bool) -> &'static str {
    if matched {
        "match"
    } else {
        "no match"
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(EXIT_ERROR);
}

fn main() {
    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(EXIT_ERROR);
        }
    };

    init_logging(options.log_level);

    let Some(pattern_path) = options.pattern_file.as_deref() else {
        eprintln!("Error: Missing pattern file");
        eprintln!();
        print_usage();
        process::exit(EXIT_ERROR);
    };

    let file = PatternFile::load(Path::new(pattern_path)).unwrap_or_else(|e| fail(&e.to_string()));

    if options.show {
        let expr = file.expr().unwrap_or_else(|e| fail(&e.to_string()));
        if let Err(e) = write_output(options.output.as_deref(), &format!("{}\n", expr)) {
            fail(&e);
        }
        return;
    }

    let mut config = file.config.clone().with_env_overrides();
    if let Some(steps) = options.max_steps {
        config.max_steps = Some(steps);
    }
    if options.faithful {
        config.zero_width = ZeroWidthPolicy::Faithful;
    }
    if config.zero_width == ZeroWidthPolicy::Faithful && config.max_steps.is_none() {
        fail("faithful zero-width repetition needs a step limit (--max-steps, [config] max_steps, or TRAMPEX_MAX_STEPS)");
    }
    let matcher = Matcher::new(config);

    let inputs = expand_inputs(options.inputs).unwrap_or_else(|e| fail(&e));
    let (output, code) = run(&file, &matcher, &inputs).unwrap_or_else(|e| fail(&e));

    if let Err(e) = write_output(options.output.as_deref(), &output) {
        fail(&e);
    }
    process::exit(code);
}
