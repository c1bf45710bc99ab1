use clap::{Parser, Subcommand};
use colored::Colorize;
use lexmatch_core::{
    compile, parse_pattern, Binding, BranchSpec, MatchOutcome, Strategy, TargetKind, Value, View,
};

#[derive(Parser)]
#[command(name = "lexmatch")]
#[command(about = "Lexmatch - a branch-oriented pattern-matching engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a pattern against input and show what it binds
    Match {
        /// The pattern, e.g. '"ERROR" ("[0-9]+" as code)'
        pattern: String,
        /// The input string
        input: String,
        /// Select the longest match across branches instead of the first
        #[arg(short, long)]
        longest: bool,
        /// Scan for the pattern anywhere in the input (three-part form)
        #[arg(short, long)]
        scan: bool,
        /// Require the pattern to consume the entire input (bare form)
        #[arg(short, long, conflicts_with = "scan")]
        exact: bool,
        /// Address the input as bytes instead of characters
        #[arg(short, long)]
        bytes: bool,
    },
    /// Check that a pattern compiles
    Check {
        /// The pattern to check
        pattern: String,
        /// Address the input as bytes instead of characters
        #[arg(short, long)]
        bytes: bool,
    },
    /// Show the parsed form of a pattern
    Ast {
        /// The pattern to parse
        pattern: String,
        /// Address the input as bytes instead of characters
        #[arg(short, long)]
        bytes: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            pattern,
            input,
            longest,
            scan,
            exact,
            bytes,
        } => cmd_match(&pattern, &input, longest, scan, exact, bytes),
        Commands::Check { pattern, bytes } => cmd_check(&pattern, bytes),
        Commands::Ast { pattern, bytes } => cmd_ast(&pattern, bytes),
    }
}

fn target(bytes: bool) -> TargetKind {
    if bytes {
        TargetKind::Byte
    } else {
        TargetKind::Char
    }
}

fn cmd_match(pattern: &str, input: &str, longest: bool, scan: bool, exact: bool, bytes: bool) {
    let strategy = if longest {
        Strategy::Longest
    } else {
        Strategy::First
    };
    let spec = if scan {
        BranchSpec::ThreePart {
            prefix: Binding::Named("prefix".to_string()),
            pattern,
            rest: Binding::Named("rest".to_string()),
        }
    } else if exact {
        BranchSpec::Bare { pattern }
    } else {
        BranchSpec::TwoPart {
            pattern,
            rest: Binding::Named("rest".to_string()),
        }
    };

    let set = match compile(strategy, target(bytes), &[spec]) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let outcome = if bytes {
        set.eval(input.as_bytes())
    } else {
        set.eval(input)
    };
    match outcome {
        MatchOutcome::Match(result) => {
            println!("{}", "✓ Match".green().bold());
            println!("  Length: {}", result.length);
            if let Some(prefix) = result.prefix {
                println!("  Prefix: {}", format_view(prefix).yellow());
            }
            if let Some(rest) = result.rest {
                println!("  Rest:   {}", format_view(rest).yellow());
            }
            let mut names: Vec<&String> = result.captures.keys().collect();
            names.sort();
            if !names.is_empty() {
                println!();
                println!("{}", "Bindings:".bold());
                for name in names {
                    println!(
                        "  {} = {}",
                        name.cyan(),
                        format_value(&result.captures[name]).green()
                    );
                }
            }
        }
        MatchOutcome::NoMatch => {
            println!("{}", "✗ No match".red());
            std::process::exit(1);
        }
    }
}

fn cmd_check(pattern: &str, bytes: bool) {
    let spec = BranchSpec::TwoPart {
        pattern,
        rest: Binding::Wildcard,
    };
    match compile(Strategy::First, target(bytes), &[spec]) {
        Ok(_) => println!("{}", "ok".green()),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_ast(pattern: &str, bytes: bool) {
    match parse_pattern(pattern, target(bytes), true) {
        Ok(ast) => println!("{:#?}", ast),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn format_view(view: View<'_>) -> String {
    match view {
        View::Str(s) => s.to_string(),
        View::Bytes(b) => b
            .iter()
            .map(|b| format!("\\x{:02x}", b))
            .collect::<String>(),
    }
}

fn format_value(value: &Value<'_>) -> String {
    match value {
        Value::Char(c) => format!("{:?}", c),
        Value::Byte(b) => format!("0x{:02x}", b),
        Value::View(view) => format_view(*view),
    }
}
