use clap::Parser;
use std::io::{self, BufRead};

use anyhow::{Context, Result};
use itertools::Itertools;

use backmatch::{compile, is_match, match_with_trace};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to match against each subject
    pattern: String,

    /// Subject strings; read one per line from stdin when omitted
    #[arg(value_name = "SUBJECT")]
    subjects: Vec<String>,

    /// Show the ranges each pattern element consumed
    #[arg(short, long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let pattern = compile(&args.pattern)
        .with_context(|| format!("cannot compile pattern {:?}", args.pattern))?;

    let subjects = if args.subjects.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read subjects from stdin")?
    } else {
        args.subjects
    };

    let mut any_matched = false;
    for subject in &subjects {
        if args.trace {
            match match_with_trace(&pattern, subject) {
                Some(ranges) => {
                    any_matched = true;
                    println!("{subject}: match");
                    for (idx, unit_ranges) in ranges.iter().enumerate() {
                        let spans = unit_ranges
                            .iter()
                            .map(|r| format!("{}..{}", r.start, r.end))
                            .join(" ");
                        println!("  unit {idx}: {}", if spans.is_empty() { "-" } else { &spans });
                    }
                }
                None => println!("{subject}: no match"),
            }
        } else if is_match(&pattern, subject) {
            any_matched = true;
            println!("{subject}: match");
        } else {
            println!("{subject}: no match");
        }
    }

    if !any_matched {
        std::process::exit(1);
    }
    Ok(())
}
