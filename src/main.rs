pub mod grammar;
use std::{fs, io::BufRead};

pub use grammar::Grammar;

fn print_help() {
    println!("Usage: ll1-analyzer [actions] outputs [options] [grammar file]");
    println!("actions:");
    println!("  elf: Eliminate direct left recursion");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  sym: Non-terminal and terminal sets");
    println!("  first: First sets of production right-hand sides");
    println!("  nff: Nullable, first and follow");
    println!("  ll1: LL(1) parsing table");
    println!("  parse: Predictive-parser traces for the -i symbol strings");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -i <string>: Symbol string to parse, whitespace separated (repeatable)");
    println!("  -t <terminal>: Tokenize -i strings, identifier runs become <terminal>");
}

fn main() {
    let mut actions: Vec<&str> = Vec::new();
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && args[i] == "elf" {
        actions.push(args[i].as_str());
        i += 1;
    }
    while i < args.len()
        && ["prod", "sym", "first", "nff", "ll1", "parse"].contains(&args[i].as_str())
    {
        outputs.push(args[i].as_str());
        i += 1;
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        Json,
    }
    let mut output_format = OutputFormat::Plain;
    let mut inputs: Vec<String> = Vec::new();
    let mut identifier: Option<String> = None;

    while i < args.len() && ["-h", "--help", "-l", "-j", "-i", "-t"].contains(&args[i].as_str()) {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-l" => output_format = OutputFormat::LaTeX,
            "-j" => output_format = OutputFormat::Json,
            "-i" => {
                i += 1;
                if i == args.len() {
                    print_help();
                    return;
                }
                inputs.push(args[i].clone());
            }
            "-t" => {
                i += 1;
                if i == args.len() {
                    print_help();
                    return;
                }
                identifier = Some(args[i].clone());
            }
            _ => unreachable!(),
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let input: String = if i == args.len() {
        std::io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        match fs::read_to_string(args[i].as_str()) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}: {}", args[i], e);
                return;
            }
        }
    };

    let mut g = match Grammar::parse(&input) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    for action in actions {
        if action == "elf" {
            if let Err(e) = g.eliminate_left_recursion() {
                eprintln!("{}", e);
                return;
            }
        }
    }

    for output in outputs {
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if output == "sym" {
            let t = g.to_symbol_set_output();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if output == "first" {
            if !g.is_nullable_first_follow_valid() {
                g.calculate_nullable_first_follow();
            }
            let t = g.to_first_set_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if output == "nff" {
            if !g.is_nullable_first_follow_valid() {
                g.calculate_nullable_first_follow();
            }
            let t = g.to_non_terminal_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if output == "ll1" {
            let t = match g.generate_ll1_parsing_table() {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("{}", e);
                    return;
                }
            };
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if output == "parse" {
            let token_lists: Vec<Vec<String>> = inputs
                .iter()
                .map(|s| match &identifier {
                    Some(ident) => g.tokenize_symbols(s, ident),
                    None => s.split_whitespace().map(str::to_string).collect(),
                })
                .collect();
            let table = match g.generate_ll1_parsing_table() {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("{}", e);
                    return;
                }
            };
            for conflict in table.conflicts() {
                eprintln!(
                    "warning: not LL(1): ({}, {}) keeps {}, drops {}",
                    conflict.non_terminal,
                    conflict.lookahead,
                    conflict.kept.join(" "),
                    conflict.dropped.join(" ")
                );
            }
            for (raw, tokens) in inputs.iter().zip(&token_lists) {
                let symbols: Vec<&str> = tokens.iter().map(String::as_str).collect();
                match table.parse(&symbols) {
                    Ok(trace) => match output_format {
                        OutputFormat::Plain => {
                            println!("{}", raw);
                            println!("{}", trace.to_plaintext());
                        }
                        OutputFormat::LaTeX => println!("{}", trace.to_latex()),
                        OutputFormat::Json => println!("{}", trace.to_json()),
                    },
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }
}
