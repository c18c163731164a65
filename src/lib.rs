extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::Grammar;

#[wasm_bindgen]
pub fn nullable_first_follow_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => {
            g.calculate_nullable_first_follow();
            g.to_non_terminal_output_vec().to_json()
        }
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn ll1_parsing_table_to_json(grammar: &str) -> String {
    let mut g = match Grammar::parse(grammar) {
        Ok(g) => g,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    if let Err(e) = g.eliminate_left_recursion() {
        return format!("{{\"error\":\"{}\"}}", e);
    }
    match g.generate_ll1_parsing_table() {
        Ok(t) => t.to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn recognize_to_json(grammar: &str, input: &str) -> String {
    let mut g = match Grammar::parse(grammar) {
        Ok(g) => g,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    if let Err(e) = g.eliminate_left_recursion() {
        return format!("{{\"error\":\"{}\"}}", e);
    }
    let symbols: Vec<&str> = input.split_whitespace().collect();
    let table = match g.generate_ll1_parsing_table() {
        Ok(t) => t,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    match table.parse(&symbols) {
        Ok(trace) => trace.to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[cfg(test)]
const EXPRESSION_GRAMMAR: &str = "E -> E + T | T\nT -> T * F | F\nF -> ( E ) | i";

#[cfg(test)]
fn production_names(g: &crate::Grammar, left: &str) -> Vec<String> {
    let idx = g.get_symbol_index(left).unwrap();
    g.symbols[idx]
        .non_terminal()
        .unwrap()
        .productions
        .iter()
        .map(|p| {
            p.iter()
                .map(|&s| g.get_symbol_name(s))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}


#[cfg(test)]
mod symbol_set_tests {
    #[test]
    fn derived_partition() {
        let g = crate::Grammar::parse(super::EXPRESSION_GRAMMAR).unwrap();
        let (non_terminals, terminals) = g.symbol_sets();
        assert_eq!(non_terminals, vec!["E", "F", "T"]);
        assert_eq!(terminals, vec!["(", ")", "*", "+", "i"]);
    }

    #[test]
    fn end_marker_is_reserved() {
        let g = crate::Grammar::parse("S -> a").unwrap();
        let (_, terminals) = g.symbol_sets();
        assert!(!terminals.contains(&"#"));
        assert!(g.get_symbol_index("#").is_some());
    }
}

#[cfg(test)]
mod eliminate_left_recursion_tests {
    use super::production_names;

    #[test]
    fn expression_grammar_rewrite() {
        let mut g = crate::Grammar::parse(super::EXPRESSION_GRAMMAR).unwrap();
        g.eliminate_left_recursion().unwrap();

        assert_eq!(production_names(&g, "E"), vec!["T E'"]);
        assert_eq!(production_names(&g, "E'"), vec!["+ T E'", "ε"]);
        assert_eq!(production_names(&g, "T"), vec!["F T'"]);
        assert_eq!(production_names(&g, "T'"), vec!["* F T'", "ε"]);
        assert_eq!(production_names(&g, "F"), vec!["( E )", "i"]);
    }

    #[test]
    fn no_recursion_is_untouched() {
        let mut g = crate::Grammar::parse("S -> a S b | c").unwrap();
        g.eliminate_left_recursion().unwrap();

        assert_eq!(production_names(&g, "S"), vec!["a S b", "c"]);
        assert!(g.get_symbol_index("S'").is_none());
    }

    #[test]
    fn recursion_without_exit_is_an_error() {
        let mut g = crate::Grammar::parse("S -> S a").unwrap();
        assert!(g.eliminate_left_recursion().is_err());
    }

    #[test]
    fn missing_start_symbol_is_an_error() {
        let mut g = crate::Grammar::parse("").unwrap();
        assert!(g.eliminate_left_recursion().is_err());
    }

    #[test]
    fn fresh_name_skips_declared_symbols() {
        let mut g = crate::Grammar::parse("E -> E + T | T\nE' -> x\nT -> y").unwrap();
        g.eliminate_left_recursion().unwrap();

        assert_eq!(production_names(&g, "E"), vec!["T E''"]);
        assert_eq!(production_names(&g, "E''"), vec!["+ T E''", "ε"]);
        assert_eq!(production_names(&g, "E'"), vec!["x"]);
    }
}


#[cfg(test)]
mod ll1_parsing_table_tests {
    use crate::grammar::ll1_parsing_table::LL1ParsingTable;

    fn cell(table: &LL1ParsingTable, left: &str, lookahead: &str) -> Option<String> {
        let g = table.grammar();
        let nt = g.get_symbol_index(left).unwrap();
        let t = g.get_symbol_index(lookahead).unwrap();
        table.get(nt, t).map(|p| {
            p.iter()
                .map(|&s| g.get_symbol_name(s))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    #[test]
    fn expression_grammar_cells() {
        let mut g = crate::Grammar::parse(super::EXPRESSION_GRAMMAR).unwrap();
        g.eliminate_left_recursion().unwrap();
        let table = g.generate_ll1_parsing_table().unwrap();
        assert!(table.is_ll1());

        assert_eq!(cell(&table, "E", "(").as_deref(), Some("T E'"));
        assert_eq!(cell(&table, "E", "i").as_deref(), Some("T E'"));
        assert_eq!(cell(&table, "E", "+"), None);
        assert_eq!(cell(&table, "E'", "+").as_deref(), Some("+ T E'"));
        assert_eq!(cell(&table, "E'", "#").as_deref(), Some("ε"));
        assert_eq!(cell(&table, "E'", ")").as_deref(), Some("ε"));
        assert_eq!(cell(&table, "E'", "i"), None);
        assert_eq!(cell(&table, "T'", "*").as_deref(), Some("* F T'"));
        assert_eq!(cell(&table, "F", "(").as_deref(), Some("( E )"));
        assert_eq!(cell(&table, "F", "i").as_deref(), Some("i"));
        assert_eq!(cell(&table, "F", "#"), None);
    }

    #[test]
    fn table_is_total() {
        let mut g = crate::Grammar::parse(super::EXPRESSION_GRAMMAR).unwrap();
        g.eliminate_left_recursion().unwrap();
        let table = g.generate_ll1_parsing_table().unwrap();
        let output = table.to_output();

        // 5 non-terminals, 6 columns (five terminals plus the end marker).
        assert_eq!(output.rows.len(), 5);
        assert_eq!(output.terminals.len(), 6);
        for row in &output.rows {
            assert_eq!(row.cells.len(), output.terminals.len());
        }
        let filled: usize = output
            .rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(filled, 12);
    }

    #[test]
    fn first_first_conflict_keeps_first_production() {
        let mut g = crate::Grammar::parse("S -> a | a b").unwrap();
        let table = g.generate_ll1_parsing_table().unwrap();

        assert!(!table.is_ll1());
        assert_eq!(cell(&table, "S", "a").as_deref(), Some("a"));
        let conflict = &table.conflicts()[0];
        assert_eq!(conflict.non_terminal, "S");
        assert_eq!(conflict.lookahead, "a");
        assert_eq!(conflict.kept, vec!["a"]);
        assert_eq!(conflict.dropped, vec!["a", "b"]);
    }

    #[test]
    fn missing_start_symbol_is_an_error() {
        let mut g = crate::Grammar::parse("").unwrap();
        assert!(g.generate_ll1_parsing_table().is_err());
    }
}

#[cfg(test)]
mod predictive_parser_tests {
    use crate::grammar::predictive_parser::{ParseAction, ParseTrace};

    fn expression_trace(input: &[&str]) -> ParseTrace {
        let mut g = crate::Grammar::parse(super::EXPRESSION_GRAMMAR).unwrap();
        g.eliminate_left_recursion().unwrap();
        let table = g.generate_ll1_parsing_table().unwrap();
        table.parse(input).unwrap()
    }

    #[test]
    fn accepts_sum_of_products() {
        let trace = expression_trace(&["i", "+", "i", "*", "i"]);
        assert!(trace.accepted);
        assert_eq!(trace.steps.len(), 17);

        let last = trace.steps.last().unwrap();
        assert_eq!(last.action, ParseAction::Accept);
        assert_eq!(last.stack, vec!["#"]);
        assert_eq!(last.input, vec!["#"]);
    }

    #[test]
    fn accepts_product_then_sum() {
        let trace = expression_trace(&["i", "*", "i", "+", "i"]);
        assert!(trace.accepted);
        assert_eq!(trace.steps.last().unwrap().action, ParseAction::Accept);
    }

    #[test]
    fn rejects_unbalanced_parenthesis() {
        let trace = expression_trace(&["(", "i", "+", "i"]);
        assert!(!trace.accepted);

        // Fails where the automaton expects the closing parenthesis.
        match &trace.steps.last().unwrap().action {
            ParseAction::Error(e) => assert!(e.contains(")")),
            other => panic!("expected an error action, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_input() {
        let trace = expression_trace(&[]);
        assert!(!trace.accepted);
        assert_eq!(trace.steps.len(), 1);
        assert!(matches!(
            trace.steps[0].action,
            ParseAction::Error(_)
        ));
    }

    #[test]
    fn trace_is_deterministic() {
        let a = expression_trace(&["(", "i", "+", "i", ")", "*", "i"]);
        let b = expression_trace(&["(", "i", "+", "i", ")", "*", "i"]);
        assert!(a.accepted);
        assert_eq!(a, b);
    }

    #[test]
    fn elimination_preserves_verdicts() {
        let samples: [&[&str]; 4] = [&["a", "c", "b"], &["c"], &["a", "b"], &[]];
        let mut verdicts: Vec<Vec<bool>> = Vec::new();
        for eliminate in [false, true] {
            let mut g = crate::Grammar::parse("S -> a S b | c").unwrap();
            if eliminate {
                g.eliminate_left_recursion().unwrap();
            }
            let table = g.generate_ll1_parsing_table().unwrap();
            verdicts.push(
                samples
                    .iter()
                    .map(|input| table.parse(input).unwrap().accepted)
                    .collect(),
            );
        }
        assert_eq!(verdicts[0], vec![true, true, false, false]);
        assert_eq!(verdicts[0], verdicts[1]);
    }

    #[test]
    fn non_terminal_input_is_an_error() {
        let mut g = crate::Grammar::parse(super::EXPRESSION_GRAMMAR).unwrap();
        g.eliminate_left_recursion().unwrap();
        let table = g.generate_ll1_parsing_table().unwrap();
        assert!(table.parse(&["E"]).is_err());
        assert!(table.parse(&["unknown"]).is_err());
        assert!(table.parse(&["#"]).is_err());
    }

    #[test]
    fn trace_plaintext_ends_with_verdict() {
        let trace = expression_trace(&["i"]);
        assert!(trace.accepted);
        let text = trace.to_plaintext();
        assert!(text.ends_with("=> accept"));
        assert!(text.contains("F -> i"));
    }
}

#[cfg(test)]
mod tokenize_tests {
    fn expression_grammar() -> crate::Grammar {
        crate::Grammar::parse(super::EXPRESSION_GRAMMAR).unwrap()
    }

    #[test]
    fn collapses_identifier_runs() {
        let g = expression_grammar();
        assert_eq!(
            g.tokenize_symbols("abc+age*80", "i"),
            vec!["i", "+", "i", "*", "i"]
        );
    }

    #[test]
    fn passes_operators_through() {
        let g = expression_grammar();
        assert_eq!(
            g.tokenize_symbols("(abc-80(*s5)", "i"),
            vec!["(", "i", "(", "*", "i", ")"]
        );
    }

    #[test]
    fn whitespace_separates_runs() {
        let g = expression_grammar();
        assert_eq!(g.tokenize_symbols("foo + bar", "i"), vec!["i", "+", "i"]);
        assert_eq!(g.tokenize_symbols("foo bar", "i"), vec!["i", "i"]);
    }

    #[test]
    fn end_to_end_with_parser() {
        let mut g = expression_grammar();
        g.eliminate_left_recursion().unwrap();
        let tokens = g.tokenize_symbols("count+count*2", "i");
        let table = g.generate_ll1_parsing_table().unwrap();
        let symbols: Vec<&str> = tokens.iter().map(String::as_str).collect();
        assert!(table.parse(&symbols).unwrap().accepted);
    }
}
