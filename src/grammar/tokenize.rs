use std::collections::HashSet;

use super::{Grammar, END_MARK};

impl Grammar {
    /// Turns a raw character string into a symbol string over this
    /// grammar's terminal alphabet: single-character terminals pass
    /// through literally, whitespace separates, and every other maximal
    /// run of characters collapses to the `identifier` terminal.
    ///
    /// This is a character-class classifier for feeding the predictive
    /// parser, not a scanner; terminals longer than one character (other
    /// than `identifier` itself) are never produced.
    pub fn tokenize_symbols(&self, input: &str, identifier: &str) -> Vec<String> {
        let operators: HashSet<char> = self
            .terminal_iter()
            .filter(|t| t.as_str() != END_MARK && t.as_str() != identifier)
            .filter_map(|t| {
                let mut chars = t.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .collect();

        let mut tokens: Vec<String> = Vec::new();
        let mut in_identifier = false;
        for c in input.chars() {
            if operators.contains(&c) {
                tokens.push(c.to_string());
                in_identifier = false;
            } else if c.is_whitespace() {
                in_identifier = false;
            } else {
                if !in_identifier {
                    tokens.push(identifier.to_string());
                }
                in_identifier = true;
            }
        }
        tokens
    }
}
