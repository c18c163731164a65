use crate::Grammar;

impl Grammar {
    /// Parses a grammar from text, one rule per line:
    ///
    /// ```text
    /// E -> E + T | T
    /// T -> T * F | F
    /// F -> ( E ) | i
    /// ```
    ///
    /// Symbols are whitespace separated; `ε` (or `ϵ`) names the empty
    /// derivation. A line starting with `|` continues the previous
    /// left-hand side. Every left-hand side is a non-terminal, every other
    /// symbol a terminal, and the first left-hand side becomes the start
    /// symbol.
    pub fn parse(grammar: &str) -> Result<Self, String> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, &str)> = Vec::new();
        let mut previous_left: Option<usize> = None;

        for (i, line) in grammar.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            match parts.len() {
                1 => {
                    let left = previous_left
                        .ok_or_else(|| format!("Line {}: cannot find left side", i + 1))?;
                    let rights = parts[0]
                        .strip_prefix('|')
                        .ok_or_else(|| format!("Line {}: expected \"|\" continuation", i + 1))?;
                    raw_productions.push((left, rights.trim()));
                }
                2 => {
                    let left_str = parts[0].trim();
                    if left_str.is_empty() {
                        return Err(format!("Line {}: empty left side", i + 1));
                    }
                    if left_str.split_whitespace().count() != 1 {
                        return Err(format!("Line {}: left side contains whitespace", i + 1));
                    }
                    let left = match g.get_symbol_index(left_str) {
                        Some(idx) => idx,
                        None => g.add_non_terminal(left_str),
                    };
                    raw_productions.push((left, parts[1].trim()));
                    previous_left = Some(left);
                }
                _ => return Err(format!("Line {}: too many \"->\"", i + 1)),
            }
        }

        // Right sides resolve in a second pass so that forward references
        // to non-terminals declared later are not mistaken for terminals.
        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols = right
                    .split_whitespace()
                    .map(|s| {
                        if let Some(idx) = g.get_symbol_index(s) {
                            idx
                        } else {
                            g.add_terminal(s.to_string())
                        }
                    })
                    .collect();
                g.add_production(left, symbols);
            }
        }

        let start_symbol = g.non_terminal_iter().next().map(|nt| nt.index);
        g.start_symbol = start_symbol;

        Ok(g)
    }
}
