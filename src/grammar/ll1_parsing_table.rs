use std::collections::HashMap;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{grammar::Symbol, pretty_print::ProductionOutput, Grammar, EPSILON};

/// A second assignment to an occupied table cell. The earlier production
/// stays in the table; the later one is recorded here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LL1Conflict {
    pub non_terminal: String,
    pub lookahead: String,
    pub kept: Vec<String>,
    pub dropped: Vec<String>,
}

/// A total mapping from (non-terminal, terminal-or-end-marker) to the
/// production to expand, with `None` as the explicit "no rule" cell.
pub struct LL1ParsingTable<'a> {
    grammar: &'a Grammar,
    terminals: Vec<usize>,
    col: HashMap<usize, usize>,
    rows: Vec<(usize, Vec<Option<Vec<usize>>>)>,
    row: HashMap<usize, usize>,
    conflicts: Vec<LL1Conflict>,
}

impl Grammar {
    pub fn generate_ll1_parsing_table(&mut self) -> Result<LL1ParsingTable<'_>, String> {
        self.require_start()?;
        if !self.is_nullable_first_follow_valid() {
            self.calculate_nullable_first_follow();
        }
        let grammar: &Grammar = &*self;

        let epsilon_idx = grammar.symbol_table[EPSILON];
        let terminals: Vec<usize> = grammar
            .symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Symbol::Terminal(_)))
            .map(|(idx, _)| idx)
            .collect();
        let col: HashMap<usize, usize> = terminals
            .iter()
            .enumerate()
            .map(|(c, &idx)| (idx, c))
            .collect();

        let mut rows: Vec<(usize, Vec<Option<Vec<usize>>>)> = Vec::new();
        let mut conflicts: Vec<LL1Conflict> = Vec::new();
        for nt in grammar.non_terminal_iter() {
            let mut cells: Vec<Option<Vec<usize>>> = vec![None; terminals.len()];
            for production in &nt.productions {
                let mut lookaheads: Vec<usize> = Vec::new();
                for idx in grammar.first_of_production(production) {
                    if idx == epsilon_idx {
                        lookaheads.extend(nt.follow.iter().cloned());
                    } else {
                        lookaheads.push(idx);
                    }
                }
                // Sorted so that cell filling and conflict order do not
                // depend on hash iteration.
                lookaheads.sort_unstable();
                lookaheads.dedup();

                for idx in lookaheads {
                    let c = col[&idx];
                    if let Some(kept) = &cells[c] {
                        if kept != production {
                            conflicts.push(LL1Conflict {
                                non_terminal: nt.name.clone(),
                                lookahead: grammar.get_symbol_name(idx).to_string(),
                                kept: kept
                                    .iter()
                                    .map(|&s| grammar.get_symbol_name(s).to_string())
                                    .collect(),
                                dropped: production
                                    .iter()
                                    .map(|&s| grammar.get_symbol_name(s).to_string())
                                    .collect(),
                            });
                        }
                    } else {
                        cells[c] = Some(production.clone());
                    }
                }
            }
            rows.push((nt.index, cells));
        }
        let row: HashMap<usize, usize> = rows
            .iter()
            .enumerate()
            .map(|(r, (idx, _))| (*idx, r))
            .collect();

        Ok(LL1ParsingTable {
            grammar,
            terminals,
            col,
            rows,
            row,
            conflicts,
        })
    }
}

impl<'a> LL1ParsingTable<'a> {
    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Total lookup: `None` means "no rule" (a syntax error at parse time).
    pub fn get(&self, non_terminal: usize, lookahead: usize) -> Option<&Vec<usize>> {
        let r = *self.row.get(&non_terminal)?;
        let c = *self.col.get(&lookahead)?;
        self.rows[r].1[c].as_ref()
    }

    pub fn conflicts(&self) -> &[LL1Conflict] {
        &self.conflicts
    }

    pub fn is_ll1(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn to_plaintext(&self) -> String {
        let g = self.grammar;
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.terminals.iter().map(|&t| g.get_symbol_name(t).to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for (nt_idx, cells) in &self.rows {
            let left = g.get_symbol_name(*nt_idx);
            let mut line: Vec<String> = vec![left.to_string()];
            line.extend(cells.iter().map(|cell| match cell {
                None => String::new(),
                Some(production) => ProductionOutput {
                    left,
                    rights: vec![production.iter().map(|&s| g.get_symbol_name(s)).collect()],
                }
                .to_plaintext(left.len(), false),
            }));
            output.push(line);
        }

        let mut width = vec![0; output[0].len()];
        for j in 0..output[0].len() {
            width[j] = output.iter().map(|line| line[j].len()).max().unwrap();
        }
        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let g = self.grammar;
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(self.terminals.len()),
        )];
        header.extend(
            self.terminals
                .iter()
                .map(|&t| format!("\\text{{{}}}", escape::tex(g.get_symbol_name(t)))),
        );
        let header = header.join(" & ");

        let mut output: Vec<String> = Vec::new();
        for (nt_idx, cells) in &self.rows {
            let left = g.get_symbol_name(*nt_idx);
            let mut line: Vec<String> = vec![escape::tex(left).to_string()];
            line.extend(cells.iter().map(|cell| match cell {
                None => String::new(),
                Some(production) => ProductionOutput {
                    left,
                    rights: vec![production.iter().map(|&s| g.get_symbol_name(s)).collect()],
                }
                .to_latex(false),
            }));
            output.push(line.join(" & "));
        }
        let output = output.join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }

    pub fn to_output(&self) -> LL1ParsingTableOutput {
        let g = self.grammar;
        LL1ParsingTableOutput {
            terminals: self
                .terminals
                .iter()
                .map(|&t| g.get_symbol_name(t).to_string())
                .collect(),
            rows: self
                .rows
                .iter()
                .map(|(nt_idx, cells)| LL1RowOutput {
                    non_terminal: g.get_symbol_name(*nt_idx).to_string(),
                    cells: cells
                        .iter()
                        .map(|cell| {
                            cell.as_ref().map(|production| {
                                production
                                    .iter()
                                    .map(|&s| g.get_symbol_name(s).to_string())
                                    .collect()
                            })
                        })
                        .collect(),
                })
                .collect(),
            conflicts: self.conflicts.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_output()).unwrap()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LL1ParsingTableOutput {
    pub terminals: Vec<String>,
    pub rows: Vec<LL1RowOutput>,
    pub conflicts: Vec<LL1Conflict>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LL1RowOutput {
    pub non_terminal: String,
    pub cells: Vec<Option<Vec<String>>>,
}
