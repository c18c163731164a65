use crowbook_text_processing::escape;
use serde::Serialize;

use super::{ll1_parsing_table::LL1ParsingTable, END_MARK, EPSILON};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseAction {
    /// Top of stack and lookahead are the same terminal; both are popped.
    Match(String),
    /// The table chose `left -> right`; the right side replaces `left` on
    /// the stack (an epsilon production pushes nothing).
    Expand { left: String, right: Vec<String> },
    /// Both sides reached the end marker.
    Accept,
    Error(String),
}

impl ParseAction {
    pub fn to_plaintext(&self) -> String {
        match self {
            ParseAction::Match(t) => format!("match {}", t),
            ParseAction::Expand { left, right } => format!("{} -> {}", left, right.join(" ")),
            ParseAction::Accept => "accept".to_string(),
            ParseAction::Error(e) => format!("error: {}", e),
        }
    }
}

/// One automaton step, recorded before the action is performed. The stack
/// reads bottom to top, the remaining input lookahead first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseStep {
    pub stack: Vec<String>,
    pub input: Vec<String>,
    pub action: ParseAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseTrace {
    pub steps: Vec<ParseStep>,
    pub accepted: bool,
}

impl ParseTrace {
    pub fn verdict(&self) -> &'static str {
        if self.accepted {
            "accept"
        } else {
            "reject"
        }
    }

    pub fn to_plaintext(&self) -> String {
        let mut output: Vec<Vec<String>> = vec![vec![
            "step".to_string(),
            "stack".to_string(),
            "input".to_string(),
            "action".to_string(),
        ]];
        for (i, step) in self.steps.iter().enumerate() {
            output.push(vec![
                (i + 1).to_string(),
                step.stack.join(" "),
                step.input.join(" "),
                step.action.to_plaintext(),
            ]);
        }

        let width: Vec<usize> = (0..output[0].len())
            .map(|j| output.iter().map(|line| line[j].len()).max().unwrap())
            .collect();
        let mut lines: Vec<String> = output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();
        lines.push(format!("=> {}", self.verdict()));
        lines.join("\n")
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                format!(
                    "{} & {} & {} & {}",
                    i + 1,
                    escape::tex(step.stack.join(" ")),
                    escape::tex(step.input.join(" ")),
                    escape::tex(step.action.to_plaintext()),
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        format!(
            "\\begin{{tabular}}{{c|l|l|l}}\nStep & Stack & Input & Action\\\\\\hline\n{}\\\\\\hline\n\\multicolumn{{4}}{{c}}{{{}}}\\\\\n\\end{{tabular}}",
            content,
            self.verdict()
        )
        .replace(EPSILON, "$\\epsilon$")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl LL1ParsingTable<'_> {
    /// Runs the predictive automaton over `input`, a string of terminal
    /// names, and returns the full step trace with the accept/reject
    /// verdict. Symbols outside the terminal alphabet are a caller error,
    /// not a reject.
    pub fn parse(&self, input: &[&str]) -> Result<ParseTrace, String> {
        let g = self.grammar();
        let end_idx = g.get_symbol_index(END_MARK).unwrap();
        let epsilon_idx = g.get_symbol_index(EPSILON).unwrap();
        let start_idx = g
            .start_symbol
            .ok_or_else(|| "start symbol is not declared".to_string())?;

        let mut symbols: Vec<usize> = Vec::with_capacity(input.len());
        for name in input {
            match g.get_symbol_index(name) {
                Some(idx) if idx != end_idx && g.symbols[idx].non_terminal().is_none() => {
                    symbols.push(idx)
                }
                _ => {
                    return Err(format!(
                        "input symbol {:?} is not a terminal of the grammar",
                        name
                    ))
                }
            }
        }

        let mut stack: Vec<usize> = vec![end_idx, start_idx];
        let mut rest: Vec<usize> = vec![end_idx];
        rest.extend(symbols.iter().rev().copied());

        let mut steps: Vec<ParseStep> = Vec::new();
        let accepted = loop {
            let stack_names: Vec<String> = stack
                .iter()
                .map(|&s| g.get_symbol_name(s).to_string())
                .collect();
            let input_names: Vec<String> = rest
                .iter()
                .rev()
                .map(|&s| g.get_symbol_name(s).to_string())
                .collect();
            let x = *stack.last().unwrap();
            let a = *rest.last().unwrap();

            if x == a {
                stack.pop();
                rest.pop();
                if x == end_idx {
                    steps.push(ParseStep {
                        stack: stack_names,
                        input: input_names,
                        action: ParseAction::Accept,
                    });
                    break true;
                }
                steps.push(ParseStep {
                    stack: stack_names,
                    input: input_names,
                    action: ParseAction::Match(g.get_symbol_name(x).to_string()),
                });
            } else if g.symbols[x].non_terminal().is_some() {
                match self.get(x, a) {
                    Some(production) => {
                        steps.push(ParseStep {
                            stack: stack_names,
                            input: input_names,
                            action: ParseAction::Expand {
                                left: g.get_symbol_name(x).to_string(),
                                right: production
                                    .iter()
                                    .map(|&s| g.get_symbol_name(s).to_string())
                                    .collect(),
                            },
                        });
                        stack.pop();
                        for &s in production.iter().rev() {
                            if s != epsilon_idx {
                                stack.push(s);
                            }
                        }
                    }
                    None => {
                        steps.push(ParseStep {
                            stack: stack_names,
                            input: input_names,
                            action: ParseAction::Error(format!(
                                "no production for ({}, {})",
                                g.get_symbol_name(x),
                                g.get_symbol_name(a)
                            )),
                        });
                        break false;
                    }
                }
            } else {
                steps.push(ParseStep {
                    stack: stack_names,
                    input: input_names,
                    action: ParseAction::Error(format!(
                        "expected {}, found {}",
                        g.get_symbol_name(x),
                        g.get_symbol_name(a)
                    )),
                });
                break false;
            }
        };

        Ok(ParseTrace { steps, accepted })
    }
}
