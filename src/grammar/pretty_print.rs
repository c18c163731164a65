use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let mut productions = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let rights = non_terminal
                .productions
                .iter()
                .map(|production| {
                    production
                        .iter()
                        .map(|&idx| self.get_symbol_name(idx))
                        .collect()
                })
                .collect();
            productions.push(ProductionOutput {
                left: non_terminal.name.as_str(),
                rights,
            });
        }
        ProductionOutputVec { productions }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolSetOutput<'a> {
    non_terminals: Vec<&'a str>,
    terminals: Vec<&'a str>,
}

impl SymbolSetOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        format!(
            "non-terminals: {}\nterminals: {}",
            self.non_terminals.join(" "),
            self.terminals.join(" ")
        )
    }

    pub fn to_latex(&self) -> String {
        fn f(a: &[&str]) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(", ")
        }

        format!(
            "\\begin{{align*}}\nV_N &= \\{{ {} \\}}\\\\\nV_T &= \\{{ {} \\}}\n\\end{{align*}}",
            f(&self.non_terminals),
            f(&self.terminals)
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Grammar {
    pub fn to_symbol_set_output(&self) -> SymbolSetOutput {
        let (non_terminals, terminals) = self.symbol_sets();
        SymbolSetOutput {
            non_terminals,
            terminals,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstSetOutput<'a> {
    symbols: Vec<&'a str>,
    first: Vec<&'a str>,
}

impl FirstSetOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!("first({}) = {}", self.symbols.join(" "), self.first.join(", "))
    }

    fn to_latex(&self) -> String {
        fn f(a: &[&str], separator: &str) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(separator)
        }

        format!(
            "\\mathrm{{first}}({}) &= \\{{ {} \\}}",
            f(&self.symbols, "\\ "),
            f(&self.first, ", ")
        )
        .replace(EPSILON, "\\epsilon")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstSetOutputVec<'a> {
    data: Vec<FirstSetOutput<'a>>,
}

impl FirstSetOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\begin{align*}".to_string())
            .chain(self.data.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{align*}".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Grammar {
    /// FIRST of every production right-hand side, then of every
    /// non-terminal. Requires first/follow sets to be up to date.
    pub fn to_first_set_output_vec(&self) -> FirstSetOutputVec {
        let mut data = Vec::new();
        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                let mut first: Vec<&str> = self
                    .first_of_production(production)
                    .into_iter()
                    .map(|idx| self.get_symbol_name(idx))
                    .collect();
                first.sort_unstable();
                data.push(FirstSetOutput {
                    symbols: production
                        .iter()
                        .map(|&idx| self.get_symbol_name(idx))
                        .collect(),
                    first,
                });
            }
        }
        for nt in self.non_terminal_iter() {
            let mut first: Vec<&str> = nt
                .first
                .iter()
                .map(|&idx| self.get_symbol_name(idx))
                .collect();
            first.sort_unstable();
            if nt.nullable {
                first.push(EPSILON);
            }
            data.push(FirstSetOutput {
                symbols: vec![nt.name.as_str()],
                first,
            });
        }
        FirstSetOutputVec { data }
    }
}

#[derive(Debug, Clone, Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }

    fn to_latex(&self) -> String {
        fn f(a: &[&str]) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_non_terminal_output_vec(&self) -> NonTerminalOutputVec {
        let mut data = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let mut t = NonTerminalOutput {
                name: non_terminal.name.as_str(),
                nullable: non_terminal.nullable,
                first: non_terminal
                    .first
                    .iter()
                    .map(|&idx| self.get_symbol_name(idx))
                    .collect(),
                follow: non_terminal
                    .follow
                    .iter()
                    .map(|&idx| self.get_symbol_name(idx))
                    .collect(),
            };
            t.first.sort_unstable();
            t.follow.sort_unstable();

            if non_terminal.nullable {
                t.first.push(EPSILON);
            }
            data.push(t);
        }
        NonTerminalOutputVec { data }
    }
}
