use std::collections::HashSet;

use super::{grammar::Symbol, Grammar, END_MARK, EPSILON};

impl Grammar {
    /// Recomputes the nullable flags and the first/follow sets of every
    /// non-terminal from scratch. Does nothing when no start symbol is
    /// declared, since FOLLOW is seeded from it.
    pub fn calculate_nullable_first_follow(&mut self) {
        if let Some(start_idx) = self.start_symbol {
            self.reset_nullable_first_follow();
            let end_idx = self.symbol_table[END_MARK];
            self.symbols[start_idx]
                .mut_non_terminal()
                .unwrap()
                .follow
                .insert(end_idx);
            self.calculate_nullable();
            self.calculate_first();
            self.calculate_follow();
            self.nff_valid = true;
        }
    }

    pub fn reset_nullable_first_follow(&mut self) {
        self.nff_valid = false;
        for nt in self.non_terminal_iter_mut() {
            nt.nullable = false;
            nt.first = HashSet::new();
            nt.follow = HashSet::new();
        }
    }

    fn calculate_nullable(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let nullable: bool = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        if nt.nullable {
                            continue;
                        }
                        nt.productions.iter().any(|production| {
                            production.iter().all(|s| match &self.symbols[*s] {
                                Symbol::Terminal(_) => false,
                                Symbol::NonTerminal(e) => e.nullable,
                            })
                        })
                    }
                };

                if nullable {
                    self.symbols[i].mut_non_terminal().unwrap().nullable = true;
                    changed = true;
                }
            }
        }
    }

    /// FIRST of a right-hand side: terminals that can begin a derivation of
    /// it, plus the epsilon sentinel when every symbol can derive empty.
    pub fn first_of_production(&self, production: &[usize]) -> HashSet<usize> {
        let epsilon_idx = self.symbol_table[EPSILON];
        let mut first: HashSet<usize> = HashSet::new();
        let mut all_nullable = true;
        for (idx, symbol) in production.iter().map(|i| (*i, &self.symbols[*i])) {
            match symbol {
                Symbol::Terminal(_) => {
                    first.insert(idx);
                    all_nullable = false;
                    break;
                }
                Symbol::NonTerminal(nt) => {
                    first.extend(nt.first.iter().cloned());
                    if !nt.nullable {
                        all_nullable = false;
                        break;
                    }
                }
            }
        }
        if all_nullable {
            first.insert(epsilon_idx);
        }
        first
    }

    // Per-symbol first sets never hold the epsilon sentinel; the nullable
    // flag carries that bit.
    fn calculate_first(&mut self) {
        let epsilon_idx = self.symbol_table[EPSILON];
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let mut first: HashSet<usize> = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        nt.productions
                            .iter()
                            .fold(HashSet::new(), |mut first, production| {
                                first.extend(self.first_of_production(production));
                                first
                            })
                    }
                };
                first.remove(&epsilon_idx);

                let nt = self.symbols[i].mut_non_terminal().unwrap();
                if nt.first.len() != first.len() {
                    changed = true;
                    nt.first = first;
                }
            }
        }
    }

    fn calculate_follow(&mut self) {
        let epsilon_idx = self.symbol_table[EPSILON];
        let rules: Vec<(usize, Vec<usize>)> = self
            .non_terminal_iter()
            .flat_map(|nt| nt.productions.iter().map(|p| (nt.index, p.clone())))
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for (left, production) in &rules {
                for (i, &b) in production.iter().enumerate() {
                    if b == epsilon_idx || self.symbols[b].non_terminal().is_none() {
                        continue;
                    }

                    // FIRST of the tail after b, chain-skipping nullable
                    // symbols; when the whole tail can vanish, FOLLOW of
                    // the left side flows in as well.
                    let mut addition: HashSet<usize> = HashSet::new();
                    let mut tail_nullable = true;
                    for &c in &production[i + 1..] {
                        match &self.symbols[c] {
                            Symbol::Terminal(_) => {
                                addition.insert(c);
                                tail_nullable = false;
                                break;
                            }
                            Symbol::NonTerminal(nt) => {
                                addition.extend(nt.first.iter().cloned());
                                if !nt.nullable {
                                    tail_nullable = false;
                                    break;
                                }
                            }
                        }
                    }
                    if tail_nullable {
                        addition.extend(
                            self.symbols[*left]
                                .non_terminal()
                                .unwrap()
                                .follow
                                .iter()
                                .cloned(),
                        );
                    }

                    let follow = &mut self.symbols[b].mut_non_terminal().unwrap().follow;
                    let before = follow.len();
                    follow.extend(addition);
                    if follow.len() != before {
                        changed = true;
                    }
                }
            }
        }
    }
}
