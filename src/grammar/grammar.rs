use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub first: HashSet<usize>,
    pub follow: HashSet<usize>,
    pub nullable: bool,
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            first: HashSet::new(),
            follow: HashSet::new(),
            nullable: false,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn mut_non_terminal(&mut self) -> Option<&mut NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }
}

/// Symbols live in an indexed arena: index 0 is the epsilon sentinel
/// (a nullable non-terminal with no productions), index 1 the end marker.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    pub symbol_table: HashMap<String, usize>,
    pub start_symbol: Option<usize>,
    pub(crate) nff_valid: bool,
}

impl Grammar {
    pub fn new() -> Self {
        let mut g = Self {
            symbols: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol: None,
            nff_valid: false,
        };

        let e_idx = g.add_non_terminal(super::EPSILON);
        g.symbols[e_idx].mut_non_terminal().unwrap().nullable = true;
        g.symbol_table.insert("ϵ".to_string(), e_idx);

        g.add_terminal(super::END_MARK.to_string());

        g
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.symbols.iter().filter_map(|s| {
            if let Symbol::Terminal(name) = s {
                Some(name)
            } else {
                None
            }
        })
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols.iter().filter_map(|s| s.non_terminal()).skip(1)
    }

    pub fn non_terminal_iter_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.symbols
            .iter_mut()
            .filter_map(|s| s.mut_non_terminal())
            .skip(1)
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    pub fn add_production(&mut self, left: usize, right: Vec<usize>) {
        self.nff_valid = false;
        self.symbols[left]
            .mut_non_terminal()
            .unwrap()
            .productions
            .push(right);
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        match &self.symbols[index] {
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
        }
    }

    /// Allocates a name for a fresh non-terminal by appending primes until
    /// it collides with nothing already in the symbol table.
    pub fn get_symbol_prime_name(&self, mut name: String) -> String {
        while self.symbol_table.contains_key(&name) {
            name.push('\'');
        }
        name
    }

    /// The derived symbol partition: non-terminal names and terminal names
    /// (without the reserved end marker), both sorted.
    pub fn symbol_sets(&self) -> (Vec<&str>, Vec<&str>) {
        let mut non_terminals: Vec<&str> =
            self.non_terminal_iter().map(|nt| nt.name.as_str()).collect();
        let mut terminals: Vec<&str> = self
            .terminal_iter()
            .map(|t| t.as_str())
            .filter(|&t| t != super::END_MARK)
            .collect();
        non_terminals.sort_unstable();
        terminals.sort_unstable();
        (non_terminals, terminals)
    }

    pub fn is_nullable_first_follow_valid(&self) -> bool {
        self.nff_valid
    }

    pub(crate) fn require_start(&self) -> Result<usize, String> {
        let start = self
            .start_symbol
            .ok_or_else(|| "start symbol is not declared".to_string())?;
        let has_productions = self.symbols[start]
            .non_terminal()
            .map_or(false, |nt| !nt.productions.is_empty());
        if !has_productions {
            return Err(format!(
                "start symbol {} has no productions",
                self.get_symbol_name(start)
            ));
        }
        Ok(start)
    }
}
