use super::{Grammar, EPSILON};

impl Grammar {
    /// Rewrites every directly left-recursive non-terminal
    /// `A -> A α | β` into `A -> β A'` and `A' -> α A' | ε`, in place.
    ///
    /// The tail non-terminal `A'` comes from the prime allocator, so it
    /// never collides with a user symbol. Production order is preserved.
    /// Indirect left recursion (through another non-terminal) is a
    /// precondition violation and is not detected here.
    pub fn eliminate_left_recursion(&mut self) -> Result<(), String> {
        self.require_start()?;
        let epsilon_idx = self.symbol_table[EPSILON];
        self.nff_valid = false;

        let indices: Vec<usize> = self.non_terminal_iter().map(|nt| nt.index).collect();
        for idx in indices {
            let nt = self.symbols[idx].mut_non_terminal().unwrap();
            let name = nt.name.clone();

            let mut alternatives: Vec<Vec<usize>> = Vec::new();
            let mut recursive: Vec<Vec<usize>> = Vec::new();
            for mut production in std::mem::take(&mut nt.productions) {
                if production.first() == Some(&idx) {
                    production.remove(0);
                    recursive.push(production);
                } else {
                    alternatives.push(production);
                }
            }

            if recursive.is_empty() {
                self.symbols[idx].mut_non_terminal().unwrap().productions = alternatives;
                continue;
            }
            if alternatives.is_empty() {
                return Err(format!(
                    "{} is left recursive and has no non-recursive alternative",
                    name
                ));
            }

            let tail_name = self.get_symbol_prime_name(name);
            let tail_idx = self.add_non_terminal(&tail_name);
            for production in alternatives.iter_mut().chain(recursive.iter_mut()) {
                production.push(tail_idx);
            }
            recursive.push(vec![epsilon_idx]);

            self.symbols[idx].mut_non_terminal().unwrap().productions = alternatives;
            self.symbols[tail_idx].mut_non_terminal().unwrap().productions = recursive;
        }

        Ok(())
    }
}
