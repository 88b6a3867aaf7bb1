use rustc_hash::FxHashMap;

use crate::semantics::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub sem_type: Type,
    pub is_const_expr: bool,
}

impl Symbol {
    pub fn new(name: impl Into<String>, sem_type: Type) -> Self {
        Self {
            name: name.into(),
            sem_type,
            is_const_expr: false,
        }
    }
}

/// Name-keyed symbol storage. `insert` rejects an existing name instead of
/// updating it; redefinition is the caller's error to report.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: FxHashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) -> bool {
        if self.entries.contains_key(&symbol.name) {
            return false;
        }
        self.entries.insert(symbol.name.clone(), symbol);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Symbol> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    /// Entries sorted by name, for deterministic dumps.
    pub fn sorted(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.entries.values().collect();
        symbols.sort_by(|a, b| a.name.cmp(&b.name));
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str) -> Symbol {
        Symbol::new(name, Type::primitive("i32", false))
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut table = SymbolTable::new();
        assert!(table.insert(symbol("x")));
        assert!(!table.insert(symbol("x")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_and_remove() {
        let mut table = SymbolTable::new();
        table.insert(symbol("x"));

        assert_eq!(table.get("x").map(|s| s.name.as_str()), Some("x"));
        assert!(table.get("y").is_none());

        let removed = table.remove("x").expect("x should be present");
        assert_eq!(removed.sem_type.to_string(), "i32");
        assert!(table.is_empty());
        // Freed slot accepts the name again.
        assert!(table.insert(symbol("x")));
    }

    #[test]
    fn test_sorted_iteration() {
        let mut table = SymbolTable::new();
        table.insert(symbol("zeta"));
        table.insert(symbol("alpha"));
        table.insert(symbol("mid"));

        let names: Vec<&str> = table.sorted().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
