use crate::domain::Symbol;
use crate::ValidationError;

/// Ordered, de-duplicated symbol universe for one run.
///
/// Built from configuration, never baked into the core. Iteration order
/// drives both the fetch loop and the report sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRegistry {
    symbols: Vec<Symbol>,
}

impl SymbolRegistry {
    /// Validate every name; duplicates collapse to their first occurrence.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ValidationError> {
        let mut symbols: Vec<Symbol> = Vec::with_capacity(names.len());
        for name in names {
            let symbol = Symbol::parse(name.as_ref())?;
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        if symbols.is_empty() {
            return Err(ValidationError::EmptyRegistry);
        }

        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_drops_duplicates() {
        let registry =
            SymbolRegistry::from_names(&["TCS.NS", "INFY.NS", "tcs.ns"]).expect("must build");
        let names: Vec<&str> = registry.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["TCS.NS", "INFY.NS"]);
    }

    #[test]
    fn rejects_empty_registry() {
        let names: [&str; 0] = [];
        let err = SymbolRegistry::from_names(&names).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyRegistry));
    }

    #[test]
    fn rejects_malformed_symbol() {
        let err = SymbolRegistry::from_names(&["TCS.NS", ""]).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptySymbol));
    }
}
