//! Tables of compiled declarations.

use crate::error::SymbolsError as Error;
use crate::Decl;
use fnv::FnvHashMap;

/// Declarations of one file, in order of introduction.
#[derive(Debug, Default)]
pub struct Symbols {
    decls: Vec<Decl>,
    idx: FnvHashMap<String, usize>,
}

impl Symbols {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, name: &str) -> Option<&Decl> {
        self.idx.get(name).map(|i| &self.decls[*i])
    }

    /// Introduce a declaration, failing if its name is already taken.
    pub fn insert(&mut self, decl: Decl) -> Result<(), Error> {
        let name = decl.name().text.clone();
        if self.idx.contains_key(&name) {
            return Err(Error::Reinsertion(name));
        }
        log::debug!("Introduce symbol {}", name);
        self.idx.insert(name, self.decls.len());
        self.decls.push(decl);
        Ok(())
    }

    /// All declarations in order of introduction.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Axioms and theorems whose name starts with `prefix`.
    pub fn search<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Decl> + 'a {
        self.decls
            .iter()
            .filter(move |d| d.as_rule().is_some() && d.name().text.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::TypeDecl;
    use crate::term::tests::tok;
    use follow_parse::Range;
    use std::sync::Arc;

    fn ty(name: &str) -> Decl {
        let name = tok(name);
        Decl::Type(Arc::new(TypeDecl {
            name,
            range: Range::default(),
        }))
    }

    #[test]
    fn reinsert() {
        let mut syms = Symbols::new();
        assert!(syms.insert(ty("Wff")).is_ok());
        assert!(syms.insert(ty("Set")).is_ok());
        assert_eq!(
            syms.insert(ty("Wff")),
            Err(Error::Reinsertion("Wff".to_string()))
        );
        assert_eq!(syms.len(), 2);
        assert_eq!(syms.get("Set").map(|d| d.name().text.as_str()), Some("Set"));
        assert_eq!(syms.search("W").count(), 0);
    }
}
