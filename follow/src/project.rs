//! Compilation of several files that depend on each other.

use crate::error::{Error, ProjectError};
use crate::{CompileInfo, Compiler, Deps, Symbols};
use std::sync::Arc;

/// Ordered list of files, where every file may
/// refer to the declarations of the files before it.
///
/// ~~~
/// # use follow::Project;
/// let mut project = Project::new(["logic", "thms"]);
/// project.compile("logic", "type Wff\nterm Wff top").unwrap();
/// let info = project.compile("thms", "axiom triv() { |- top }").unwrap();
/// assert!(info.diagnostics.is_empty());
/// assert!(project.compile("other", "").is_err());
/// ~~~
#[derive(Debug, Default)]
pub struct Project {
    names: Vec<String>,
    /// symbols of every file that was compiled
    files: Vec<Option<Arc<Symbols>>>,
    pub search_limit: Option<usize>,
}

impl Project {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(|n| n.into()).collect();
        let files = names.iter().map(|_| None).collect();
        Self {
            names,
            files,
            search_limit: None,
        }
    }

    fn position(&self, name: &str) -> Result<usize, ProjectError> {
        let pos = self.names.iter().position(|n| n == name);
        pos.ok_or_else(|| ProjectError::UnknownFile(name.to_string()))
    }

    /// Symbols of the compiled files that come before the given file.
    pub fn deps(&self, name: &str) -> Result<Deps, Error> {
        let pos = self.position(name)?;
        Ok(self.files[..pos].iter().flatten().cloned().collect())
    }

    /// Compile a file, replacing any previous result for it.
    ///
    /// Files after it are not recompiled.
    pub fn compile(&mut self, name: &str, text: &str) -> Result<CompileInfo, Error> {
        let mut compiler = Compiler::new(self.deps(name)?);
        if let Some(limit) = self.search_limit {
            compiler.search_limit = limit
        }
        let info = compiler.compile(text);
        let pos = self.position(name)?;
        self.files[pos] = Some(info.symbols.clone());
        Ok(info)
    }

    /// Symbols of a compiled file.
    pub fn get(&self, name: &str) -> Option<&Arc<Symbols>> {
        let pos = self.position(name).ok()?;
        self.files[pos].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use follow_parse::ErrorKind;

    #[test]
    fn order() {
        let mut project = Project::new(["a", "b", "c"]);
        let c = project.compile("c", "type Wff").unwrap();
        assert!(c.diagnostics.is_empty());

        project.compile("a", "type Wff\nterm Wff t").unwrap();
        // redeclaring a name of an earlier file
        let b = project.compile("b", "type Wff").unwrap();
        let kinds: Vec<_> = b.diagnostics.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::DupName]);

        // later files are not visible
        let a = project.compile("a", "axiom x() { |- t2 }").unwrap();
        assert_eq!(a.diagnostics.len(), 1);
        assert!(project.get("a").map_or(false, |s| s.is_empty()));
        assert_eq!(project.deps("c").unwrap().tables().len(), 2);
    }

    #[test]
    fn unknown() {
        let mut project = Project::new(["a"]);
        let err = project.compile("b", "type Wff").err();
        let unknown = Error::Project(ProjectError::UnknownFile("b".into()));
        assert_eq!(err, Some(unknown));
        let msg = project.deps("b").err().map(|e| e.to_string());
        assert_eq!(msg.as_deref(), Some("file b is not part of the project"));
        assert!(project.get("a").is_none());
    }
}
