//! Common error type.

use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum SymbolsError {
    Reinsertion(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum ProjectError {
    /// the file is not part of the project
    UnknownFile(String),
}

/// Common error type.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Symbols(SymbolsError),
    Project(ProjectError),
}

impl From<SymbolsError> for Error {
    fn from(err: SymbolsError) -> Self {
        Self::Symbols(err)
    }
}

impl From<ProjectError> for Error {
    fn from(err: ProjectError) -> Self {
        Self::Project(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Symbols(SymbolsError::Reinsertion(name)) => {
                write!(f, "symbol {} introduced twice", name)
            }
            Self::Project(ProjectError::UnknownFile(name)) => {
                write!(f, "file {} is not part of the project", name)
            }
        }
    }
}
