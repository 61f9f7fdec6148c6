use crate::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;

/// Name and contents of a file.
pub struct PathRead {
    pub path: String,
    pub text: String,
}

impl TryFrom<&PathBuf> for PathRead {
    type Error = Error;

    fn try_from(pb: &PathBuf) -> Result<Self, Self::Error> {
        let mut text = String::new();
        let path = if pb.as_os_str() == "-" {
            io::stdin().read_to_string(&mut text)?;
            String::from("<stdin>")
        } else {
            std::fs::File::open(pb)?.read_to_string(&mut text)?;
            pb.display().to_string()
        };
        Ok(Self { path, text })
    }
}

impl PathRead {
    /// Read the given files in order.
    pub fn from_pathbufs(files: &[PathBuf]) -> impl Iterator<Item = Result<Self, Error>> + '_ {
        files.iter().map(Self::try_from)
    }
}
