// Where the catalog lives on disk. There are no flags: the provisioning
// command accepts the database path as its only positional argument.

use std::path::PathBuf;

pub const DEFAULT_DATABASE: &str = "library.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

impl Config {
    /// Build a config from command-line arguments (program name already
    /// skipped). The first argument, if any, selects the database file;
    /// anything after it is ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        match args.into_iter().next() {
            Some(path) if !path.is_empty() => Config {
                database_path: PathBuf::from(path),
            },
            _ => Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_library_db() {
        assert_eq!(Config::from_args(Vec::new()).database_path, PathBuf::from("library.db"));
    }

    #[test]
    fn first_positional_selects_database() {
        let args = vec!["other.db".to_string(), "ignored".to_string()];
        assert_eq!(Config::from_args(args).database_path, PathBuf::from("other.db"));
    }
}
