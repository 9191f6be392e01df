//! Command-line flags and the operation they select.

use bob_index::Defaults;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Remove entries whose directory is gone
    Clean,
    /// Exit 2 if the name is already indexed
    Predir,
    /// Index release directories below the scan path
    Scan,
    /// Substring search over release names
    Search,
    /// Index a single release
    Add,
    /// Remove a single release
    Delete,
}

#[derive(Parser, Debug)]
#[command(name = "bob-index")]
#[command(about = "Searchable index of glftpd release directories")]
pub struct Args {
    /// Mode selection
    #[arg(short = 'M', long, value_enum, default_value = "search")]
    pub mode: Mode,

    /// Location of the database, inside the gl root
    #[arg(short = 'D', long, default_value = Defaults::DB_PATH)]
    pub db_path: PathBuf,

    /// glftpd root path
    #[arg(short = 'G', long, default_value = Defaults::GL_ROOT)]
    pub gl_root: PathBuf,

    /// Scan path (inside the site directory)
    #[arg(short = 'P', long, default_value = Defaults::SCAN_PATH)]
    pub scan_path: String,

    /// Limit number of search results
    #[arg(short = 'L', long, default_value_t = Defaults::SEARCH_LIMIT)]
    pub limit: usize,

    /// Search string
    #[arg(short = 's', long, default_value = Defaults::SEARCH_STRING)]
    pub search_string: String,

    /// Path for individual add or delete
    #[arg(short = 'p', long, default_value = Defaults::ENTRY_PATH)]
    pub path: String,

    /// Name of release for individual add or delete
    #[arg(short = 'n', long, default_value = Defaults::ENTRY_NAME)]
    pub name: String,

    /// Case-sensitive name matching for predir
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print search results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One operation with exactly the parameters it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Clean,
    Predir { name: &'a str, case_sensitive: bool },
    Scan { scan_path: &'a str },
    Search { query: &'a str, limit: usize },
    Add { path: &'a str, name: &'a str },
    Delete { path: &'a str, name: &'a str },
}

impl Args {
    pub fn command(&self) -> Command<'_> {
        match self.mode {
            Mode::Clean => Command::Clean,
            Mode::Predir => Command::Predir {
                name: &self.search_string,
                case_sensitive: self.case_sensitive,
            },
            Mode::Scan => Command::Scan {
                scan_path: &self.scan_path,
            },
            Mode::Search => Command::Search {
                query: &self.search_string,
                limit: self.limit,
            },
            Mode::Add => Command::Add {
                path: &self.path,
                name: &self.name,
            },
            Mode::Delete => Command::Delete {
                path: &self.path,
                name: &self.name,
            },
        }
    }
}
