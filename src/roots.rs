//! Root hints (spec.md §4.D): an embedded `named.root`-format text file,
//! parsed at startup into the iterative resolver's bootstrap pool.
//!
//! Grounded on `namedroot.go` in `original_source` (`init()` parsing
//! whitespace-tokenized lines, skipping `;` comments, keeping only
//! 4-token lines whose third token is `A`).

use rand::seq::SliceRandom;

const NAMED_ROOT: &str = include_str!("../assets/named.root");

/// The parsed pool of root server IPv4 addresses.
pub struct RootHints {
    addresses: Vec<String>,
}

impl Default for RootHints {
    fn default() -> Self {
        Self::parse(NAMED_ROOT)
    }
}

impl RootHints {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut addresses = Vec::new();
        for line in text.lines() {
            let line = match line.find(';') {
                Some(idx) => &line[..idx],
                None => line,
            };
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() == 4 && tokens[2] == "A" {
                addresses.push(tokens[3].to_string());
            }
        }
        assert!(!addresses.is_empty(), "root hints pool must not be empty");
        Self { addresses }
    }

    /// A uniformly random root hint address, used as the iterative
    /// resolver's starting `next_server` (spec.md §4.H).
    #[must_use]
    pub fn random_pick(&self) -> &str {
        self.addresses
            .choose(&mut rand::thread_rng())
            .expect("pool is non-empty by construction")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_file_parses_to_a_nonempty_pool() {
        let hints = RootHints::default();
        assert!(!hints.is_empty());
        assert!(hints.len() >= 13);
    }

    #[test]
    fn only_a_lines_contribute() {
        let hints = RootHints::parse(
            ".  3600000  NS  A.ROOT-SERVERS.NET.\nA.ROOT-SERVERS.NET.  3600000  A  198.41.0.4\n",
        );
        assert_eq!(hints.len(), 1);
        assert_eq!(hints.random_pick(), "198.41.0.4");
    }
}
