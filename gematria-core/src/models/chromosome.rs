use std::fmt::{self, Display};

/// A reference sequence as declared by its FASTA header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    /// Identifier: the header text up to the first whitespace.
    pub name: String,
    /// The full header text, free-text descriptor included.
    pub description: String,
    /// Number of bases.
    pub length: u64,
}

impl Chromosome {
    pub fn new(header: &str, length: u64) -> Self {
        let description = header.trim().to_string();
        let name = description
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        Chromosome {
            name,
            description,
            length,
        }
    }

    ///
    /// Number of read start positions on this chromosome, i.e. `length - read_length + 1`.
    ///
    /// Returns `None` when the chromosome is shorter than a single read.
    ///
    pub fn read_starts(&self, read_length: u64) -> Option<u64> {
        if read_length == 0 || self.length < read_length {
            return None;
        }
        Some(self.length - read_length + 1)
    }
}

impl Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
