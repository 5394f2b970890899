use std::collections::HashSet;
use std::path::Path;

use crate::errors::{CoreError, Result};
use crate::fasta::scan_fasta;
use crate::models::Chromosome;

///
/// The ordered set of chromosomes a track is built over.
///
/// Chromosomes are kept sorted by length, longest first; chromosomes of equal length keep
/// the order in which they were first seen. This order is fixed at construction and is the
/// order in which the raw signal is split and in which every track writer receives data.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    chromosomes: Vec<Chromosome>,
}

impl Genome {
    pub fn new(mut chromosomes: Vec<Chromosome>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for chrom in chromosomes.iter() {
            if !seen.insert(chrom.name.as_str()) {
                return Err(CoreError::DuplicateChromosome(chrom.name.clone()));
            }
        }

        // stable sort: ties stay in first-seen order
        chromosomes.sort_by(|a, b| b.length.cmp(&a.length));

        Ok(Genome { chromosomes })
    }

    ///
    /// Build a genome from the headers of a (optionally gzipped) FASTA file.
    ///
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        let chromosomes = scan_fasta(path.as_ref())?;
        Genome::new(chromosomes)
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Chromosome> {
        self.chromosomes.iter().find(|c| c.name == name)
    }

    /// Total number of bases over all chromosomes.
    pub fn total_length(&self) -> u64 {
        self.chromosomes.iter().map(|c| c.length).sum()
    }
}

impl<'a> IntoIterator for &'a Genome {
    type Item = &'a Chromosome;
    type IntoIter = std::slice::Iter<'a, Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}
