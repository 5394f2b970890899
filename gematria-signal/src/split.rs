use gematria_core::{Chromosome, Genome};

use crate::errors::{Result, SignalError};

///
/// Check the read length against every chromosome of the genome.
///
/// Fails with a configuration error for a zero read length or for any chromosome shorter
/// than one read, since such a chromosome would have no read start positions.
///
pub fn check_read_length(genome: &Genome, read_length: usize) -> Result<()> {
    if read_length == 0 {
        return Err(SignalError::Configuration(
            "read length must be a positive integer".to_string(),
        ));
    }

    if genome.is_empty() {
        return Err(SignalError::Configuration(
            "genome has no chromosomes".to_string(),
        ));
    }

    for chrom in genome.iter() {
        if chrom.read_starts(read_length as u64).is_none() {
            return Err(SignalError::Configuration(format!(
                "chromosome '{}' ({} bp) is shorter than the read length ({})",
                chrom.name, chrom.length, read_length
            )));
        }
    }

    Ok(())
}

///
/// Walks the genome-wide raw signal and hands out each chromosome's read start values.
///
/// For every chromosome, `length - read_length + 1` values are taken from the cursor, then
/// the cursor moves forward by the full chromosome length. The positions in between belong
/// to reads running past the chromosome end and are skipped.
///
pub struct ChromosomeSplitter<'a> {
    signal: &'a [f64],
    read_length: usize,
    cursor: usize,
}

impl<'a> ChromosomeSplitter<'a> {
    pub fn new(signal: &'a [f64], read_length: usize) -> Result<Self> {
        if read_length == 0 {
            return Err(SignalError::Configuration(
                "read length must be a positive integer".to_string(),
            ));
        }

        Ok(ChromosomeSplitter {
            signal,
            read_length,
            cursor: 0,
        })
    }

    /// Current position in the raw signal.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn next_chromosome(&mut self, chrom: &Chromosome) -> Result<&'a [f64]> {
        let reads = chrom
            .read_starts(self.read_length as u64)
            .ok_or_else(|| {
                SignalError::Configuration(format!(
                    "chromosome '{}' ({} bp) is shorter than the read length ({})",
                    chrom.name, chrom.length, self.read_length
                ))
            })? as usize;

        let start = self.cursor;
        let end = start + reads;
        if end > self.signal.len() {
            return Err(SignalError::SignalTooShort {
                chrom: chrom.name.clone(),
                start,
                end,
                available: self.signal.len(),
            });
        }

        self.cursor += chrom.length as usize;

        Ok(&self.signal[start..end])
    }
}

///
/// Split the raw signal for every chromosome of the genome, in genome order.
///
/// All slices are resolved up front so a raw signal that does not cover the genome is
/// reported before any output is produced.
///
pub fn split_signal<'a, 'g>(
    signal: &'a [f64],
    genome: &'g Genome,
    read_length: usize,
) -> Result<Vec<(&'g Chromosome, &'a [f64])>> {
    let mut splitter = ChromosomeSplitter::new(signal, read_length)?;

    genome
        .iter()
        .map(|chrom| splitter.next_chromosome(chrom).map(|slice| (chrom, slice)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn genome() -> Genome {
        Genome::new(vec![
            Chromosome::new("chr2", 6),
            Chromosome::new("chr1", 8),
        ])
        .unwrap()
    }

    #[rstest]
    fn test_split_advances_by_chromosome_length(genome: Genome) {
        // chr1 (8 bp) comes first: positions 0..8, chr2: positions 8..14
        let signal: Vec<f64> = (0..14).map(|i| i as f64).collect();

        let slices = split_signal(&signal, &genome, 3).unwrap();

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].0.name, "chr1");
        assert_eq!(slices[0].1, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(slices[1].0.name, "chr2");
        assert_eq!(slices[1].1, &[8.0, 9.0, 10.0, 11.0]);
    }

    #[rstest]
    fn test_splitter_cursor(genome: Genome) {
        let signal = vec![0.0; 14];
        let mut splitter = ChromosomeSplitter::new(&signal, 3).unwrap();

        for chrom in genome.iter() {
            let before = splitter.cursor();
            let slice = splitter.next_chromosome(chrom).unwrap();
            assert_eq!(slice.len() as u64, chrom.length - 3 + 1);
            assert_eq!((splitter.cursor() - before) as u64, chrom.length);
        }
    }

    #[rstest]
    fn test_last_chromosome_needs_only_its_read_starts(genome: Genome) {
        // 8 + (6 - 3 + 1) = 12 values are enough
        let signal = vec![1.0; 12];
        assert!(split_signal(&signal, &genome, 3).is_ok());

        let signal = vec![1.0; 11];
        let result = split_signal(&signal, &genome, 3);
        assert!(matches!(
            result,
            Err(SignalError::SignalTooShort { ref chrom, start: 8, end: 12, available: 11 }) if chrom == "chr2"
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    fn test_check_read_length_rejects(genome: Genome, #[case] read_length: usize) {
        let result = check_read_length(&genome, read_length);
        assert!(matches!(result, Err(SignalError::Configuration(_))));
    }

    #[rstest]
    fn test_check_read_length_accepts_equal_length(genome: Genome) {
        assert!(check_read_length(&genome, 6).is_ok());
    }
}
