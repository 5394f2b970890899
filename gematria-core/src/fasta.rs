use std::io::BufRead;
use std::path::Path;

use log::warn;

use crate::errors::{CoreError, Result};
use crate::models::Chromosome;
use crate::utils::get_dynamic_reader;

///
/// Scan a FASTA file and return one [`Chromosome`] per record, in file order.
///
/// Only headers and line lengths are looked at; the sequence itself is never kept.
/// Blank lines are ignored and records without any bases are dropped.
///
/// # Arguments
/// - path: path to a FASTA file, optionally gzipped (`.gz`)
///
pub fn scan_fasta(path: &Path) -> Result<Vec<Chromosome>> {
    let reader = get_dynamic_reader(path)?;

    let mut chromosomes: Vec<Chromosome> = Vec::new();
    let mut current: Option<(String, u64)> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches(['\n', '\r']);

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some((header, length)) = current.take() {
                push_record(&mut chromosomes, &header, length);
            }
            current = Some((header.to_string(), 0));
            continue;
        }

        match current.as_mut() {
            Some((_, length)) => *length += line.len() as u64,
            None => return Err(CoreError::MissingHeader(path.display().to_string())),
        }
    }

    if let Some((header, length)) = current.take() {
        push_record(&mut chromosomes, &header, length);
    }

    if chromosomes.is_empty() {
        return Err(CoreError::EmptyFasta(path.display().to_string()));
    }

    Ok(chromosomes)
}

fn push_record(chromosomes: &mut Vec<Chromosome>, header: &str, length: u64) {
    if length == 0 {
        warn!("Skipping FASTA record without sequence: '{}'", header);
        return;
    }
    chromosomes.push(Chromosome::new(header, length));
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const FASTA: &str = ">chr1 first chromosome\nACGTACGTAC\nACGT\n\n>chrEmpty\n>chr2\nAAAAA\r\nCC\n";

    fn write_fasta(dir: &Path, name: &str, gzip: bool) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        if gzip {
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(FASTA.as_bytes()).unwrap();
            encoder.finish().unwrap();
        } else {
            let mut file = file;
            file.write_all(FASTA.as_bytes()).unwrap();
        }
        path
    }

    #[rstest]
    #[case("genome.fa", false)]
    #[case("genome.fa.gz", true)]
    fn test_scan_fasta(#[case] name: &str, #[case] gzip: bool) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = write_fasta(tempdir.path(), name, gzip);

        let chromosomes = scan_fasta(&path).unwrap();

        assert_eq!(chromosomes.len(), 2);
        assert_eq!(chromosomes[0].name, "chr1");
        assert_eq!(chromosomes[0].description, "chr1 first chromosome");
        assert_eq!(chromosomes[0].length, 14);
        assert_eq!(chromosomes[1].name, "chr2");
        assert_eq!(chromosomes[1].length, 7);
    }

    #[rstest]
    fn test_scan_fasta_without_header() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("bad.fa");
        std::fs::write(&path, "ACGT\n>chr1\nACGT\n").unwrap();

        assert!(matches!(scan_fasta(&path), Err(CoreError::MissingHeader(_))));
    }

    #[rstest]
    fn test_scan_empty_fasta() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("empty.fa");
        std::fs::write(&path, "\n\n").unwrap();

        assert!(matches!(scan_fasta(&path), Err(CoreError::EmptyFasta(_))));
    }

    #[rstest]
    fn test_scan_missing_file() {
        let result = scan_fasta(Path::new("does/not/exist.fa"));
        assert!(matches!(result, Err(CoreError::FileReadError(_))));
    }
}
