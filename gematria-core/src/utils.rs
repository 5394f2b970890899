use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{CoreError, Result};
use crate::models::Genome;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| CoreError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Write the chromosome-sizes side file: one `name<TAB>length` line per chromosome,
/// in genome order.
///
pub fn write_chrom_sizes<P: AsRef<Path>>(path: P, genome: &Genome) -> Result<()> {
    let mut buf = BufWriter::new(File::create(path.as_ref())?);
    for chrom in genome.iter() {
        writeln!(buf, "{}\t{}", chrom.name, chrom.length)?;
    }
    buf.flush()?;
    Ok(())
}

///
/// Read a chromosome-sizes file, e.g. `chr1 248956422`, keeping file order.
///
/// Columns may be separated by tabs or spaces; blank lines are skipped.
///
pub fn read_chrom_sizes<P: AsRef<Path>>(path: P) -> Result<Vec<(String, u64)>> {
    let reader = get_dynamic_reader(path.as_ref())?;
    let mut sizes = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let name = fields.next().ok_or_else(|| CoreError::ChromSizesParseError {
            line: index + 1,
            reason: "missing chromosome name".to_string(),
        })?;
        let size = fields
            .next()
            .ok_or_else(|| CoreError::ChromSizesParseError {
                line: index + 1,
                reason: "missing size".to_string(),
            })?
            .parse::<u64>()
            .map_err(|e| CoreError::ChromSizesParseError {
                line: index + 1,
                reason: e.to_string(),
            })?;

        sizes.push((name.to_string(), size));
    }

    Ok(sizes)
}
