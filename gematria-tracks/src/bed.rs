use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::format::TrackFormat;
use crate::writer::{TrackWriter, check_run, chrom_id};

///
/// bed9 interval output, one line per run.
///
/// Coordinates are 0-based half-open and repeated as thick start/end. The item color is a
/// shade of blue that darkens as the score rises: `c,c,255` with
/// `c = 255 - round(255 * score / 100)`.
///
pub struct BedWriter {
    path: PathBuf,
    buf: BufWriter<File>,
}

impl BedWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        Ok(BedWriter {
            path: path.to_path_buf(),
            buf: BufWriter::new(file),
        })
    }
}

/// Red and green channel of the item color; scores outside 0..=100 are not clamped.
pub fn score_shade(value: i32) -> i64 {
    255 - (255.0 * value as f64 / 100.0).round_ties_even() as i64
}

impl TrackWriter for BedWriter {
    fn format(&self) -> TrackFormat {
        TrackFormat::Bed
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn append(&mut self, chrom: &str, start: u64, span: u64, value: i32) -> Result<()> {
        check_run(chrom, start, span)?;

        let start = start - 1;
        let end = start + span;
        let shade = score_shade(value);

        writeln!(
            self.buf,
            "{}\t{}\t{}\t.\t{}\t.\t{}\t{}\t{},{},255",
            chrom_id(chrom),
            start,
            end,
            value,
            start,
            end,
            shade,
            shade
        )?;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<PathBuf> {
        self.buf.flush()?;
        Ok(self.path)
    }
}
