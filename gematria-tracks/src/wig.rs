use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::format::TrackFormat;
use crate::writer::{TrackWriter, check_run, chrom_id};

///
/// fixedStep wiggle output.
///
/// A `fixedStep chrom=.. start=.. step=1 span=..` header opens a block whenever the
/// chromosome or the span differs from the previous run written by this writer; runs that
/// keep both continue the open block as bare values, each covering the next `span` bases.
///
pub struct WigWriter {
    path: PathBuf,
    buf: BufWriter<File>,
    block: Option<(u64, String)>,
}

impl WigWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        Ok(WigWriter {
            path: path.to_path_buf(),
            buf: BufWriter::new(file),
            block: None,
        })
    }

    fn continues_block(&self, chrom: &str, span: u64) -> bool {
        matches!(&self.block, Some((s, c)) if *s == span && c == chrom)
    }
}

impl TrackWriter for WigWriter {
    fn format(&self) -> TrackFormat {
        TrackFormat::Wig
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn append(&mut self, chrom: &str, start: u64, span: u64, value: i32) -> Result<()> {
        check_run(chrom, start, span)?;
        let chrom = chrom_id(chrom);

        if !self.continues_block(chrom, span) {
            writeln!(
                self.buf,
                "fixedStep chrom={} start={} step=1 span={}",
                chrom, start, span
            )?;
            self.block = Some((span, chrom.to_string()));
        }

        writeln!(self.buf, "{}", value)?;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<PathBuf> {
        self.buf.flush()?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use gematria_signal::ScoreTrack;

    /// Rebuild per-chromosome scores from fixedStep blocks where each value covers `span` bases.
    fn decode_wig(content: &str) -> HashMap<String, Vec<i32>> {
        let mut tracks: HashMap<String, Vec<i32>> = HashMap::new();
        let mut chrom = String::new();
        let mut span = 0usize;

        for line in content.lines() {
            if let Some(header) = line.strip_prefix("fixedStep ") {
                for field in header.split_whitespace() {
                    let (key, value) = field.split_once('=').unwrap();
                    match key {
                        "chrom" => chrom = value.to_string(),
                        "span" => span = value.parse().unwrap(),
                        "start" => {
                            let start: usize = value.parse().unwrap();
                            let track = tracks.entry(chrom.clone()).or_default();
                            assert_eq!(track.len() + 1, start);
                        }
                        _ => {}
                    }
                }
                continue;
            }
            let value: i32 = line.parse().unwrap();
            let track = tracks.entry(chrom.clone()).or_default();
            track.extend(std::iter::repeat_n(value, span));
        }

        tracks
    }

    #[rstest]
    fn test_wig_blocks() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.wig");

        let mut writer: Box<dyn TrackWriter> = Box::new(WigWriter::create(&path).unwrap());
        writer
            .write_track("chr1 desc", &ScoreTrack::from_scores(vec![10, 20, 20, 30, 30, 40]))
            .unwrap();
        writer
            .write_track("chr2", &ScoreTrack::from_scores(vec![5, 5]))
            .unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "fixedStep chrom=chr1 start=1 step=1 span=1\n10\n\
             fixedStep chrom=chr1 start=2 step=1 span=2\n20\n30\n\
             fixedStep chrom=chr1 start=6 step=1 span=1\n40\n\
             fixedStep chrom=chr2 start=1 step=1 span=2\n5\n"
        );
    }

    #[rstest]
    fn test_same_span_on_new_chromosome_opens_block() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.wig");

        let mut writer = WigWriter::create(&path).unwrap();
        writer.append("chr1", 1, 3, 7).unwrap();
        writer.append("chr2", 1, 3, 7).unwrap();
        Box::new(writer).finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("fixedStep").count(), 2);
    }

    #[rstest]
    fn test_wig_round_trip() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.wig");

        let chr1: Vec<i32> = (0..300).map(|i| ((i / 5) % 4) * 25).collect();
        let chr2: Vec<i32> = (0..120).map(|i| if i % 2 == 0 { 100 } else { 90 }).collect();

        let mut writer: Box<dyn TrackWriter> = Box::new(WigWriter::create(&path).unwrap());
        writer
            .write_track("chr1", &ScoreTrack::from_scores(chr1.clone()))
            .unwrap();
        writer
            .write_track("chr2", &ScoreTrack::from_scores(chr2.clone()))
            .unwrap();
        let written = writer.finish().unwrap();
        assert_eq!(written, path);

        let decoded = decode_wig(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(decoded["chr1"], chr1);
        assert_eq!(decoded["chr2"], chr2);
    }

    #[rstest]
    fn test_zero_span_is_rejected() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut writer = WigWriter::create(&tempdir.path().join("out.wig")).unwrap();

        assert!(writer.append("chr1", 1, 0, 7).is_err());
    }
}
