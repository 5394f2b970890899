///
/// A maximal stretch of equal consecutive scores.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// 1-based position of the first base.
    pub start: u64,
    pub span: u64,
    pub value: i32,
}

impl Run {
    /// 0-based, half-open end.
    pub fn end(&self) -> u64 {
        self.start - 1 + self.span
    }
}

///
/// Iterate the runs of equal consecutive values of `scores`, left to right.
///
/// Pass the scores without the track's trailing sentinel; the final run is always
/// closed at the end of the slice.
///
pub fn runs(scores: &[i32]) -> Runs<'_> {
    Runs { scores, pos: 0 }
}

pub struct Runs<'a> {
    scores: &'a [i32],
    pos: usize,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.scores.get(self.pos)?;
        let span = self.scores[self.pos..]
            .iter()
            .take_while(|&&v| v == value)
            .count();

        let run = Run {
            start: self.pos as u64 + 1,
            span: span as u64,
            value,
        };
        self.pos += span;

        Some(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use gematria_signal::{SENTINEL, ScoreTrack};

    #[rstest]
    fn test_runs() {
        let result: Vec<Run> = runs(&[0, 0, 5, 5, 5, 0, 7]).collect();
        assert_eq!(
            result,
            vec![
                Run { start: 1, span: 2, value: 0 },
                Run { start: 3, span: 3, value: 5 },
                Run { start: 6, span: 1, value: 0 },
                Run { start: 7, span: 1, value: 7 },
            ]
        );
    }

    #[rstest]
    fn test_constant_track_is_one_run() {
        let track = ScoreTrack::from_scores(vec![100; 91]);
        let result: Vec<Run> = runs(track.scores()).collect();

        assert_eq!(result, vec![Run { start: 1, span: 91, value: 100 }]);
        assert_eq!(result[0].end(), 91);
    }

    #[rstest]
    fn test_trailing_score_equal_to_sentinel_is_kept() {
        let track = ScoreTrack::from_scores(vec![3, SENTINEL, SENTINEL]);
        let result: Vec<Run> = runs(track.scores()).collect();

        assert_eq!(
            result,
            vec![
                Run { start: 1, span: 1, value: 3 },
                Run { start: 2, span: 2, value: SENTINEL },
            ]
        );
    }

    #[rstest]
    fn test_spans_cover_track() {
        let scores: Vec<i32> = (0..1000).map(|i| (i / 7 % 3) as i32 * 50).collect();
        let total: u64 = runs(&scores).map(|r| r.span).sum();
        assert_eq!(total, scores.len() as u64);
    }

    #[rstest]
    fn test_empty_scores() {
        assert_eq!(runs(&[]).count(), 0);
    }
}
