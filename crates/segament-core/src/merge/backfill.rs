use tracing::debug;

use crate::chart::Song;

#[derive(Debug, Clone)]
pub struct BackfillOutcome {
    pub songs: Vec<Song>,
    /// Number of charts that received a level-derived constant.
    pub applied: usize,
}

/// Give every chart without a constant the lower bound of its display level.
///
/// `"12+"` becomes `12.5` and `"12"` becomes `12.0`. This is an approximation
/// for charts that only ever get a human-entered level. Levels that do not
/// parse (`"☆4"`) are left alone.
pub fn backfill(songs: &[Song]) -> BackfillOutcome {
    let mut songs = songs.to_vec();
    let mut applied = 0;

    for song in &mut songs {
        for (difficulty, chart) in song.data.iter_mut() {
            if !chart.constant_is_unset() {
                continue;
            }
            let Some(level) = chart.level.as_ref().filter(|l| !l.is_blank()) else {
                continue;
            };
            let Some(constant) = level.as_number() else {
                continue;
            };

            debug!(
                "    - {} [{}]: constant {} from level",
                song.meta.title, difficulty, constant
            );
            chart.constant = Some(constant);
            chart.is_const_unknown = false;
            applied += 1;
        }
    }

    BackfillOutcome { songs, applied }
}
