use crate::game::chart::ChartData;
use crate::game::song::SongData;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerSide {
    #[default]
    P1,
    #[allow(dead_code)]
    P2,
}

impl PlayerSide {
    const fn index(self) -> usize {
        match self {
            Self::P1 => 0,
            Self::P2 => 1,
        }
    }
}

/// Song and charts the outer application currently has selected.
pub trait CurrentContext {
    fn current_song(&self) -> Option<Arc<SongData>>;
    fn current_steps(&self, side: PlayerSide) -> Option<Arc<ChartData>>;
}

#[derive(Default)]
struct Current {
    song: Option<Arc<SongData>>,
    steps: [Option<Arc<ChartData>>; 2],
}

#[derive(Default)]
pub struct Session {
    current: Mutex<Current>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Changing the song also drops any chart selections made for the old one.
    pub fn set_current_song(&self, song: Option<Arc<SongData>>) {
        let mut cur = self.current.lock().unwrap();
        cur.song = song;
        cur.steps = [None, None];
    }

    pub fn set_current_steps(&self, side: PlayerSide, steps: Option<Arc<ChartData>>) {
        self.current.lock().unwrap().steps[side.index()] = steps;
    }
}

impl CurrentContext for Session {
    fn current_song(&self) -> Option<Arc<SongData>> {
        self.current.lock().unwrap().song.clone()
    }

    fn current_steps(&self, side: PlayerSide) -> Option<Arc<ChartData>> {
        self.current.lock().unwrap().steps[side.index()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{CurrentContext, PlayerSide, Session};
    use crate::game::chart::{ChartData, Difficulty};
    use crate::game::song::SongData;
    use std::sync::Arc;

    #[test]
    fn changing_song_clears_steps() {
        let session = Session::new();
        let song = Arc::new(SongData::with_charts("G", "S", vec![]));
        session.set_current_song(Some(song.clone()));
        session.set_current_steps(
            PlayerSide::P1,
            Some(Arc::new(ChartData {
                chart_type: "dance-single".to_string(),
                difficulty: Difficulty::Hard,
                description: String::new(),
                meter: 9,
                step_artist: String::new(),
                short_hash: "abc".to_string(),
            })),
        );
        assert!(session.current_steps(PlayerSide::P1).is_some());
        assert!(session.current_steps(PlayerSide::P2).is_none());

        session.set_current_song(Some(song));
        assert!(session.current_song().is_some());
        assert!(session.current_steps(PlayerSide::P1).is_none());
    }
}
