use crate::game::song::SongData;
use rustc_hash::FxHashSet;

/// Decides whether a song may be browsed in the edit menu.
pub trait VisibilityPolicy {
    fn is_song_visible(&self, song: &SongData) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ShowAll;

impl VisibilityPolicy for ShowAll {
    fn is_song_visible(&self, _song: &SongData) -> bool {
        true
    }
}

/// Hides songs the player has not unlocked yet. Keys are `group/title`, compared
/// case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct UnlockList {
    locked: FxHashSet<String>,
}

impl UnlockList {
    pub fn new<I, S>(locked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locked = locked
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { locked }
    }

    /// Parses the comma separated `LockedSongs` config value.
    pub fn from_config_value(value: &str) -> Self {
        Self::new(value.split(','))
    }

    pub fn is_locked(&self, song: &SongData) -> bool {
        self.locked.contains(&song.unlock_key().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.locked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked.is_empty()
    }
}

impl VisibilityPolicy for UnlockList {
    fn is_song_visible(&self, song: &SongData) -> bool {
        !self.is_locked(song)
    }
}
