use crate::game::chart::ChartData;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct SongData {
    pub group_name: String,
    pub title: String,
    pub subtitle: String,
    pub translit_title: String,
    pub artist: String,
    pub banner_path: Option<PathBuf>,
    pub charts: Vec<Arc<ChartData>>,
}

#[derive(Clone, Debug)]
pub struct SongPack {
    pub group_name: String,
    pub name: String,
    pub banner_path: Option<PathBuf>,
    pub songs: Vec<Arc<SongData>>,
}

impl SongData {
    pub fn with_charts(group_name: &str, title: &str, charts: Vec<ChartData>) -> Self {
        Self {
            group_name: group_name.to_string(),
            title: title.to_string(),
            subtitle: String::new(),
            translit_title: String::new(),
            artist: String::new(),
            banner_path: None,
            charts: charts.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn display_title(&self, translit: bool) -> &str {
        if translit && !self.translit_title.trim().is_empty() {
            self.translit_title.as_str()
        } else {
            self.title.as_str()
        }
    }

    pub fn display_full_title(&self, translit: bool) -> String {
        let title = self.display_title(translit);
        if self.subtitle.trim().is_empty() {
            title.to_string()
        } else {
            format!("{title} {}", self.subtitle)
        }
    }

    /// Key used by unlock lists: `group/title`.
    pub fn unlock_key(&self) -> String {
        format!("{}/{}", self.group_name, self.title)
    }
}

/// Read-only view of the song database the edit menu browses.
pub trait SongRepository {
    fn group_names(&self) -> Vec<String>;
    fn songs_in_group(&self, group: &str) -> Vec<Arc<SongData>>;

    fn group_banner(&self, _group: &str) -> Option<PathBuf> {
        None
    }

    fn short_group_name(&self, group: &str) -> String {
        group.to_string()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SongLibrary {
    packs: Vec<SongPack>,
}

impl SongLibrary {
    pub fn new(packs: Vec<SongPack>) -> Self {
        Self { packs }
    }

    pub fn packs(&self) -> &[SongPack] {
        &self.packs
    }

    pub fn song_count(&self) -> usize {
        self.packs.iter().map(|p| p.songs.len()).sum()
    }

    fn pack(&self, group: &str) -> Option<&SongPack> {
        self.packs.iter().find(|p| p.group_name == group)
    }
}

impl SongRepository for SongLibrary {
    fn group_names(&self) -> Vec<String> {
        self.packs.iter().map(|p| p.group_name.clone()).collect()
    }

    fn songs_in_group(&self, group: &str) -> Vec<Arc<SongData>> {
        self.pack(group).map(|p| p.songs.clone()).unwrap_or_default()
    }

    fn group_banner(&self, group: &str) -> Option<PathBuf> {
        self.pack(group).and_then(|p| p.banner_path.clone())
    }

    fn short_group_name(&self, group: &str) -> String {
        match self.pack(group) {
            Some(p) if !p.name.trim().is_empty() => p.name.clone(),
            _ => group.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SongData, SongLibrary, SongPack, SongRepository};
    use std::sync::Arc;

    #[test]
    fn library_lists_groups_in_pack_order() {
        let lib = SongLibrary::new(vec![
            SongPack {
                group_name: "Zeta".to_string(),
                name: "Z".to_string(),
                banner_path: None,
                songs: vec![Arc::new(SongData::with_charts("Zeta", "One", vec![]))],
            },
            SongPack {
                group_name: "Alpha".to_string(),
                name: String::new(),
                banner_path: None,
                songs: vec![],
            },
        ]);
        assert_eq!(lib.group_names(), ["Zeta", "Alpha"]);
        assert_eq!(lib.songs_in_group("Zeta").len(), 1);
        assert!(lib.songs_in_group("Missing").is_empty());
        assert_eq!(lib.short_group_name("Zeta"), "Z");
        assert_eq!(lib.short_group_name("Alpha"), "Alpha");
        assert_eq!(lib.song_count(), 1);
    }
}
