use crate::game::chart::{ChartData, Difficulty};
use crate::game::song::{SongData, SongLibrary, SongPack};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

// --- SERIALIZABLE MIRROR STRUCTS ---

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ManifestChart {
    chart_type: String,
    difficulty: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    meter: u32,
    #[serde(default)]
    step_artist: String,
    #[serde(default)]
    short_hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ManifestSong {
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    translit_title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    banner: Option<PathBuf>,
    #[serde(default)]
    charts: Vec<ManifestChart>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ManifestPack {
    group: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    banner: Option<PathBuf>,
    #[serde(default)]
    songs: Vec<ManifestSong>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
struct Manifest {
    #[serde(default)]
    packs: Vec<ManifestPack>,
}

impl ManifestChart {
    fn into_chart(self, song_title: &str) -> Option<ChartData> {
        let Ok(difficulty) = Difficulty::from_str(&self.difficulty) else {
            warn!(
                "Skipping chart with unknown difficulty '{}' in '{song_title}'.",
                self.difficulty
            );
            return None;
        };
        Some(ChartData {
            chart_type: self.chart_type,
            difficulty,
            description: self.description,
            meter: self.meter,
            step_artist: self.step_artist,
            short_hash: self.short_hash,
        })
    }
}

impl From<ManifestPack> for SongPack {
    fn from(pack: ManifestPack) -> Self {
        let group_name = pack.group;
        let songs = pack
            .songs
            .into_iter()
            .map(|s| {
                let charts = s
                    .charts
                    .into_iter()
                    .filter_map(|c| c.into_chart(&s.title))
                    .map(Arc::new)
                    .collect();
                Arc::new(SongData {
                    group_name: group_name.clone(),
                    title: s.title,
                    subtitle: s.subtitle,
                    translit_title: s.translit_title,
                    artist: s.artist,
                    banner_path: s.banner,
                    charts,
                })
            })
            .collect();
        SongPack {
            name: if pack.name.trim().is_empty() {
                group_name.clone()
            } else {
                pack.name
            },
            group_name,
            banner_path: pack.banner,
            songs,
        }
    }
}

pub fn parse_library(json: &str) -> Result<SongLibrary, String> {
    let manifest: Manifest =
        serde_json::from_str(json).map_err(|e| format!("Malformed song library: {e}"))?;
    Ok(SongLibrary::new(
        manifest.packs.into_iter().map(SongPack::from).collect(),
    ))
}

pub fn load_library(path: &Path) -> Result<SongLibrary, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read song library '{}': {e}", path.display()))?;
    let library = parse_library(&json)?;
    info!(
        "Loaded {} songs in {} packs from '{}'.",
        library.song_count(),
        library.packs().len(),
        path.display()
    );
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::parse_library;
    use crate::game::chart::Difficulty;
    use crate::game::song::SongRepository;

    const LIBRARY: &str = r#"{
        "packs": [
            {
                "group": "In The Groove",
                "name": "ITG",
                "banner": "Songs/In The Groove/banner.png",
                "songs": [
                    {
                        "title": "Bend Your Mind",
                        "artist": "Elite Force",
                        "charts": [
                            { "chart_type": "dance-single", "difficulty": "Hard", "meter": 10 },
                            { "chart_type": "dance-single", "difficulty": "Edit", "description": "mine", "meter": 12 },
                            { "chart_type": "dance-single", "difficulty": "Bogus", "meter": 1 }
                        ]
                    }
                ]
            },
            { "group": "Empty" }
        ]
    }"#;

    #[test]
    fn manifest_builds_packs_and_skips_bad_difficulties() {
        let lib = parse_library(LIBRARY).expect("library should parse");
        assert_eq!(lib.group_names(), ["In The Groove", "Empty"]);
        assert_eq!(lib.short_group_name("In The Groove"), "ITG");
        assert_eq!(lib.short_group_name("Empty"), "Empty");
        assert!(lib.group_banner("In The Groove").is_some());

        let songs = lib.songs_in_group("In The Groove");
        assert_eq!(songs.len(), 1);
        let song = &songs[0];
        assert_eq!(song.group_name, "In The Groove");
        assert_eq!(song.charts.len(), 2, "unknown difficulty must be dropped");
        assert_eq!(song.charts[1].difficulty, Difficulty::Edit);
        assert_eq!(song.charts[1].description, "mine");
    }

    #[test]
    fn malformed_manifest_reports_error() {
        let err = parse_library("{ not json").unwrap_err();
        assert!(err.starts_with("Malformed song library"), "got: {err}");
    }
}
