use crate::game::song::SongData;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Beginner,
    Easy,
    Medium,
    Hard,
    Challenge,
    Edit,
}

impl Difficulty {
    pub const ALL: [Difficulty; 6] = [
        Self::Beginner,
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Challenge,
        Self::Edit,
    ];

    /// Name used in simfiles and library manifests.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Challenge => "Challenge",
            Self::Edit => "Edit",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Beginner => "Novice",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Challenge => "Expert",
            Self::Edit => "Edit",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "novice" => Ok(Self::Beginner),
            "easy" | "basic" | "light" => Ok(Self::Easy),
            "medium" | "another" | "standard" => Ok(Self::Medium),
            "hard" | "trick" | "heavy" => Ok(Self::Hard),
            "challenge" | "expert" | "oni" | "smaniac" => Ok(Self::Challenge),
            "edit" => Ok(Self::Edit),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChartData {
    pub chart_type: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub meter: u32,
    pub step_artist: String,
    pub short_hash: String,
}

/// Themed label for a steps type identifier, falling back to the raw id.
pub fn steps_type_display_name(chart_type: &str) -> String {
    match chart_type.to_ascii_lowercase().as_str() {
        "dance-single" => "Single".to_string(),
        "dance-double" => "Double".to_string(),
        "dance-couple" => "Couple".to_string(),
        "dance-solo" => "Solo".to_string(),
        "pump-single" => "Pump Single".to_string(),
        "pump-double" => "Pump Double".to_string(),
        _ => chart_type.to_string(),
    }
}

pub fn chart_by_difficulty(
    song: &SongData,
    chart_type: &str,
    difficulty: Difficulty,
) -> Option<Arc<ChartData>> {
    song.charts
        .iter()
        .find(|c| c.chart_type.eq_ignore_ascii_case(chart_type) && c.difficulty == difficulty)
        .cloned()
}

pub fn edit_charts_sorted(song: &SongData, chart_type: &str) -> Vec<Arc<ChartData>> {
    let mut edits: Vec<Arc<ChartData>> = song
        .charts
        .iter()
        .filter(|c| {
            c.chart_type.eq_ignore_ascii_case(chart_type) && c.difficulty == Difficulty::Edit
        })
        .cloned()
        .collect();
    sort_by_description(&mut edits);
    edits
}

pub fn sort_by_description(charts: &mut [Arc<ChartData>]) {
    charts.sort_by(|a, b| {
        a.description
            .to_lowercase()
            .cmp(&b.description.to_lowercase())
            .then(a.meter.cmp(&b.meter))
            .then(a.short_hash.cmp(&b.short_hash))
    });
}

#[cfg(test)]
mod tests {
    use super::{ChartData, Difficulty, edit_charts_sorted, steps_type_display_name};
    use crate::game::song::SongData;
    use std::str::FromStr;

    fn chart(chart_type: &str, difficulty: Difficulty, description: &str, meter: u32) -> ChartData {
        ChartData {
            chart_type: chart_type.to_string(),
            difficulty,
            description: description.to_string(),
            meter,
            step_artist: String::new(),
            short_hash: format!("{description}{meter}"),
        }
    }

    #[test]
    fn edits_sort_case_insensitively_and_ignore_other_types() {
        let song = SongData::with_charts(
            "Group",
            "Song",
            vec![
                chart("dance-single", Difficulty::Edit, "foo", 9),
                chart("dance-single", Difficulty::Edit, "Bar", 4),
                chart("dance-double", Difficulty::Edit, "aaa", 2),
                chart("dance-single", Difficulty::Hard, "", 10),
            ],
        );
        let edits = edit_charts_sorted(&song, "dance-single");
        let names: Vec<&str> = edits.iter().map(|c| c.description.as_str()).collect();
        assert_eq!(names, ["Bar", "foo"]);
        assert!(edits.iter().all(|c| c.difficulty == Difficulty::Edit));
    }

    #[test]
    fn difficulty_parses_legacy_aliases() {
        assert_eq!(Difficulty::from_str("Challenge"), Ok(Difficulty::Challenge));
        assert_eq!(Difficulty::from_str(" smaniac "), Ok(Difficulty::Challenge));
        assert_eq!(Difficulty::from_str("light"), Ok(Difficulty::Easy));
        assert!(Difficulty::from_str("impossible").is_err());
    }

    #[test]
    fn unknown_steps_type_falls_back_to_raw_id() {
        assert_eq!(steps_type_display_name("dance-single"), "Single");
        assert_eq!(steps_type_display_name("kb7-single"), "kb7-single");
    }
}
