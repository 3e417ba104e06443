use crate::game::chart::Difficulty;
use crate::game::song::SongData;
use crate::screens::components::edit_menu::{EditMenuRow, EditMenuView, MeterSlot, RowMap};
use std::path::PathBuf;

const LABEL_WIDTH: usize = 13;

#[derive(Clone, Debug, Default)]
struct Meter {
    value: u32,
    difficulty: Option<Difficulty>,
    step_artist: String,
    hidden: bool,
}

/// Plain-text stand-in for the actor tree: keeps the last value pushed for each
/// element and renders it as lines.
#[derive(Debug, Default)]
pub struct TextView {
    translit: bool,
    values: RowMap<String>,
    hidden: RowMap<bool>,
    cursor: Option<EditMenuRow>,
    can_left: bool,
    can_right: bool,
    group_banner: Option<PathBuf>,
    song_banner: Option<PathBuf>,
    song_line: String,
    meters: [Meter; 2],
}

#[inline(always)]
const fn meter_ix(slot: MeterSlot) -> usize {
    match slot {
        MeterSlot::Steps => 0,
        MeterSlot::Source => 1,
    }
}

impl TextView {
    pub fn new(translit: bool) -> Self {
        Self {
            translit,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn value(&self, row: EditMenuRow) -> &str {
        &self.values[row]
    }

    pub fn render(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(EditMenuRow::COUNT + 4);
        if let Some(path) = &self.group_banner {
            out.push(format!("[banner {}]", path.display()));
        }
        if let Some(path) = &self.song_banner {
            out.push(format!("[song banner {}]", path.display()));
        }
        if !self.song_line.is_empty() {
            out.push(self.song_line.clone());
        }
        for row in EditMenuRow::ALL {
            if self.hidden[row] {
                continue;
            }
            let focused = self.cursor == Some(row);
            let (l, r) = if focused {
                (
                    if self.can_left { '<' } else { ' ' },
                    if self.can_right { '>' } else { ' ' },
                )
            } else {
                (' ', ' ')
            };
            out.push(format!(
                "{} {:<width$} {l} {} {r}",
                if focused { '*' } else { ' ' },
                row.label(),
                self.values[row],
                width = LABEL_WIDTH
            ));
        }
        for (name, meter) in ["Meter", "Source Meter"].iter().zip(self.meters.iter()) {
            if meter.hidden {
                continue;
            }
            if let Some(d) = meter.difficulty {
                let mut line = format!(
                    "  {name:<width$}   {} {}",
                    d.display_name(),
                    meter.value,
                    width = LABEL_WIDTH
                );
                if !meter.step_artist.is_empty() {
                    line.push_str(&format!(" by {}", meter.step_artist));
                }
                out.push(line);
            }
        }
        out
    }
}

impl EditMenuView for TextView {
    fn set_row_value(&mut self, row: EditMenuRow, text: &str) {
        self.values[row] = text.to_string();
    }

    fn set_row_hidden(&mut self, row: EditMenuRow, hidden: bool) {
        self.hidden[row] = hidden;
    }

    fn set_arrows(&mut self, row: EditMenuRow, can_left: bool, can_right: bool) {
        self.cursor = Some(row);
        self.can_left = can_left;
        self.can_right = can_right;
    }

    fn set_group_banner(&mut self, _group: &str, banner: Option<PathBuf>) {
        self.group_banner = banner;
    }

    fn set_song_banner(&mut self, song: Option<&SongData>) {
        self.song_banner = song.and_then(|s| s.banner_path.clone());
        self.song_line = match song {
            Some(s) if s.artist.is_empty() => s.display_full_title(self.translit),
            Some(s) => format!("{} / {}", s.display_full_title(self.translit), s.artist),
            None => String::new(),
        };
    }

    fn set_meter(&mut self, slot: MeterSlot, meter: u32, difficulty: Difficulty, step_artist: &str) {
        let m = &mut self.meters[meter_ix(slot)];
        m.value = meter;
        m.difficulty = Some(difficulty);
        m.step_artist.clear();
        m.step_artist.push_str(step_artist);
    }

    fn set_meter_hidden(&mut self, slot: MeterSlot, hidden: bool) {
        self.meters[meter_ix(slot)].hidden = hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::TextView;
    use crate::game::chart::Difficulty;
    use crate::game::song::SongData;
    use crate::screens::components::edit_menu::{EditMenuRow, EditMenuView, MeterSlot};
    use std::path::PathBuf;

    #[test]
    fn renders_cursor_arrows_and_skips_hidden_rows() {
        let mut view = TextView::new(true);
        let mut song = SongData::with_charts("G", "Title", vec![]);
        song.translit_title = "Romaji".to_string();
        song.artist = "Artist".to_string();
        song.banner_path = Some(PathBuf::from("Songs/G/Title/bn.png"));
        view.set_group_banner("G", Some(PathBuf::from("Songs/G/banner.png")));
        view.set_song_banner(Some(&song));
        view.set_row_value(EditMenuRow::Steps, "Hard");
        view.set_row_hidden(EditMenuRow::SourceSteps, true);
        view.set_arrows(EditMenuRow::Steps, true, false);
        view.set_meter(MeterSlot::Steps, 9, Difficulty::Hard, "Mapper");
        view.set_meter(MeterSlot::Source, 3, Difficulty::Easy, "");
        view.set_meter_hidden(MeterSlot::Source, true);

        let lines = view.render();
        assert_eq!(lines[0], "[banner Songs/G/banner.png]");
        assert_eq!(lines[1], "[song banner Songs/G/Title/bn.png]");
        assert_eq!(lines[2], "Romaji / Artist");
        let steps = lines
            .iter()
            .find(|l| l.contains("Steps ") && l.contains("Hard"))
            .expect("steps line");
        assert!(steps.starts_with('*'), "focused row is marked: {steps}");
        assert!(steps.contains("< Hard  "), "only the left arrow is lit: {steps}");
        assert!(!lines.iter().any(|l| l.contains("Source Steps")));
        assert!(lines.iter().any(|l| l.ends_with("Hard 9 by Mapper")));
        assert!(!lines.iter().any(|l| l.contains("Source Meter")));
        assert_eq!(view.value(EditMenuRow::Steps), "Hard");

        view.set_song_banner(None);
        view.set_meter(MeterSlot::Steps, 0, Difficulty::Medium, "");
        let lines = view.render();
        assert!(!lines.iter().any(|l| l.starts_with("[song banner")));
        assert!(lines.iter().any(|l| l.ends_with("Medium 0")), "artist cleared");
    }
}
