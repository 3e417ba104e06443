use crate::config::Config;
use crate::core::input;
use crate::game::chart::{ChartData, Difficulty};
use crate::game::library;
use crate::game::session::{PlayerSide, Session};
use crate::game::song::{SongData, SongLibrary, SongRepository};
use crate::game::unlocks::{ShowAll, UnlockList, VisibilityPolicy};
use crate::screens::components::edit_menu::EditMenuServices;
use crate::screens::{ScreenAction, edit_menu};
use log::{info, warn};
use std::error::Error;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

/// Outcome of a finished edit menu session, printed as the tool's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Edit(String),
    Delete(String),
    Create(String),
    Cancelled,
}

impl Outcome {
    fn line(&self) -> String {
        match self {
            Self::Edit(s) => format!("EDIT {s}"),
            Self::Delete(s) => format!("DELETE {s}"),
            Self::Create(s) => format!("CREATE {s}"),
            Self::Cancelled => "CANCELLED".to_string(),
        }
    }
}

fn chart_key(song: &SongData, chart: &ChartData) -> String {
    let mut key = format!(
        "{}:{}:{}",
        song.unlock_key(),
        chart.chart_type,
        chart.difficulty.file_name()
    );
    if chart.difficulty == Difficulty::Edit {
        key.push(':');
        key.push_str(&chart.description);
    }
    key
}

/// Maps a screen action to a final outcome; `None` keeps the menu running.
fn handle_action(action: ScreenAction, session: &Session) -> Option<Outcome> {
    match action {
        ScreenAction::None => None,
        ScreenAction::Navigate(_) => Some(Outcome::Cancelled),
        ScreenAction::EditChart { song, chart } => {
            let key = chart_key(&song, &chart);
            session.set_current_song(Some(song));
            session.set_current_steps(PlayerSide::P1, Some(chart));
            Some(Outcome::Edit(key))
        }
        ScreenAction::DeleteChart { song, chart } => Some(Outcome::Delete(chart_key(&song, &chart))),
        ScreenAction::CreateChart {
            song,
            chart_type,
            difficulty,
            source,
        } => {
            let from = source
                .as_ref()
                .map_or_else(|| "blank".to_string(), |c| chart_key(&song, c));
            Some(Outcome::Create(format!(
                "{}:{chart_type}:{} from {from}",
                song.unlock_key(),
                difficulty.file_name()
            )))
        }
    }
}

/// Finds the configured `group/title` song and `type:Difficulty[:description]` chart.
fn resolve_current(
    library: &SongLibrary,
    cfg: &Config,
) -> (Option<Arc<SongData>>, Option<Arc<ChartData>>) {
    let Some((group, title)) = cfg.current_song.split_once('/') else {
        return (None, None);
    };
    let Some(song) = library
        .songs_in_group(group.trim())
        .into_iter()
        .find(|s| s.title.eq_ignore_ascii_case(title.trim()))
    else {
        warn!("Current song '{}' is not in the library.", cfg.current_song);
        return (None, None);
    };

    let mut parts = cfg.current_steps.splitn(3, ':');
    let (Some(chart_type), Some(diff)) = (parts.next(), parts.next()) else {
        return (Some(song), None);
    };
    let Ok(difficulty) = Difficulty::from_str(diff) else {
        warn!("Unknown difficulty '{diff}' in CurrentSteps.");
        return (Some(song), None);
    };
    let description = parts.next().map(str::trim);
    let chart = song
        .charts
        .iter()
        .find(|c| {
            c.chart_type.eq_ignore_ascii_case(chart_type.trim())
                && c.difficulty == difficulty
                && description.is_none_or(|d| c.description == d)
        })
        .cloned();
    (Some(song), chart)
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> std::io::Result<()> {
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cfg = crate::config::get();
    let library = Arc::new(library::load_library(&cfg.song_library_path)?);

    let visibility: Arc<dyn VisibilityPolicy> = if cfg.home_edit_mode {
        let unlocks = UnlockList::from_config_value(&cfg.locked_songs);
        if unlocks.is_empty() {
            info!("Home edit mode: no songs locked.");
        } else {
            info!("Home edit mode: {} songs locked.", unlocks.len());
        }
        Arc::new(unlocks)
    } else {
        Arc::new(ShowAll)
    };

    let session = Arc::new(Session::new());
    let (song, steps) = resolve_current(&library, &cfg);
    session.set_current_song(song);
    session.set_current_steps(PlayerSide::P1, steps);

    let mut state = edit_menu::init(
        &cfg,
        EditMenuServices {
            songs: library,
            visibility,
            context: session.clone(),
        },
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    print_lines(&mut stdout, &edit_menu::get_lines(&state))?;

    let mut outcome = Outcome::Cancelled;
    'input: for line in stdin.lock().lines() {
        for ev in input::map_console_line(&line?) {
            let action = edit_menu::handle_input(&mut state, &ev);
            if let Some(done) = handle_action(action, &session) {
                outcome = done;
                break 'input;
            }
        }
        print_lines(&mut stdout, &edit_menu::get_lines(&state))?;
    }

    info!("Edit menu finished: {outcome:?}");
    writeln!(stdout, "{}", outcome.line())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Outcome, handle_action, resolve_current};
    use crate::config::Config;
    use crate::game::chart::{ChartData, Difficulty};
    use crate::game::session::{CurrentContext, PlayerSide, Session};
    use crate::game::song::{SongData, SongLibrary, SongPack};
    use crate::screens::ScreenAction;
    use std::sync::Arc;

    fn chart(difficulty: Difficulty, description: &str) -> ChartData {
        ChartData {
            chart_type: "dance-single".to_string(),
            difficulty,
            description: description.to_string(),
            meter: 8,
            step_artist: String::new(),
            short_hash: description.to_string(),
        }
    }

    fn library() -> SongLibrary {
        SongLibrary::new(vec![SongPack {
            group_name: "Pack".to_string(),
            name: "Pack".to_string(),
            banner_path: None,
            songs: vec![Arc::new(SongData::with_charts(
                "Pack",
                "Song",
                vec![chart(Difficulty::Hard, ""), chart(Difficulty::Edit, "mine")],
            ))],
        }])
    }

    #[test]
    fn configured_current_song_and_edit_resolve() {
        let cfg = Config {
            current_song: "Pack/SONG".to_string(),
            current_steps: "dance-single:Edit:mine".to_string(),
            ..Config::default()
        };
        let (song, steps) = resolve_current(&library(), &cfg);
        assert_eq!(song.map(|s| s.title.clone()), Some("Song".to_string()));
        assert_eq!(steps.map(|c| c.description.clone()), Some("mine".to_string()));

        let missing = Config {
            current_song: "Pack/Nope".to_string(),
            ..Config::default()
        };
        assert!(resolve_current(&library(), &missing).0.is_none());
    }

    #[test]
    fn edit_action_updates_session_and_finishes() {
        let lib = library();
        let song = lib.packs()[0].songs[0].clone();
        let hard = song.charts[0].clone();
        let session = Session::new();

        let outcome = handle_action(
            ScreenAction::EditChart {
                song: song.clone(),
                chart: hard,
            },
            &session,
        );
        assert_eq!(outcome, Some(Outcome::Edit("Pack/Song:dance-single:Hard".to_string())));
        assert!(session.current_steps(PlayerSide::P1).is_some());

        let create = handle_action(
            ScreenAction::CreateChart {
                song,
                chart_type: "dance-single".to_string(),
                difficulty: Difficulty::Medium,
                source: None,
            },
            &session,
        );
        assert_eq!(
            create,
            Some(Outcome::Create("Pack/Song:dance-single:Medium from blank".to_string()))
        );
        assert_eq!(handle_action(ScreenAction::None, &session), None);
    }
}
