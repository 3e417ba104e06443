use crate::config::Config;
use crate::core::input::{InputEvent, VirtualAction};
use crate::screens::components::edit_menu::{
    EditMenu, EditMenuAction, EditMenuFeedback, EditMenuOptions, EditMenuRow, EditMenuServices,
};
use crate::screens::{Screen, ScreenAction};
use crate::ui::text_view::TextView;
use log::{debug, info, warn};

const SFX_CHANGE_ROW: &str = "assets/sounds/edit_menu_row.ogg";
const SFX_CHANGE_VALUE: &str = "assets/sounds/edit_menu_value.ogg";

/// Feedback sink for the headless build: there is no mixer, so cues are logged
/// and counted.
#[derive(Debug, Default)]
pub struct SfxLog {
    pub row_changes: u32,
    pub value_changes: u32,
}

impl EditMenuFeedback for SfxLog {
    fn row_changed(&mut self) {
        self.row_changes = self.row_changes.saturating_add(1);
        debug!("sfx: {SFX_CHANGE_ROW}");
    }

    fn value_changed(&mut self) {
        self.value_changes = self.value_changes.saturating_add(1);
        debug!("sfx: {SFX_CHANGE_VALUE}");
    }
}

pub struct State {
    pub menu: EditMenu<TextView, SfxLog>,
}

pub fn init(cfg: &Config, services: EditMenuServices) -> State {
    let options = EditMenuOptions {
        home_edit_mode: cfg.home_edit_mode,
        steps_types: cfg.steps_types_to_show.clone(),
    };
    State {
        menu: EditMenu::new(
            services,
            options,
            TextView::new(cfg.translated_titles),
            SfxLog::default(),
        ),
    }
}

pub fn handle_input(state: &mut State, ev: &InputEvent) -> ScreenAction {
    if !ev.pressed {
        return ScreenAction::None;
    }

    match ev.action {
        VirtualAction::P1_Up | VirtualAction::P1_MenuUp => {
            state.menu.up();
            ScreenAction::None
        }
        VirtualAction::P1_Down | VirtualAction::P1_MenuDown => {
            state.menu.down();
            ScreenAction::None
        }
        VirtualAction::P1_Left | VirtualAction::P1_MenuLeft => {
            state.menu.left();
            ScreenAction::None
        }
        VirtualAction::P1_Right | VirtualAction::P1_MenuRight => {
            state.menu.right();
            ScreenAction::None
        }
        VirtualAction::P1_Select => {
            state.menu.refresh_all();
            ScreenAction::None
        }
        VirtualAction::P1_Start => start_pressed(state),
        VirtualAction::P1_Back => ScreenAction::Navigate(Screen::Menu),
    }
}

fn start_pressed(state: &mut State) -> ScreenAction {
    let menu = &mut state.menu;
    // Start works like Down until the cursor reaches the Action row.
    if menu.selected_row() != EditMenuRow::Action {
        menu.down();
        return ScreenAction::None;
    }
    let Some(song) = menu.selected_song().cloned() else {
        warn!("Edit menu has no song to act on.");
        return ScreenAction::None;
    };

    match (menu.selected_action(), menu.selected_steps().cloned()) {
        (Some(EditMenuAction::Edit), Some(chart)) => {
            info!("Editing '{}' ({}).", song.title, chart.difficulty.file_name());
            ScreenAction::EditChart { song, chart }
        }
        (Some(EditMenuAction::Delete), Some(chart)) => {
            info!("Deleting '{}' ({}).", song.title, chart.difficulty.file_name());
            ScreenAction::DeleteChart { song, chart }
        }
        (Some(EditMenuAction::Create), None) => {
            let source = menu.selected_source_steps().cloned();
            info!(
                "Creating {} {} for '{}' from {}.",
                menu.selected_steps_type(),
                menu.selected_difficulty().file_name(),
                song.title,
                source
                    .as_ref()
                    .map_or("blank", |c| c.difficulty.file_name())
            );
            ScreenAction::CreateChart {
                song,
                chart_type: menu.selected_steps_type().to_string(),
                difficulty: menu.selected_difficulty(),
                source,
            }
        }
        (action, chart) => {
            warn!(
                "Edit menu action {action:?} does not match chart selection (chart: {}).",
                chart.is_some()
            );
            ScreenAction::None
        }
    }
}

pub fn get_lines(state: &State) -> Vec<String> {
    state.menu.view().render()
}

#[cfg(test)]
mod tests {
    use super::{get_lines, handle_input, init};
    use crate::config::Config;
    use crate::core::input::{InputEvent, VirtualAction};
    use crate::game::chart::{ChartData, Difficulty};
    use crate::game::session::Session;
    use crate::game::song::{SongData, SongLibrary, SongPack};
    use crate::game::unlocks::ShowAll;
    use crate::screens::components::edit_menu::EditMenuServices;
    use crate::screens::{Screen, ScreenAction};
    use std::sync::Arc;

    fn state() -> super::State {
        let song = SongData::with_charts(
            "Pack",
            "Song",
            vec![ChartData {
                chart_type: "dance-single".to_string(),
                difficulty: Difficulty::Easy,
                description: String::new(),
                meter: 4,
                step_artist: "someone".to_string(),
                short_hash: "e4".to_string(),
            }],
        );
        let library = SongLibrary::new(vec![SongPack {
            group_name: "Pack".to_string(),
            name: "Pack".to_string(),
            banner_path: None,
            songs: vec![Arc::new(song)],
        }]);
        init(
            &Config::default(),
            EditMenuServices {
                songs: Arc::new(library),
                visibility: Arc::new(ShowAll),
                context: Arc::new(Session::new()),
            },
        )
    }

    fn press(state: &mut super::State, action: VirtualAction) -> ScreenAction {
        handle_input(state, &InputEvent::press(action))
    }

    #[test]
    fn start_walks_down_then_edits_existing_chart() {
        let mut st = state();
        for _ in 0..3 {
            assert!(matches!(press(&mut st, VirtualAction::P1_Start), ScreenAction::None));
        }
        // Steps row sits on the existing Easy chart, so Start jumps to Action.
        assert!(matches!(press(&mut st, VirtualAction::P1_Start), ScreenAction::None));
        match press(&mut st, VirtualAction::P1_Start) {
            ScreenAction::EditChart { song, chart } => {
                assert_eq!(song.title, "Song");
                assert_eq!(chart.meter, 4);
            }
            other => panic!("expected EditChart, got {other:?}"),
        }
        press(&mut st, VirtualAction::P1_MenuRight);
        assert!(matches!(
            press(&mut st, VirtualAction::P1_Start),
            ScreenAction::DeleteChart { .. }
        ));
    }

    #[test]
    fn create_carries_source_chart() {
        let mut st = state();
        press(&mut st, VirtualAction::P1_MenuDown);
        press(&mut st, VirtualAction::P1_MenuDown);
        press(&mut st, VirtualAction::P1_MenuDown);
        // Easy -> Medium, which the song lacks. Pad directions move like menu ones.
        press(&mut st, VirtualAction::P1_Right);
        for _ in 0..3 {
            press(&mut st, VirtualAction::P1_MenuDown);
        }
        match press(&mut st, VirtualAction::P1_Start) {
            ScreenAction::CreateChart {
                chart_type,
                difficulty,
                source,
                ..
            } => {
                assert_eq!(chart_type, "dance-single");
                assert_eq!(difficulty, Difficulty::Medium);
                assert_eq!(source.map(|c| c.meter), Some(4), "source defaults to Easy");
            }
            other => panic!("expected CreateChart, got {other:?}"),
        }
    }

    #[test]
    fn back_leaves_and_releases_are_ignored() {
        let mut st = state();
        let mut release = InputEvent::press(VirtualAction::P1_MenuDown);
        release.pressed = false;
        assert!(matches!(handle_input(&mut st, &release), ScreenAction::None));
        assert_eq!(st.menu.feedback().row_changes, 0);
        assert!(matches!(
            press(&mut st, VirtualAction::P1_Back),
            ScreenAction::Navigate(Screen::Menu)
        ));
        assert!(get_lines(&st).iter().any(|l| l.contains("Pack")));
    }
}
