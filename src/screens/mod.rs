pub mod components;
pub mod edit_menu;

use crate::game::chart::{ChartData, Difficulty};
use crate::game::song::SongData;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum ScreenAction {
    None,
    Navigate(Screen),
    EditChart {
        song: Arc<SongData>,
        chart: Arc<ChartData>,
    },
    DeleteChart {
        song: Arc<SongData>,
        chart: Arc<ChartData>,
    },
    /// `source: None` starts the new chart blank.
    CreateChart {
        song: Arc<SongData>,
        chart_type: String,
        difficulty: Difficulty,
        source: Option<Arc<ChartData>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
}
