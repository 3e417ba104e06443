use crate::game::chart::{
    ChartData, Difficulty, chart_by_difficulty, edit_charts_sorted, steps_type_display_name,
};
use crate::game::session::{CurrentContext, PlayerSide};
use crate::game::song::{SongData, SongRepository};
use crate::game::unlocks::VisibilityPolicy;
use log::{debug, trace, warn};
use smallvec::{SmallVec, smallvec};
use std::ops::{Index, IndexMut};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_STEPS_TYPE: &str = "dance-single";
const NO_NAME_TEXT: &str = "-no name-";
const BLANK_TEXT: &str = "Blank";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditMenuRow {
    Group,
    Song,
    StepsType,
    Steps,
    SourceStepsType,
    SourceSteps,
    Action,
}

impl EditMenuRow {
    pub const COUNT: usize = 7;
    pub const ALL: [EditMenuRow; Self::COUNT] = [
        Self::Group,
        Self::Song,
        Self::StepsType,
        Self::Steps,
        Self::SourceStepsType,
        Self::SourceSteps,
        Self::Action,
    ];
    pub const FIRST: EditMenuRow = Self::Group;
    pub const LAST: EditMenuRow = Self::Action;

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn prev(self) -> Option<EditMenuRow> {
        match self {
            Self::Group => None,
            Self::Song => Some(Self::Group),
            Self::StepsType => Some(Self::Song),
            Self::Steps => Some(Self::StepsType),
            Self::SourceStepsType => Some(Self::Steps),
            Self::SourceSteps => Some(Self::SourceStepsType),
            Self::Action => Some(Self::SourceSteps),
        }
    }

    pub const fn next(self) -> Option<EditMenuRow> {
        match self {
            Self::Group => Some(Self::Song),
            Self::Song => Some(Self::StepsType),
            Self::StepsType => Some(Self::Steps),
            Self::Steps => Some(Self::SourceStepsType),
            Self::SourceStepsType => Some(Self::SourceSteps),
            Self::SourceSteps => Some(Self::Action),
            Self::Action => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Song => "Song",
            Self::StepsType => "Steps Type",
            Self::Steps => "Steps",
            Self::SourceStepsType => "Source Type",
            Self::SourceSteps => "Source Steps",
            Self::Action => "Action",
        }
    }
}

/// One value per edit menu row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMap<T>([T; EditMenuRow::COUNT]);

impl<T: Default> Default for RowMap<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| T::default()))
    }
}

impl<T> Index<EditMenuRow> for RowMap<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, row: EditMenuRow) -> &T {
        &self.0[row.index()]
    }
}

impl<T> IndexMut<EditMenuRow> for RowMap<T> {
    #[inline(always)]
    fn index_mut(&mut self, row: EditMenuRow) -> &mut T {
        &mut self.0[row.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMenuAction {
    Edit,
    Delete,
    Create,
}

impl EditMenuAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::Create => "Create",
        }
    }
}

/// A Steps row candidate. `chart` is `None` for a tier the song lacks, and for
/// the trailing "new edit" slot of the Edit tier.
#[derive(Clone, Debug)]
pub struct StepsEntry {
    pub difficulty: Difficulty,
    pub chart: Option<Arc<ChartData>>,
}

/// A SourceSteps row candidate. `difficulty` is `None` for the leading Blank entry.
#[derive(Clone, Debug)]
pub struct SourceStepsEntry {
    pub difficulty: Option<Difficulty>,
    pub chart: Option<Arc<ChartData>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeterSlot {
    Steps,
    Source,
}

/// Receives everything the menu wants shown. Calls are fire-and-forget.
pub trait EditMenuView {
    fn set_row_value(&mut self, row: EditMenuRow, text: &str);
    fn set_row_hidden(&mut self, row: EditMenuRow, hidden: bool);
    fn set_arrows(&mut self, row: EditMenuRow, can_left: bool, can_right: bool);
    fn set_group_banner(&mut self, group: &str, banner: Option<PathBuf>);
    fn set_song_banner(&mut self, song: Option<&SongData>);
    fn set_meter(&mut self, slot: MeterSlot, meter: u32, difficulty: Difficulty, step_artist: &str);
    fn set_meter_hidden(&mut self, slot: MeterSlot, hidden: bool);
}

pub trait EditMenuFeedback {
    fn row_changed(&mut self);
    fn value_changed(&mut self);
}

pub struct EditMenuServices {
    pub songs: Arc<dyn SongRepository>,
    pub visibility: Arc<dyn VisibilityPolicy>,
    pub context: Arc<dyn CurrentContext>,
}

#[derive(Clone, Debug)]
pub struct EditMenuOptions {
    /// Only user edits may be created or changed; locked songs are filtered out
    /// by the visibility policy the caller supplies.
    pub home_edit_mode: bool,
    pub steps_types: Vec<String>,
}

impl Default for EditMenuOptions {
    fn default() -> Self {
        Self {
            home_edit_mode: false,
            steps_types: vec![DEFAULT_STEPS_TYPE.to_string()],
        }
    }
}

/* --------------------------- candidate stages --------------------------- */

fn visible_songs(
    songs: &dyn SongRepository,
    visibility: &dyn VisibilityPolicy,
    group: &str,
) -> Vec<Arc<SongData>> {
    songs
        .songs_in_group(group)
        .into_iter()
        .filter(|s| visibility.is_song_visible(s))
        .collect()
}

fn visible_groups(songs: &dyn SongRepository, visibility: &dyn VisibilityPolicy) -> Vec<String> {
    songs
        .group_names()
        .into_iter()
        .filter(|g| !visible_songs(songs, visibility, g).is_empty())
        .collect()
}

fn steps_candidates(
    song: Option<&SongData>,
    steps_type: &str,
    difficulties: &[Difficulty],
) -> Vec<StepsEntry> {
    let mut out = Vec::with_capacity(difficulties.len() + 2);
    for &difficulty in difficulties {
        if difficulty == Difficulty::Edit {
            if let Some(song) = song {
                out.extend(
                    edit_charts_sorted(song, steps_type)
                        .into_iter()
                        .map(|c| StepsEntry {
                            difficulty,
                            chart: Some(c),
                        }),
                );
            }
            // New edit
            out.push(StepsEntry {
                difficulty,
                chart: None,
            });
        } else {
            out.push(StepsEntry {
                difficulty,
                chart: song.and_then(|s| chart_by_difficulty(s, steps_type, difficulty)),
            });
        }
    }
    out
}

fn source_steps_candidates(
    song: Option<&SongData>,
    steps_type: &str,
    source_difficulties: &[Option<Difficulty>],
) -> Vec<SourceStepsEntry> {
    let mut out = Vec::with_capacity(source_difficulties.len() + 2);
    for &difficulty in source_difficulties {
        match difficulty {
            None => out.push(SourceStepsEntry {
                difficulty: None,
                chart: None,
            }),
            Some(Difficulty::Edit) => {
                let edits = song.map(|s| edit_charts_sorted(s, steps_type)).unwrap_or_default();
                if edits.is_empty() {
                    // Keep one slot per tier even without edits.
                    out.push(SourceStepsEntry {
                        difficulty,
                        chart: None,
                    });
                } else {
                    out.extend(edits.into_iter().map(|c| SourceStepsEntry {
                        difficulty,
                        chart: Some(c),
                    }));
                }
            }
            Some(d) => out.push(SourceStepsEntry {
                difficulty,
                chart: song.and_then(|s| chart_by_difficulty(s, steps_type, d)),
            }),
        }
    }
    out
}

fn action_candidates(selected_steps: Option<&ChartData>) -> SmallVec<[EditMenuAction; 2]> {
    if selected_steps.is_some() {
        smallvec![EditMenuAction::Edit, EditMenuAction::Delete]
    } else {
        smallvec![EditMenuAction::Create]
    }
}

fn same_song(a: &Arc<SongData>, b: &Arc<SongData>) -> bool {
    Arc::ptr_eq(a, b) || (a.group_name == b.group_name && a.title == b.title)
}

fn same_chart(a: &Arc<ChartData>, b: &Arc<ChartData>) -> bool {
    Arc::ptr_eq(a, b)
        || (a.chart_type.eq_ignore_ascii_case(&b.chart_type)
            && a.difficulty == b.difficulty
            && a.description == b.description
            && a.short_hash == b.short_hash)
}

#[inline(always)]
fn clamp_index(i: usize, len: usize) -> usize {
    i.min(len.saturating_sub(1))
}

#[inline(always)]
fn pick<T>(list: &[T], i: usize) -> Option<&T> {
    list.get(clamp_index(i, list.len()))
}

/* ------------------------------- the menu ------------------------------- */

pub struct EditMenu<V, F> {
    services: EditMenuServices,
    view: V,
    feedback: F,
    home_edit_mode: bool,

    selected_row: EditMenuRow,
    selection: RowMap<usize>,

    groups: Vec<String>,
    songs: Vec<Arc<SongData>>,
    steps_types: Vec<String>,
    difficulties: Vec<Difficulty>,
    source_difficulties: Vec<Option<Difficulty>>,
    steps: Vec<StepsEntry>,
    source_steps: Vec<SourceStepsEntry>,
    actions: SmallVec<[EditMenuAction; 2]>,
}

impl<V: EditMenuView, F: EditMenuFeedback> EditMenu<V, F> {
    pub fn new(services: EditMenuServices, options: EditMenuOptions, view: V, feedback: F) -> Self {
        trace!("EditMenu::new()");

        let mut steps_types = options.steps_types;
        if steps_types.is_empty() {
            warn!("No steps types configured for the edit menu; using '{DEFAULT_STEPS_TYPE}'.");
            steps_types.push(DEFAULT_STEPS_TYPE.to_string());
        }

        let difficulties = if options.home_edit_mode {
            vec![Difficulty::Edit]
        } else {
            Difficulty::ALL.to_vec()
        };
        let source_difficulties: Vec<Option<Difficulty>> = std::iter::once(None)
            .chain(Difficulty::ALL.into_iter().map(Some))
            .collect();

        let mut selection = RowMap::<usize>::default();
        // Start on Easy when the tier is offered.
        selection[EditMenuRow::Steps] = difficulties
            .iter()
            .position(|&d| d == Difficulty::Easy)
            .unwrap_or(0);
        selection[EditMenuRow::SourceSteps] = source_difficulties
            .iter()
            .position(|&d| d == Some(Difficulty::Easy))
            .unwrap_or(0);

        let mut menu = Self {
            services,
            view,
            feedback,
            home_edit_mode: options.home_edit_mode,
            selected_row: EditMenuRow::FIRST,
            selection,
            groups: Vec::new(),
            songs: Vec::new(),
            steps_types,
            difficulties,
            source_difficulties,
            steps: Vec::new(),
            source_steps: Vec::new(),
            actions: SmallVec::new(),
        };
        menu.refresh_all();
        menu
    }

    /// Re-reads the group list and re-selects the application's current song and
    /// player 1 chart, if any.
    pub fn refresh_all(&mut self) {
        self.groups = visible_groups(&*self.services.songs, &*self.services.visibility);
        self.change_to_row(EditMenuRow::FIRST);
        self.on_row_value_changed(EditMenuRow::Group);

        let Some(cur_song) = self.services.context.current_song() else {
            debug!("Edit menu refreshed with no current song.");
            return;
        };

        if let Some(i) = self.groups.iter().position(|g| *g == cur_song.group_name) {
            self.selection[EditMenuRow::Group] = i;
        }
        self.on_row_value_changed(EditMenuRow::Group);

        if let Some(i) = self.songs.iter().position(|s| same_song(s, &cur_song)) {
            self.selection[EditMenuRow::Song] = i;
        }
        self.on_row_value_changed(EditMenuRow::Song);

        let Some(cur_steps) = self.services.context.current_steps(PlayerSide::P1) else {
            debug!("Edit menu synced to '{}'.", cur_song.title);
            return;
        };
        if let Some(i) = self
            .steps_types
            .iter()
            .position(|t| t.eq_ignore_ascii_case(&cur_steps.chart_type))
        {
            self.selection[EditMenuRow::StepsType] = i;
            self.on_row_value_changed(EditMenuRow::StepsType);
        }
        if let Some(i) = self
            .steps
            .iter()
            .position(|e| e.chart.as_ref().is_some_and(|c| same_chart(c, &cur_steps)))
        {
            self.selection[EditMenuRow::Steps] = i;
            self.on_row_value_changed(EditMenuRow::Steps);
        }
        debug!(
            "Edit menu synced to '{}' ({} {}).",
            cur_song.title,
            cur_steps.chart_type,
            cur_steps.difficulty.file_name()
        );
    }

    /* ---------------------------- navigation ---------------------------- */

    pub fn can_go_up(&self) -> bool {
        self.selected_row != EditMenuRow::FIRST
    }

    pub fn can_go_down(&self) -> bool {
        self.selected_row != EditMenuRow::LAST
    }

    pub fn can_go_left(&self) -> bool {
        self.selection[self.selected_row] != 0
    }

    pub fn can_go_right(&self) -> bool {
        self.selection[self.selected_row] + 1 < self.candidate_count(self.selected_row)
    }

    pub fn up(&mut self) -> bool {
        if !self.can_go_up() {
            return false;
        }
        let row = if self.selected_row == EditMenuRow::Action && self.selected_steps().is_some() {
            EditMenuRow::Steps
        } else {
            self.selected_row.prev().unwrap_or(EditMenuRow::FIRST)
        };
        self.change_to_row(row);
        self.feedback.row_changed();
        true
    }

    pub fn down(&mut self) -> bool {
        if !self.can_go_down() {
            return false;
        }
        let row = if self.selected_row == EditMenuRow::Steps && self.selected_steps().is_some() {
            EditMenuRow::Action
        } else {
            self.selected_row.next().unwrap_or(EditMenuRow::LAST)
        };
        self.change_to_row(row);
        self.feedback.row_changed();
        true
    }

    pub fn left(&mut self) -> bool {
        if !self.can_go_left() {
            return false;
        }
        self.selection[self.selected_row] -= 1;
        self.on_row_value_changed(self.selected_row);
        self.feedback.value_changed();
        true
    }

    pub fn right(&mut self) -> bool {
        if !self.can_go_right() {
            return false;
        }
        self.selection[self.selected_row] += 1;
        self.on_row_value_changed(self.selected_row);
        self.feedback.value_changed();
        true
    }

    fn change_to_row(&mut self, row: EditMenuRow) {
        self.selected_row = row;
        self.update_arrows();
    }

    fn update_arrows(&mut self) {
        let (left, right) = (self.can_go_left(), self.can_go_right());
        self.view.set_arrows(self.selected_row, left, right);
    }

    /* ----------------------------- cascade ------------------------------ */

    /// Rows below `changed` get fresh candidates; `changed` and everything below
    /// it get redisplayed.
    fn on_row_value_changed(&mut self, changed: EditMenuRow) {
        trace!("Edit menu cascade from {changed:?}.");
        for row in EditMenuRow::ALL.into_iter().skip(changed.index()) {
            if row != changed {
                self.rebuild_candidates(row);
            }
            self.selection[row] = clamp_index(self.selection[row], self.candidate_count(row));
            self.refresh_display(row);
        }
        self.update_arrows();
        debug_assert!(
            EditMenuRow::ALL
                .iter()
                .all(|&r| self.selection[r] < self.candidate_count(r).max(1)),
            "edit menu selection out of range"
        );
    }

    fn rebuild_candidates(&mut self, row: EditMenuRow) {
        match row {
            EditMenuRow::Group | EditMenuRow::StepsType | EditMenuRow::SourceStepsType => {}
            EditMenuRow::Song => {
                self.songs = match self.selected_group() {
                    Some(group) => visible_songs(
                        &*self.services.songs,
                        &*self.services.visibility,
                        group,
                    ),
                    None => Vec::new(),
                };
                self.selection[EditMenuRow::Song] = 0;
            }
            EditMenuRow::Steps => {
                // Collapse an expanded edit index back onto the Edit tier slot.
                self.selection[EditMenuRow::Steps] =
                    clamp_index(self.selection[EditMenuRow::Steps], self.difficulties.len());
                self.steps = steps_candidates(
                    self.selected_song().map(|s| &**s),
                    self.selected_steps_type(),
                    &self.difficulties,
                );
            }
            EditMenuRow::SourceSteps => {
                self.selection[EditMenuRow::SourceSteps] = clamp_index(
                    self.selection[EditMenuRow::SourceSteps],
                    self.source_difficulties.len(),
                );
                self.source_steps = source_steps_candidates(
                    self.selected_song().map(|s| &**s),
                    self.selected_source_steps_type(),
                    &self.source_difficulties,
                );
            }
            EditMenuRow::Action => {
                self.actions = action_candidates(self.selected_steps().map(|c| &**c));
                self.selection[EditMenuRow::Action] = 0;
            }
        }
    }

    fn refresh_display(&mut self, row: EditMenuRow) {
        match row {
            EditMenuRow::Group => {
                let group = self.selected_group().unwrap_or_default().to_string();
                let short = self.services.songs.short_group_name(&group);
                let banner = self.services.songs.group_banner(&group);
                self.view.set_row_value(row, &short);
                self.view.set_group_banner(&group, banner);
            }
            EditMenuRow::Song => {
                let song = self.selected_song().cloned();
                self.view.set_row_value(row, "");
                self.view.set_song_banner(song.as_deref());
            }
            EditMenuRow::StepsType => {
                let text = steps_type_display_name(self.selected_steps_type());
                self.view.set_row_value(row, &text);
            }
            EditMenuRow::Steps => {
                let difficulty = self.selected_difficulty();
                let text = match self.selected_steps() {
                    Some(chart) if difficulty == Difficulty::Edit => {
                        format!("{} ({})", edit_name(chart), Difficulty::Edit.display_name())
                    }
                    _ if self.home_edit_mode => format!("New {}", difficulty.display_name()),
                    _ => difficulty.display_name().to_string(),
                };
                self.view.set_row_value(row, &text);
                match self.selected_steps().cloned() {
                    Some(chart) => self.view.set_meter(
                        MeterSlot::Steps,
                        chart.meter,
                        difficulty,
                        &chart.step_artist,
                    ),
                    None => self.view.set_meter(MeterSlot::Steps, 0, difficulty, ""),
                }
            }
            EditMenuRow::SourceStepsType => {
                let hidden = self.is_row_hidden(row);
                let text = steps_type_display_name(self.selected_source_steps_type());
                self.view.set_row_hidden(row, hidden);
                self.view.set_row_value(row, &text);
            }
            EditMenuRow::SourceSteps => {
                let hidden = self.is_row_hidden(row);
                self.view.set_row_hidden(row, hidden);

                let source = self.selected_source_steps().cloned();
                let text = match (self.selected_source_difficulty(), &source) {
                    (None, _) => BLANK_TEXT.to_string(),
                    (Some(Difficulty::Edit), Some(chart)) => {
                        format!("{} ({})", chart.description, Difficulty::Edit.display_name())
                    }
                    (Some(d), _) => d.display_name().to_string(),
                };
                self.view.set_row_value(row, &text);

                match (self.selected_source_difficulty(), &source) {
                    (None, _) => {}
                    (Some(_), Some(chart)) => {
                        self.view.set_meter(
                            MeterSlot::Source,
                            chart.meter,
                            chart.difficulty,
                            &chart.step_artist,
                        );
                    }
                    (Some(d), None) => self.view.set_meter(MeterSlot::Source, 0, d, ""),
                }
                let blank = self.selected_source_difficulty().is_none();
                self.view.set_meter_hidden(MeterSlot::Source, blank || hidden);
            }
            EditMenuRow::Action => {
                let text = self.selected_action().map_or("", EditMenuAction::label);
                self.view.set_row_value(row, text);
            }
        }
    }

    /* ----------------------------- accessors ---------------------------- */

    pub fn selected_row(&self) -> EditMenuRow {
        self.selected_row
    }

    #[cfg(test)]
    pub fn selection(&self, row: EditMenuRow) -> usize {
        self.selection[row]
    }

    pub fn candidate_count(&self, row: EditMenuRow) -> usize {
        match row {
            EditMenuRow::Group => self.groups.len(),
            EditMenuRow::Song => self.songs.len(),
            EditMenuRow::StepsType | EditMenuRow::SourceStepsType => self.steps_types.len(),
            EditMenuRow::Steps => self.steps.len(),
            EditMenuRow::SourceSteps => self.source_steps.len(),
            EditMenuRow::Action => self.actions.len(),
        }
    }

    /// Source rows are skipped while Steps names an existing chart.
    pub fn is_row_hidden(&self, row: EditMenuRow) -> bool {
        matches!(row, EditMenuRow::SourceStepsType | EditMenuRow::SourceSteps)
            && self.selected_steps().is_some()
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    #[cfg(test)]
    pub fn songs(&self) -> &[Arc<SongData>] {
        &self.songs
    }

    #[cfg(test)]
    pub fn steps_candidates(&self) -> &[StepsEntry] {
        &self.steps
    }

    #[cfg(test)]
    pub fn source_steps_candidates(&self) -> &[SourceStepsEntry] {
        &self.source_steps
    }

    #[cfg(test)]
    pub fn actions(&self) -> &[EditMenuAction] {
        &self.actions
    }

    pub fn selected_group(&self) -> Option<&str> {
        pick(&self.groups, self.selection[EditMenuRow::Group]).map(String::as_str)
    }

    pub fn selected_song(&self) -> Option<&Arc<SongData>> {
        pick(&self.songs, self.selection[EditMenuRow::Song])
    }

    pub fn selected_steps_type(&self) -> &str {
        pick(&self.steps_types, self.selection[EditMenuRow::StepsType])
            .map_or(DEFAULT_STEPS_TYPE, String::as_str)
    }

    pub fn selected_steps(&self) -> Option<&Arc<ChartData>> {
        pick(&self.steps, self.selection[EditMenuRow::Steps]).and_then(|e| e.chart.as_ref())
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        match pick(&self.steps, self.selection[EditMenuRow::Steps]) {
            Some(entry) => entry.difficulty,
            None => *pick(&self.difficulties, self.selection[EditMenuRow::Steps])
                .unwrap_or(&Difficulty::Edit),
        }
    }

    pub fn selected_source_steps_type(&self) -> &str {
        pick(&self.steps_types, self.selection[EditMenuRow::SourceStepsType])
            .map_or(DEFAULT_STEPS_TYPE, String::as_str)
    }

    pub fn selected_source_steps(&self) -> Option<&Arc<ChartData>> {
        pick(&self.source_steps, self.selection[EditMenuRow::SourceSteps])
            .and_then(|e| e.chart.as_ref())
    }

    /// `None` means Blank: the new chart starts empty.
    pub fn selected_source_difficulty(&self) -> Option<Difficulty> {
        pick(&self.source_steps, self.selection[EditMenuRow::SourceSteps])
            .and_then(|e| e.difficulty)
    }

    pub fn selected_action(&self) -> Option<EditMenuAction> {
        pick(&self.actions, self.selection[EditMenuRow::Action]).copied()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    #[cfg(test)]
    pub fn feedback(&self) -> &F {
        &self.feedback
    }
}

fn edit_name(chart: &ChartData) -> &str {
    if chart.description.is_empty() {
        NO_NAME_TEXT
    } else {
        chart.description.as_str()
    }
}
