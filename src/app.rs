use crate::list::{self, TaskList};
use crate::pomodoro::{self, PomodoroTimer};
use crate::storage::Storage;
use crate::task::{self, Task};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_stored(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    Today,
    Priority,
}

impl ViewFilter {
    pub fn label(self) -> &'static str {
        match self {
            ViewFilter::All => "All",
            ViewFilter::Today => "Today",
            ViewFilter::Priority => "Priority",
        }
    }
}

/// Owning context for the whole application: lists, timer, theme and the
/// selection/filter state the UI renders from. Every mutation goes through
/// the store operations and is followed by a save through the storage
/// adapter; nothing else touches persistence.
pub struct App<S: Storage> {
    pub storage: S,
    pub lists: Vec<TaskList>,
    pub timer: PomodoroTimer,
    pub daily_count: u32,
    pub theme: Theme,
    pub filter: ViewFilter,
    pub selected_list: usize,
    pub selected_task: usize,
}

impl<S: Storage> App<S> {
    pub fn new(storage: S) -> Self {
        let lists = list::load_lists(&storage);
        let daily_count = pomodoro::load_daily_count(&storage);
        let theme = Theme::from_stored(storage.load(THEME_KEY));
        Self {
            storage,
            lists,
            timer: PomodoroTimer::new(),
            daily_count,
            theme,
            filter: ViewFilter::All,
            selected_list: 0,
            selected_task: 0,
        }
    }

    pub fn save(&mut self) {
        list::save_lists(&mut self.storage, &self.lists);
    }

    pub fn current_list(&self) -> Option<&TaskList> {
        self.lists.get(self.selected_list)
    }

    fn current_list_mut(&mut self) -> Option<&mut TaskList> {
        self.lists.get_mut(self.selected_list)
    }

    /// Tasks of the current list in display order for the active filter.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let Some(list) = self.current_list() else {
            return Vec::new();
        };
        match self.filter {
            ViewFilter::All => task::sort_for_display(&list.tasks),
            ViewFilter::Today => task::filter_today(&list.tasks),
            ViewFilter::Priority => task::filter_priority(&list.tasks),
        }
    }

    pub fn selected_task_id(&self) -> Option<u64> {
        self.visible_tasks().get(self.selected_task).map(|t| t.id)
    }

    pub fn add_task(&mut self, text: &str) {
        let Some(list) = self.current_list_mut() else {
            return;
        };
        if task::create_task(&mut list.tasks, text).is_some() {
            self.save();
        }
    }

    pub fn toggle_completed(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(list) = self.current_list_mut() {
            task::toggle_completed(&mut list.tasks, id);
        }
        self.save();
        self.clamp_task_selection();
    }

    pub fn toggle_priority(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(list) = self.current_list_mut() {
            task::toggle_priority(&mut list.tasks, id);
        }
        self.save();
        self.clamp_task_selection();
    }

    pub fn toggle_today(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(list) = self.current_list_mut() {
            task::toggle_today(&mut list.tasks, id);
        }
        self.save();
        self.clamp_task_selection();
    }

    pub fn edit_selected_task(&mut self, new_text: &str) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let Some(list) = self.current_list_mut() else {
            return;
        };
        if task::edit_text(&mut list.tasks, id, new_text) {
            self.save();
        }
    }

    pub fn delete_selected_task(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(list) = self.current_list_mut() {
            task::delete_task(&mut list.tasks, id);
        }
        self.save();
        self.clamp_task_selection();
    }

    pub fn add_list(&mut self, name: &str, icon: &str) {
        if list::create_list(&mut self.lists, name, icon).is_some() {
            self.selected_list = self.lists.len() - 1;
            self.selected_task = 0;
            self.save();
        }
    }

    pub fn delete_current_list(&mut self) {
        let Some(id) = self.current_list().map(|l| l.id) else {
            return;
        };
        list::delete_list(&mut self.lists, id);
        if self.selected_list >= self.lists.len() {
            self.selected_list = self.lists.len().saturating_sub(1);
        }
        self.selected_task = 0;
        self.save();
    }

    /// One-second heartbeat from the event loop. The daily count is
    /// re-read only when a work phase just finished.
    pub fn tick(&mut self) {
        let was_break = self.timer.is_break;
        self.timer.tick(&mut self.storage);
        if !was_break && self.timer.is_break {
            self.daily_count = pomodoro::load_daily_count(&self.storage);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.storage.save(THEME_KEY, self.theme.as_str());
    }

    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            ViewFilter::All => ViewFilter::Today,
            ViewFilter::Today => ViewFilter::Priority,
            ViewFilter::Priority => ViewFilter::All,
        };
        self.selected_task = 0;
    }

    pub fn select_next_task(&mut self) {
        let len = self.visible_tasks().len();
        if len > 0 && self.selected_task < len - 1 {
            self.selected_task += 1;
        }
    }

    pub fn select_prev_task(&mut self) {
        if self.selected_task > 0 {
            self.selected_task -= 1;
        }
    }

    pub fn select_next_list(&mut self) {
        if self.selected_list + 1 < self.lists.len() {
            self.selected_list += 1;
            self.selected_task = 0;
        }
    }

    pub fn select_prev_list(&mut self) {
        if self.selected_list > 0 {
            self.selected_list -= 1;
            self.selected_task = 0;
        }
    }

    fn clamp_task_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_task >= len {
            self.selected_task = len.saturating_sub(1);
        }
    }
}
