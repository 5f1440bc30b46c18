use std::time::{Duration, Instant};

use crate::client::{ApiClient, CachedQuery, ClientError, InvalidationReceiver, QueryKey};
use crate::glow;
use crate::models::{
    BrandDeal, BrandDealPatch, CreatorIdea, CreatorIdeaPatch, EditingTask, EditingTaskPatch, Event,
    FocusSession, Habit, NewCreatorIdea, NewEvent, NewFocusSession, NewHabit, NewTask, Task,
    TaskPatch,
};
use crate::tui::error::TuiError;
use crate::tui::widgets::input::Input;
use crate::utils::{current_date_string, shift_date};
use crate::Config;

/// Focus countdown length in minutes; also the duration logged to the server.
pub const FOCUS_MINUTES: u64 = 25;
/// Break countdown length in minutes. Breaks are not logged.
pub const BREAK_MINUTES: u64 = 5;

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Tasks,
    Planner,
    Glow,
    Studio,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Tasks, Tab::Planner, Tab::Glow, Tab::Studio];

    pub fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Tasks => 1,
            Tab::Planner => 2,
            Tab::Glow => 3,
            Tab::Studio => 4,
        }
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Create,
    ConfirmDelete,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskListView {
    Daily,
    Master,
}

impl TaskListView {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskListView::Daily => "daily",
            TaskListView::Master => "master",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            TaskListView::Daily => TaskListView::Master,
            TaskListView::Master => TaskListView::Daily,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioSection {
    Ideas,
    Editing,
    Brands,
}

impl StudioSection {
    pub fn cycle(self) -> Self {
        match self {
            StudioSection::Ideas => StudioSection::Editing,
            StudioSection::Editing => StudioSection::Brands,
            StudioSection::Brands => StudioSection::Ideas,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StudioSection::Ideas => "Idea Vault",
            StudioSection::Editing => "Edit & Track",
            StudioSection::Brands => "Brand Deals",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Focus,
    Break,
}

/// A running countdown. Only the start instant and total length are stored;
/// the remaining time is derived on every tick.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    pub kind: TimerKind,
    started: Instant,
    total: Duration,
}

impl Timer {
    pub fn focus() -> Self {
        Self {
            kind: TimerKind::Focus,
            started: Instant::now(),
            total: Duration::from_secs(FOCUS_MINUTES * 60),
        }
    }

    pub fn break_timer() -> Self {
        Self {
            kind: TimerKind::Break,
            started: Instant::now(),
            total: Duration::from_secs(BREAK_MINUTES * 60),
        }
    }

    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.started.elapsed())
    }

    pub fn is_finished(&self) -> bool {
        self.remaining().is_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Task,
    Event,
    Idea,
}

#[derive(Debug)]
pub struct FormField {
    pub label: &'static str,
    pub input: Input,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            input: Input::default(),
        }
    }
}

/// A create form: a short stack of single-line fields. Enter advances and
/// submits from the last field; empty optional fields fall back to entity
/// defaults on submit.
#[derive(Debug)]
pub struct CreateForm {
    pub kind: FormKind,
    pub title: &'static str,
    pub fields: Vec<FormField>,
    pub current: usize,
}

impl CreateForm {
    fn task() -> Self {
        Self {
            kind: FormKind::Task,
            title: "New Task",
            fields: vec![
                FormField::new("Title"),
                FormField::new("Category"),
                FormField::new("Priority (high/medium/low)"),
            ],
            current: 0,
        }
    }

    fn event(date: &str) -> Self {
        let mut form = Self {
            kind: FormKind::Event,
            title: "New Event",
            fields: vec![
                FormField::new("Title"),
                FormField::new("Date"),
                FormField::new("Time (e.g. 10:00 AM)"),
                FormField::new("Location"),
            ],
            current: 0,
        };
        form.fields[1].input.set_value(date);
        form
    }

    fn idea() -> Self {
        Self {
            kind: FormKind::Idea,
            title: "New Idea",
            fields: vec![
                FormField::new("Title"),
                FormField::new("Category"),
                FormField::new("Platform"),
            ],
            current: 0,
        }
    }

    pub fn current_input(&mut self) -> &mut Input {
        let index = self.current;
        &mut self.fields[index].input
    }

    pub fn next_field(&mut self) {
        self.current = (self.current + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.current = (self.current + self.fields.len() - 1) % self.fields.len();
    }

    pub fn on_last_field(&self) -> bool {
        self.current + 1 == self.fields.len()
    }

    fn value(&self, index: usize) -> Option<String> {
        let trimmed = self.fields[index].input.value().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub enum PendingDelete {
    Task(i64),
    Event(i64),
    Idea(i64),
    EditingTask(i64),
    BrandDeal(i64),
}

#[derive(Debug)]
pub struct UiState {
    pub current_tab: Tab,
    pub mode: Mode,
    pub selected_index: usize,
    pub task_view: TaskListView,
    pub studio_section: StudioSection,
    pub planner_date: String,
}

#[derive(Debug, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

/// Cached collections backing the views. Each entry refetches lazily when a
/// mutation invalidates its resource.
pub struct Collections {
    pub daily_tasks: CachedQuery<Task>,
    pub master_tasks: CachedQuery<Task>,
    pub events: CachedQuery<Event>,
    pub today_events: CachedQuery<Event>,
    pub habits: CachedQuery<Habit>,
    pub focus_sessions: CachedQuery<FocusSession>,
    pub ideas: CachedQuery<CreatorIdea>,
    pub editing: CachedQuery<EditingTask>,
    pub brand_deals: CachedQuery<BrandDeal>,
}

impl Collections {
    fn new(today: &str) -> Self {
        Self {
            daily_tasks: CachedQuery::new(QueryKey::filtered("tasks", "list", "daily")),
            master_tasks: CachedQuery::new(QueryKey::filtered("tasks", "list", "master")),
            events: CachedQuery::new(QueryKey::filtered("events", "date", today)),
            today_events: CachedQuery::new(QueryKey::filtered("events", "date", today)),
            habits: CachedQuery::new(QueryKey::filtered("habits", "date", today)),
            focus_sessions: CachedQuery::new(QueryKey::filtered("focus-sessions", "date", today)),
            ideas: CachedQuery::new(QueryKey::collection("creator-ideas")),
            editing: CachedQuery::new(QueryKey::collection("editing-tasks")),
            brand_deals: CachedQuery::new(QueryKey::collection("brand-deals")),
        }
    }

    fn apply_invalidation(&mut self, resource: &str) {
        self.daily_tasks.apply_invalidation(resource);
        self.master_tasks.apply_invalidation(resource);
        self.events.apply_invalidation(resource);
        self.today_events.apply_invalidation(resource);
        self.habits.apply_invalidation(resource);
        self.focus_sessions.apply_invalidation(resource);
        self.ideas.apply_invalidation(resource);
        self.editing.apply_invalidation(resource);
        self.brand_deals.apply_invalidation(resource);
    }
}

pub struct App {
    pub config: Config,
    pub client: ApiClient,
    invalidations: InvalidationReceiver,

    pub data: Collections,

    pub ui: UiState,
    pub status: StatusState,
    pub form: Option<CreateForm>,
    pub pending_delete: Option<(String, PendingDelete)>,
    pub delete_selection: usize,
    pub timer: Option<Timer>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        client: ApiClient,
        invalidations: InvalidationReceiver,
    ) -> Result<Self, TuiError> {
        let today = current_date_string();
        let mut app = Self {
            config,
            client,
            invalidations,
            data: Collections::new(&today),
            ui: UiState {
                current_tab: Tab::Home,
                mode: Mode::View,
                selected_index: 0,
                task_view: TaskListView::Daily,
                studio_section: StudioSection::Ideas,
                planner_date: today,
            },
            status: StatusState::default(),
            form: None,
            pending_delete: None,
            delete_selection: 0,
            timer: None,
            should_quit: false,
        };
        // Initial load; a dead server is reported up front instead of
        // rendering an empty shell.
        app.refresh()?;
        Ok(app)
    }

    /// Refetch every stale collection.
    pub fn refresh(&mut self) -> Result<(), ClientError> {
        let client = &self.client;
        self.data.daily_tasks.refresh_with(|key| client.fetch(key))?;
        self.data.master_tasks.refresh_with(|key| client.fetch(key))?;
        self.data.events.refresh_with(|key| client.fetch(key))?;
        self.data.today_events.refresh_with(|key| client.fetch(key))?;
        self.data.habits.refresh_with(|key| client.fetch(key))?;
        self.data
            .focus_sessions
            .refresh_with(|key| client.fetch(key))?;
        self.data.ideas.refresh_with(|key| client.fetch(key))?;
        self.data.editing.refresh_with(|key| client.fetch(key))?;
        self.data.brand_deals.refresh_with(|key| client.fetch(key))?;
        Ok(())
    }

    /// Drain pending invalidation signals and refetch what went stale.
    pub fn sync(&mut self) {
        for resource in self.invalidations.drain() {
            self.data.apply_invalidation(resource);
        }
        if let Err(e) = self.refresh() {
            self.set_status(format!("Sync failed: {}", e));
        }
        self.clamp_selection();
    }

    /// Per-frame housekeeping: status timeout and timer completion.
    pub fn tick(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status.message = None;
                self.status.message_time = None;
            }
        }

        if let Some(timer) = self.timer {
            if timer.is_finished() {
                self.timer = None;
                match timer.kind {
                    TimerKind::Focus => self.log_focus_session(),
                    TimerKind::Break => self.set_status("Break over. Back to it!".to_string()),
                }
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    // ─── Selection ───────────────────────────────────────

    /// Tasks for the active list view, open ones first.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let tasks = match self.ui.task_view {
            TaskListView::Daily => self.data.daily_tasks.data(),
            TaskListView::Master => self.data.master_tasks.data(),
        };
        let mut visible: Vec<&Task> = tasks.iter().filter(|t| !t.done).collect();
        visible.extend(tasks.iter().filter(|t| t.done));
        visible
    }

    pub fn current_list_len(&self) -> usize {
        match self.ui.current_tab {
            Tab::Home => 0,
            Tab::Tasks => self.visible_tasks().len(),
            Tab::Planner => self.data.events.data().len(),
            Tab::Glow => glow::HABIT_DEFS.len(),
            Tab::Studio => match self.ui.studio_section {
                StudioSection::Ideas => self.data.ideas.data().len(),
                StudioSection::Editing => self.data.editing.data().len(),
                StudioSection::Brands => self.data.brand_deals.data().len(),
            },
        }
    }

    pub fn select_next(&mut self) {
        let len = self.current_list_len();
        if len > 0 {
            self.ui.selected_index = (self.ui.selected_index + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.current_list_len();
        if len > 0 {
            self.ui.selected_index = (self.ui.selected_index + len - 1) % len;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            self.ui.selected_index = 0;
        } else if self.ui.selected_index >= len {
            self.ui.selected_index = len - 1;
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.ui.current_tab != tab {
            self.ui.current_tab = tab;
            self.ui.selected_index = 0;
        }
    }

    pub fn toggle_task_view(&mut self) {
        self.ui.task_view = self.ui.task_view.toggle();
        self.ui.selected_index = 0;
    }

    pub fn cycle_studio_section(&mut self) {
        self.ui.studio_section = self.ui.studio_section.cycle();
        self.ui.selected_index = 0;
    }

    // ─── Planner ─────────────────────────────────────────

    pub fn shift_planner_date(&mut self, days: i64) {
        self.ui.planner_date = shift_date(&self.ui.planner_date, days);
        let key = QueryKey::filtered("events", "date", self.ui.planner_date.clone());
        self.data.events.retarget(key);
        self.ui.selected_index = 0;
        self.sync();
    }

    // ─── Mutations ───────────────────────────────────────

    fn report<T>(&mut self, result: Result<T, ClientError>, success: &str) -> Option<T> {
        match result {
            Ok(value) => {
                if !success.is_empty() {
                    self.set_status(success.to_string());
                }
                Some(value)
            }
            Err(e) => {
                self.set_status(format!("{}", e));
                None
            }
        }
    }

    /// Flip the done flag of the selected task.
    pub fn toggle_selected_task(&mut self) {
        let Some(task) = self.visible_tasks().get(self.ui.selected_index).copied() else {
            return;
        };
        let (id, done) = (task.id, task.done);
        let result = self.client.update_task(id, &TaskPatch::done(!done));
        self.report(result, "");
        self.sync();
    }

    /// Move the selected habit by a delta. The wire value is absolute: read
    /// the cached value, apply the delta, clamp at zero, send the result.
    pub fn bump_selected_habit(&mut self, direction: i64) {
        let Some(def) = glow::HABIT_DEFS.get(self.ui.selected_index) else {
            return;
        };
        let rows = self.data.habits.data();
        let current = glow::value_for(rows, def.key);
        let target = rows
            .iter()
            .find(|h| h.habit_key == def.key)
            .map(|h| h.target)
            .unwrap_or(def.target);
        let step = if def.key == "steps" { 500 } else { 1 };
        let value = (current + direction * step).max(0);

        let mut habit = NewHabit::new(def.key.to_string(), value, target);
        habit.date = current_date_string();
        let result = self.client.upsert_habit(&habit);
        self.report(result, "");
        self.sync();
    }

    /// Cycle the status of the selected studio item through its pipeline.
    pub fn cycle_selected_status(&mut self) {
        match self.ui.studio_section {
            StudioSection::Ideas => {
                let Some(idea) = self.data.ideas.data().get(self.ui.selected_index) else {
                    return;
                };
                let next = next_in_cycle(
                    &idea.status,
                    &["Idea", "Filming", "Editing", "Posted"],
                );
                let result = self
                    .client
                    .update_creator_idea(idea.id, &CreatorIdeaPatch::status(next));
                self.report(result, "");
            }
            StudioSection::Editing => {
                let Some(task) = self.data.editing.data().get(self.ui.selected_index) else {
                    return;
                };
                let next = next_in_cycle(&task.status, &["To Edit", "Editing", "Done"]);
                let result = self
                    .client
                    .update_editing_task(task.id, &EditingTaskPatch::status(next));
                self.report(result, "");
            }
            StudioSection::Brands => {
                let Some(deal) = self.data.brand_deals.data().get(self.ui.selected_index) else {
                    return;
                };
                let next = next_in_cycle(
                    &deal.status,
                    &["Idea", "Pitched", "Negotiating", "Confirmed", "Done"],
                );
                let result = self
                    .client
                    .update_brand_deal(deal.id, &BrandDealPatch::status(next));
                self.report(result, "");
            }
        }
        self.sync();
    }

    // ─── Focus timer ─────────────────────────────────────

    pub fn toggle_focus_timer(&mut self) {
        match self.timer {
            Some(timer) if timer.kind == TimerKind::Focus => {
                self.timer = None;
                self.set_status("Focus session cancelled".to_string());
            }
            _ => {
                self.timer = Some(Timer::focus());
                self.set_status(format!("Deep focus: {} minutes", FOCUS_MINUTES));
            }
        }
    }

    pub fn toggle_break_timer(&mut self) {
        match self.timer {
            Some(timer) if timer.kind == TimerKind::Break => {
                self.timer = None;
            }
            _ => {
                self.timer = Some(Timer::break_timer());
                self.set_status(format!("Break: {} minutes", BREAK_MINUTES));
            }
        }
    }

    fn log_focus_session(&mut self) {
        let session = NewFocusSession::new(FOCUS_MINUTES as i64);
        let result = self.client.log_focus_session(&session);
        self.report(result, "Focus session complete! Logged 25 minutes.");
        self.sync();
    }

    // ─── Create forms ────────────────────────────────────

    /// Open the create form for the active tab, if it has one.
    pub fn open_form(&mut self) {
        let form = match self.ui.current_tab {
            Tab::Tasks => Some(CreateForm::task()),
            Tab::Planner => Some(CreateForm::event(&self.ui.planner_date)),
            Tab::Studio if self.ui.studio_section == StudioSection::Ideas => {
                Some(CreateForm::idea())
            }
            _ => None,
        };
        if let Some(form) = form {
            self.form = Some(form);
            self.ui.mode = Mode::Create;
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.ui.mode = Mode::View;
    }

    /// Build the payload from the form and send it. Missing optional fields
    /// fall back to the entity defaults.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        self.ui.mode = Mode::View;

        match form.kind {
            FormKind::Task => {
                let Some(title) = form.value(0) else {
                    self.set_status("Title is required".to_string());
                    return;
                };
                let mut task = NewTask::new(title);
                task.list = self.ui.task_view.as_str().to_string();
                if let Some(category) = form.value(1) {
                    task.category = category;
                }
                if let Some(priority) = form.value(2) {
                    if !["high", "medium", "low"].contains(&priority.as_str()) {
                        self.set_status("Priority must be high, medium or low".to_string());
                        return;
                    }
                    task.priority = priority;
                }
                let result = self.client.create_task(&task);
                self.report(result, "Task created");
            }
            FormKind::Event => {
                let (Some(title), Some(date), Some(time)) =
                    (form.value(0), form.value(1), form.value(2))
                else {
                    self.set_status("Title, date and time are required".to_string());
                    return;
                };
                let mut event = NewEvent::new(title, date, time);
                event.location = form.value(3);
                let result = self.client.create_event(&event);
                self.report(result, "Event added");
            }
            FormKind::Idea => {
                let Some(title) = form.value(0) else {
                    self.set_status("Title is required".to_string());
                    return;
                };
                let mut idea = NewCreatorIdea::new(title);
                if let Some(category) = form.value(1) {
                    idea.category = category;
                }
                if let Some(platform) = form.value(2) {
                    idea.platform = platform;
                }
                let result = self.client.create_creator_idea(&idea);
                self.report(result, "Idea captured");
            }
        }
        self.sync();
    }

    // ─── Delete ──────────────────────────────────────────

    /// Stage a delete of the selected item behind a confirmation modal.
    pub fn request_delete(&mut self) {
        let pending = match self.ui.current_tab {
            Tab::Tasks => self
                .visible_tasks()
                .get(self.ui.selected_index)
                .map(|t| (t.title.clone(), PendingDelete::Task(t.id))),
            Tab::Planner => self
                .data
                .events
                .data()
                .get(self.ui.selected_index)
                .map(|e| (e.title.clone(), PendingDelete::Event(e.id))),
            Tab::Studio => match self.ui.studio_section {
                StudioSection::Ideas => self
                    .data
                    .ideas
                    .data()
                    .get(self.ui.selected_index)
                    .map(|i| (i.title.clone(), PendingDelete::Idea(i.id))),
                StudioSection::Editing => self
                    .data
                    .editing
                    .data()
                    .get(self.ui.selected_index)
                    .map(|t| (t.title.clone(), PendingDelete::EditingTask(t.id))),
                StudioSection::Brands => self
                    .data
                    .brand_deals
                    .data()
                    .get(self.ui.selected_index)
                    .map(|d| (d.name.clone(), PendingDelete::BrandDeal(d.id))),
            },
            _ => None,
        };

        if let Some(pending) = pending {
            self.pending_delete = Some(pending);
            self.delete_selection = 0;
            self.ui.mode = Mode::ConfirmDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.ui.mode = Mode::View;
    }

    pub fn confirm_delete(&mut self) {
        let Some((_, pending)) = self.pending_delete.take() else {
            self.ui.mode = Mode::View;
            return;
        };
        self.ui.mode = Mode::View;

        let result = match pending {
            PendingDelete::Task(id) => self.client.delete_task(id),
            PendingDelete::Event(id) => self.client.delete_event(id),
            PendingDelete::Idea(id) => self.client.delete_creator_idea(id),
            PendingDelete::EditingTask(id) => self.client.delete_editing_task(id),
            PendingDelete::BrandDeal(id) => self.client.delete_brand_deal(id),
        };
        self.report(result, "Deleted");
        self.sync();
    }

    // ─── Derived data for the views ──────────────────────

    pub fn glow_score_today(&self) -> u8 {
        glow::glow_score(self.data.habits.data())
    }

    pub fn focus_minutes_today(&self) -> i64 {
        self.data
            .focus_sessions
            .data()
            .iter()
            .map(|s| s.duration)
            .sum()
    }
}

/// Advance a status through its pipeline, wrapping at the end. Unknown
/// statuses restart the pipeline.
fn next_in_cycle(current: &str, cycle: &[&str]) -> String {
    let position = cycle.iter().position(|s| *s == current);
    match position {
        Some(i) => cycle[(i + 1) % cycle.len()].to_string(),
        None => cycle[0].to_string(),
    }
}
