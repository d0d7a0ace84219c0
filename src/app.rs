//! Application state and the handlers that mutate it.
//!
//! Every handler that touches tasks or schedules saves the whole document
//! right away and marks the app dirty so the current page is redrawn.

use chrono::{Days, Months, NaiveDate};
use ratatui::layout::Rect;
use tracing::{error, info, warn};

use crate::canvas::{Brush, Canvas};
use crate::page::{NavAction, Page};
use crate::schedule::{self, DayKind};
use crate::store::{Document, LoadResult, Store};
use crate::task::{Task, TaskId};

pub const PEN_COLORS: [&str; 6] = [
    "#000000", "#FF0000", "#0000FF", "#008000", "#FFA500", "#800080",
];
pub const BACKGROUND_COLORS: [&str; 4] = ["#FFFFFF", "#F0FFFF", "#FFFFE0", "#000000"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Student {
    pub name: &'static str,
    pub color: &'static str,
}

pub const STUDENTS: [Student; 3] = [
    Student { name: "佐藤太郎", color: "#FF0000" },
    Student { name: "田中花子", color: "#0000FF" },
    Student { name: "山本健太", color: "#008000" },
];
pub const WHITEBOARD_BACKGROUND: &str = "#F0FFFF";
const WHITEBOARD_STROKE_WIDTH: u8 = 3;

pub const SAVED_MESSAGE: &str = "保存しました！";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditingTask,
    EditingNote,
    EditingMemo,
}

pub struct App {
    store: Store,
    document: Document,
    pub page: Page,
    pub dirty: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub input_mode: InputMode,
    pub input: String,
    /// Index into the incomplete tasks followed by the completed ones.
    pub selected_task: usize,
    pub selected_date: NaiveDate,
    pub notebook: Canvas,
    pub memo: String,
    pub whiteboards: Vec<Canvas>,
    pub active_student: usize,
    /// Screen area of the visible canvas, recorded by the renderer.
    pub canvas_area: Option<Rect>,
}

impl App {
    pub fn new(store: Store, document: Document, today: NaiveDate) -> Self {
        let whiteboards = STUDENTS
            .iter()
            .map(|s| Canvas::new(Brush::new(s.color, WHITEBOARD_STROKE_WIDTH, WHITEBOARD_BACKGROUND)))
            .collect();
        Self {
            store,
            document,
            page: Page::default(),
            dirty: true,
            should_quit: false,
            status_message: None,
            input_mode: InputMode::Normal,
            input: String::new(),
            selected_task: 0,
            selected_date: today,
            notebook: Canvas::default(),
            memo: String::new(),
            whiteboards,
            active_student: 0,
            canvas_area: None,
        }
    }

    /// Builds the app from the one load performed at startup.
    pub fn from_load(store: Store, loaded: LoadResult, today: NaiveDate) -> Self {
        let message = match &loaded {
            LoadResult::Corrupt { backup: Some(path), .. } => Some(format!(
                "データファイルを読み込めませんでした（{} に退避）",
                path.display()
            )),
            LoadResult::Corrupt { backup: None, .. } => {
                Some("データファイルを読み込めませんでした".to_string())
            }
            LoadResult::Loaded(_) | LoadResult::Missing => None,
        };
        let mut app = Self::new(store, loaded.into_document(), today);
        app.status_message = message;
        app
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.document) {
            error!(error = %err, "failed to save data file");
            self.status_message = Some(format!("保存に失敗しました: {err}"));
        }
    }

    // -- Navigation --

    pub fn navigate(&mut self, page: Page) {
        self.apply_nav(NavAction::Open(page));
    }

    pub fn go_home(&mut self) {
        self.apply_nav(NavAction::Home);
    }

    fn apply_nav(&mut self, action: NavAction) {
        let next = self.page.apply(action);
        info!(from = ?self.page, to = ?next, "navigate");
        self.page = next;
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.canvas_area = None;
        self.mark_dirty();
    }

    // -- Tasks --

    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let id = self.document.tasks.add_task(text)?;
        info!(id, "task created");
        self.persist();
        self.mark_dirty();
        Some(id)
    }

    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        let found = self.document.tasks.toggle_complete(id);
        if !found {
            warn!(id, "toggle on unknown task");
        }
        self.persist();
        self.mark_dirty();
        found
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let found = self.document.tasks.delete_task(id);
        if !found {
            warn!(id, "delete on unknown task");
        }
        self.persist();
        self.clamp_task_selection();
        self.mark_dirty();
        found
    }

    pub fn list_incomplete(&self) -> Vec<&Task> {
        self.document.tasks.list_incomplete()
    }

    pub fn list_completed(&self) -> Vec<&Task> {
        self.document.tasks.list_completed()
    }

    /// Task ids in display order: incomplete first, then completed.
    pub fn task_display_order(&self) -> Vec<TaskId> {
        self.list_incomplete()
            .into_iter()
            .chain(self.list_completed())
            .map(|t| t.id)
            .collect()
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.task_display_order().get(self.selected_task).copied()
    }

    pub fn select_next_task(&mut self) {
        let len = self.document.tasks.len();
        if len > 0 && self.selected_task + 1 < len {
            self.selected_task += 1;
        }
    }

    pub fn select_prev_task(&mut self) {
        self.selected_task = self.selected_task.saturating_sub(1);
    }

    fn clamp_task_selection(&mut self) {
        let len = self.document.tasks.len();
        if self.selected_task >= len {
            self.selected_task = len.saturating_sub(1);
        }
    }

    // -- Schedules --

    pub fn get_note(&self, date: NaiveDate) -> &str {
        self.document.schedules.get_note(date)
    }

    pub fn set_note(&mut self, date: NaiveDate, text: &str) {
        self.document.schedules.set_note(date, text);
        info!(%date, cleared = text.trim().is_empty(), "schedule saved");
        self.status_message = Some(SAVED_MESSAGE.to_string());
        self.persist();
        self.mark_dirty();
    }

    pub fn classify_date(&self, date: NaiveDate) -> DayKind {
        schedule::classify_date(date)
    }

    pub fn move_date_by_days(&mut self, days: i64) {
        let delta = Days::new(days.unsigned_abs());
        let next = if days >= 0 {
            self.selected_date.checked_add_days(delta)
        } else {
            self.selected_date.checked_sub_days(delta)
        };
        if let Some(date) = next {
            self.selected_date = date;
            self.mark_dirty();
        }
    }

    pub fn move_date_by_months(&mut self, months: i32) {
        let delta = Months::new(months.unsigned_abs());
        let next = if months >= 0 {
            self.selected_date.checked_add_months(delta)
        } else {
            self.selected_date.checked_sub_months(delta)
        };
        if let Some(date) = next {
            self.selected_date = date;
            self.mark_dirty();
        }
    }

    // -- Text input --

    pub fn begin_input(&mut self, mode: InputMode) {
        self.input = match mode {
            InputMode::EditingNote => self.get_note(self.selected_date).to_string(),
            InputMode::EditingMemo => self.memo.clone(),
            InputMode::EditingTask | InputMode::Normal => String::new(),
        };
        self.input_mode = mode;
        self.mark_dirty();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.mark_dirty();
    }

    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        match self.input_mode {
            InputMode::EditingTask => {
                self.add_task(&text);
            }
            InputMode::EditingNote => self.set_note(self.selected_date, &text),
            InputMode::EditingMemo => self.memo = text,
            InputMode::Normal => {}
        }
        self.input_mode = InputMode::Normal;
        self.mark_dirty();
    }

    // -- Canvases --

    pub fn active_canvas(&self) -> Option<&Canvas> {
        match self.page {
            Page::Notebook => Some(&self.notebook),
            Page::Whiteboard => self.whiteboards.get(self.active_student),
            _ => None,
        }
    }

    pub fn active_canvas_mut(&mut self) -> Option<&mut Canvas> {
        match self.page {
            Page::Notebook => Some(&mut self.notebook),
            Page::Whiteboard => self.whiteboards.get_mut(self.active_student),
            _ => None,
        }
    }

    pub fn next_student(&mut self) {
        self.active_student = (self.active_student + 1) % self.whiteboards.len().max(1);
        self.canvas_area = None;
        self.mark_dirty();
    }

    pub fn prev_student(&mut self) {
        let len = self.whiteboards.len().max(1);
        self.active_student = (self.active_student + len - 1) % len;
        self.canvas_area = None;
        self.mark_dirty();
    }

    pub fn cycle_pen_color(&mut self) {
        let brush = &mut self.notebook.brush;
        brush.color = next_in(&PEN_COLORS, &brush.color).to_string();
        self.mark_dirty();
    }

    pub fn cycle_background(&mut self) {
        let brush = &mut self.notebook.brush;
        brush.background = next_in(&BACKGROUND_COLORS, &brush.background).to_string();
        self.mark_dirty();
    }
}

fn next_in<'a>(palette: &[&'a str], current: &str) -> &'a str {
    let i = palette
        .iter()
        .position(|c| c.eq_ignore_ascii_case(current))
        .map_or(0, |i| (i + 1) % palette.len());
    palette[i]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(next_in(&PEN_COLORS, "#800080"), "#000000");
        assert_eq!(next_in(&PEN_COLORS, "#ff0000"), "#0000FF");
        assert_eq!(next_in(&PEN_COLORS, "#123456"), "#000000");
    }
}
