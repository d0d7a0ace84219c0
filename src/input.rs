//! Maps terminal events onto [`App`] handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode};
use crate::canvas::{DrawingMode, Point};
use crate::page::Page;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    app.mark_dirty();

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode != InputMode::Normal {
        handle_text_input(app, key);
        return;
    }

    app.status_message = None;

    if app.page != Page::Dashboard && key.code == KeyCode::Esc {
        app.go_home();
        return;
    }

    match app.page {
        Page::Dashboard => handle_dashboard(app, key),
        Page::Notebook => handle_notebook(app, key),
        Page::Calendar => handle_calendar(app, key),
        Page::Tasks => handle_tasks(app, key),
        Page::Whiteboard => handle_whiteboard(app, key),
    }
}

fn handle_text_input(app: &mut App, key: KeyEvent) {
    let multiline = app.input_mode != InputMode::EditingTask;
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => app.submit_input(),
        KeyCode::Enter if multiline => app.input.push('\n'),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.input.push(c),
        _ => {}
    }
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') | KeyCode::Char('1') => app.navigate(Page::Calendar),
        KeyCode::Char('n') | KeyCode::Char('2') => app.navigate(Page::Notebook),
        KeyCode::Char('t') | KeyCode::Char('3') => app.navigate(Page::Tasks),
        KeyCode::Char('w') | KeyCode::Char('4') => app.navigate(Page::Whiteboard),
        _ => {}
    }
}

fn handle_tasks(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Char('a') | KeyCode::Char('i') => app.begin_input(InputMode::EditingTask),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_task(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_task(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(id) = app.selected_task_id() {
                app.toggle_complete(id);
                // Keep the cursor on the same task after it changes section.
                if let Some(pos) = app.task_display_order().iter().position(|t| *t == id) {
                    app.selected_task = pos;
                }
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_task_id() {
                app.delete_task(id);
            }
        }
        _ => {}
    }
}

fn handle_calendar(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Left => app.move_date_by_days(-1),
        KeyCode::Right => app.move_date_by_days(1),
        KeyCode::Up => app.move_date_by_days(-7),
        KeyCode::Down => app.move_date_by_days(7),
        KeyCode::PageUp | KeyCode::Char('<') => app.move_date_by_months(-1),
        KeyCode::PageDown | KeyCode::Char('>') => app.move_date_by_months(1),
        KeyCode::Char('t') => {
            app.selected_date = chrono::Local::now().date_naive();
        }
        KeyCode::Char('e') | KeyCode::Enter => app.begin_input(InputMode::EditingNote),
        _ => {}
    }
}

fn handle_notebook(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Char('[') => app.notebook.brush.widen(-1),
        KeyCode::Char(']') => app.notebook.brush.widen(1),
        KeyCode::Char('p') => app.cycle_pen_color(),
        KeyCode::Char('b') => app.cycle_background(),
        KeyCode::Char('m') => {
            let brush = &mut app.notebook.brush;
            brush.mode = brush.mode.next();
        }
        KeyCode::Char('i') => app.begin_input(InputMode::EditingMemo),
        _ => handle_canvas_key(app, key),
    }
}

fn handle_whiteboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') => app.go_home(),
        KeyCode::Tab => app.next_student(),
        KeyCode::BackTab => app.prev_student(),
        _ => handle_canvas_key(app, key),
    }
}

fn handle_canvas_key(app: &mut App, key: KeyEvent) {
    let Some(canvas) = app.active_canvas_mut() else {
        return;
    };
    match key.code {
        KeyCode::Left => canvas.move_cursor(-1, 0),
        KeyCode::Right => canvas.move_cursor(1, 0),
        KeyCode::Up => canvas.move_cursor(0, -1),
        KeyCode::Down => canvas.move_cursor(0, 1),
        KeyCode::Char(' ') => canvas.toggle_pen(),
        KeyCode::Char('x') => canvas.clear(),
        _ => {}
    }
}

/// Mouse drawing on the visible canvas. Presses outside the canvas are
/// ignored; drags and releases are followed even when they leave it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some(area) = app.canvas_area else {
        return;
    };
    let p = Point::new(
        i32::from(mouse.column) - i32::from(area.x),
        i32::from(mouse.row) - i32::from(area.y),
    );
    let inside = mouse.column >= area.x
        && mouse.column < area.x + area.width
        && mouse.row >= area.y
        && mouse.row < area.y + area.height;
    let Some(canvas) = app.active_canvas_mut() else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => {
            canvas.cursor = p;
            canvas.press(p);
        }
        MouseEventKind::Drag(MouseButton::Left) if canvas.is_drawing() => {
            canvas.cursor = p;
            canvas.drag(p);
        }
        MouseEventKind::Up(MouseButton::Left) if canvas.is_drawing() => {
            canvas.release(p);
        }
        _ => return,
    }
    app.mark_dirty();
}

/// Help line for the footer.
pub fn key_hints(app: &App) -> &'static str {
    match app.input_mode {
        InputMode::EditingTask => "Enter: 追加  Esc: キャンセル",
        InputMode::EditingNote => "Ctrl+S: 💾 予定を保存  Enter: 改行  Esc: キャンセル",
        InputMode::EditingMemo => "Ctrl+S: 確定  Enter: 改行  Esc: キャンセル",
        InputMode::Normal => match app.page {
            Page::Dashboard => "c: カレンダー  n: ノート  t: タスク  w: ホワイトボード  q: 終了",
            Page::Tasks => "a: 追加  ↑↓: 選択  Space: 完了切替  d: 削除  Esc: ホーム",
            Page::Calendar => "←→: 日  ↑↓: 週  </>: 月  t: 今日  e: 予定を編集  Esc: ホーム",
            Page::Notebook => match app.notebook.brush.mode {
                DrawingMode::Transform => "矢印: 移動  Space: つかむ/離す  m: モード  i: メモ  x: 消去  Esc: ホーム",
                _ => "矢印/マウス: 描画  Space: ペン  [ ]: 太さ  p: 色  b: 背景  m: モード  i: メモ  x: 消去  Esc: ホーム",
            },
            Page::Whiteboard => "Tab: 生徒切替  矢印/マウス: 描画  Space: ペン  x: 消去  Esc: ホーム",
        },
    }
}
