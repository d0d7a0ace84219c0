use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Widget, Wrap},
    Frame,
};

use crate::app::{App, InputMode, STUDENTS};
use crate::canvas::Canvas;
use crate::input::key_hints;
use crate::page::Page;
use crate::schedule::DayKind;

const WEEKDAY_HEADERS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(
        Paragraph::new(Span::styled(
            app.page.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    match app.page {
        Page::Dashboard => render_dashboard(f, chunks[1]),
        Page::Notebook => render_notebook(f, app, chunks[1]),
        Page::Calendar => render_calendar(f, app, chunks[1]),
        Page::Tasks => render_tasks(f, app, chunks[1]),
        Page::Whiteboard => render_whiteboard(f, app, chunks[1]),
    }

    let status = app.status_message.as_deref().unwrap_or("");
    f.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(Color::Green))),
        chunks[2],
    );
    f.render_widget(
        Paragraph::new(Span::styled(key_hints(app), Style::default().fg(Color::DarkGray))),
        chunks[3],
    );
}

fn render_dashboard(f: &mut Frame, area: Rect) {
    let cards = [
        ("📅 カレンダー", "スケジュールの確認と編集ができます", "[c] カレンダーを開く"),
        ("📝 デジタルノート", "自由に描画やメモができます", "[n] ノートを開く"),
        ("📋 タスクマネージャー", "To-Doリストを管理します", "[t] タスクを開く"),
        ("🎨 共有ホワイトボード", "みんなで使えるボード（シミュレーション）", "[w] ホワイトボードを開く"),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Calendar and notebook on the left, tasks and whiteboard on the right.
    for (col, pair) in columns.iter().zip(cards.chunks(2)) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*col);
        for (row, (title, info, action)) in rows.iter().zip(pair) {
            let body = vec![
                Line::from(Span::styled(*info, Style::default().fg(Color::Cyan))),
                Line::from(""),
                Line::from(Span::styled(*action, Style::default().add_modifier(Modifier::BOLD))),
            ];
            let card = Paragraph::new(body)
                .wrap(Wrap { trim: true })
                .block(Block::default().title(*title).borders(Borders::ALL));
            f.render_widget(card, *row);
        }
    }
}

fn render_tasks(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let editing = app.input_mode == InputMode::EditingTask;
    let input = Paragraph::new(if editing {
        format!("{}▏", app.input)
    } else {
        String::new()
    })
    .block(
        Block::default()
            .title("新しいタスクを入力")
            .borders(Borders::ALL)
            .border_style(focus_style(editing)),
    );
    f.render_widget(input, chunks[0]);

    let incomplete = app.list_incomplete();
    let completed = app.list_completed();
    if incomplete.is_empty() && completed.is_empty() {
        f.render_widget(
            Paragraph::new("タスクはまだありません。").style(Style::default().fg(Color::Cyan)),
            chunks[1],
        );
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let selected = app.selected_task;
    let open_items: Vec<ListItem> = incomplete
        .iter()
        .enumerate()
        .map(|(i, t)| {
            ListItem::new(Line::from(vec![
                Span::raw("⬜ "),
                Span::styled(t.text.as_str(), Style::default().fg(Color::White)),
            ]))
            .style(selected_style(i == selected))
        })
        .collect();
    let done_items: Vec<ListItem> = completed
        .iter()
        .enumerate()
        .map(|(i, t)| {
            ListItem::new(Line::from(vec![
                Span::raw("✅ "),
                Span::styled(
                    t.text.as_str(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                ),
            ]))
            .style(selected_style(incomplete.len() + i == selected))
        })
        .collect();

    f.render_widget(
        List::new(open_items).block(
            Block::default()
                .title(format!("未完了 ({})", incomplete.len()))
                .borders(Borders::ALL),
        ),
        sections[0],
    );
    f.render_widget(
        List::new(done_items).block(
            Block::default()
                .title(format!("完了済み ({})", completed.len()))
                .borders(Borders::ALL),
        ),
        sections[1],
    );
}

fn render_calendar(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);

    let date = app.selected_date;
    f.render_widget(
        Paragraph::new(month_grid(app, date)).block(
            Block::default()
                .title(format!("{}年{}月", date.year(), date.month()))
                .borders(Borders::ALL),
        ),
        left[0],
    );

    let kind = app.classify_date(date);
    let (banner, color) = match kind {
        DayKind::Holiday(name) => (format!("🎌 {name}"), Color::Red),
        DayKind::Sunday => (kind.label().to_string(), Color::Red),
        DayKind::Saturday => (kind.label().to_string(), Color::Blue),
        DayKind::Weekday => (kind.label().to_string(), Color::Green),
    };
    f.render_widget(
        Paragraph::new(Span::styled(banner, Style::default().fg(color)))
            .block(Block::default().borders(Borders::ALL)),
        left[1],
    );

    let editing = app.input_mode == InputMode::EditingNote;
    let body: Vec<Line> = if editing {
        text_lines(&format!("{}▏", app.input), Style::default())
    } else {
        let note = app.get_note(date);
        if note.is_empty() {
            vec![Line::from(Span::styled(
                "予定はありません",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            text_lines(note, Style::default())
        }
    };
    f.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(format!(
                    "{}年{}月{}日の予定",
                    date.year(),
                    date.month(),
                    date.day()
                ))
                .borders(Borders::ALL)
                .border_style(focus_style(editing)),
        ),
        columns[1],
    );
}

fn month_grid(app: &App, selected: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(
        WEEKDAY_HEADERS
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let color = match i {
                    0 => Color::Red,
                    6 => Color::Blue,
                    _ => Color::Reset,
                };
                Span::styled(format!(" {d}"), Style::default().fg(color))
            })
            .collect::<Vec<_>>(),
    )];

    let Some(first) = selected.with_day(1) else {
        return lines;
    };
    let mut week: Vec<Span> = (0..first.weekday().num_days_from_sunday())
        .map(|_| Span::raw("   "))
        .collect();

    for date in first.iter_days().take_while(|d| d.month() == first.month()) {
        let kind = app.classify_date(date);
        let mut style = if kind.is_day_off() {
            Style::default().fg(Color::Red)
        } else if kind == DayKind::Saturday {
            Style::default().fg(Color::Blue)
        } else {
            Style::default()
        };
        if date == selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let marker = if app.document().schedules.has_note(date) { '*' } else { ' ' };
        week.push(Span::styled(format!("{:>2}{marker}", date.day()), style));

        if week.len() == 7 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }
    lines
}

fn render_notebook(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(6)])
        .split(area);

    let brush = &app.notebook.brush;
    let toolbar = Line::from(vec![
        Span::raw(format!("線の太さ: {:>2}   ", brush.width)),
        Span::raw("ペンの色: "),
        Span::styled("■", Style::default().fg(hex_color(&brush.color))),
        Span::raw(format!(" {}   ", brush.color)),
        Span::raw("背景色: "),
        Span::styled("■", Style::default().fg(hex_color(&brush.background))),
        Span::raw(format!(" {}   ", brush.background)),
        Span::raw(format!("モード: {}", brush.mode.as_str())),
    ]);
    f.render_widget(
        Paragraph::new(toolbar).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    render_canvas(f, app, chunks[1], "▼ 下のキャンバスに自由に描けます");

    let editing = app.input_mode == InputMode::EditingMemo;
    let memo: Vec<Line> = if editing {
        text_lines(&format!("{}▏", app.input), Style::default())
    } else if app.memo.is_empty() {
        vec![Line::from(Span::styled(
            "ここに文字情報をメモできます...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        text_lines(&app.memo, Style::default())
    };
    f.render_widget(
        Paragraph::new(memo).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("🗒️ テキストメモ")
                .borders(Borders::ALL)
                .border_style(focus_style(editing)),
        ),
        chunks[2],
    );
}

fn render_whiteboard(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new("ここでは複数の生徒が同時に書き込んでいる様子をシミュレーションします。")
            .style(Style::default().fg(Color::Cyan)),
        chunks[0],
    );
    let tabs = Tabs::new(STUDENTS.iter().map(|s| s.name))
        .select(app.active_student)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));
    f.render_widget(tabs, chunks[1]);

    let student = STUDENTS[app.active_student % STUDENTS.len()];
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("色: "),
            Span::styled(student.color, Style::default().fg(hex_color(student.color))),
        ])),
        chunks[2],
    );

    render_canvas(f, app, chunks[3], student.name);
}

/// Draws the active canvas and records where it landed for mouse input.
fn render_canvas(f: &mut Frame, app: &mut App, area: Rect, title: &str) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.canvas_area = Some(inner);
    let Some(canvas) = app.active_canvas_mut() else {
        return;
    };
    canvas.size = (i32::from(inner.width), i32::from(inner.height));
    f.render_widget(CanvasView { canvas }, inner);
}

struct CanvasView<'a> {
    canvas: &'a Canvas,
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = hex_color(&self.canvas.brush.background);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                    cell.set_symbol(" ").set_bg(bg);
                }
            }
        }

        let preview = self.canvas.preview();
        for stroke in self.canvas.strokes().iter().chain(preview.iter()) {
            let fg = hex_color(&stroke.color);
            for p in stroke.cells() {
                if let Some(pos) = to_screen(area, p.x, p.y) {
                    if let Some(cell) = buf.cell_mut(pos) {
                        cell.set_symbol("█").set_fg(fg);
                    }
                }
            }
        }

        let cursor = self.canvas.cursor;
        if let Some(pos) = to_screen(area, cursor.x, cursor.y) {
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_symbol("┼").set_fg(Color::DarkGray);
            }
        }
    }
}

fn to_screen(area: Rect, x: i32, y: i32) -> Option<Position> {
    let x = u16::try_from(x).ok().filter(|x| *x < area.width)?;
    let y = u16::try_from(y).ok().filter(|y| *y < area.height)?;
    Some(Position::new(area.x + x, area.y + y))
}

fn hex_color(hex: &str) -> Color {
    hex.parse().unwrap_or(Color::Reset)
}

fn text_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect()
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
