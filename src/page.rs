/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Notebook,
    Calendar,
    Tasks,
    Whiteboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Open(Page),
    Home,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Notebook,
        Page::Calendar,
        Page::Tasks,
        Page::Whiteboard,
    ];

    /// Transitions are unconditional; there is no history to go back through.
    pub fn apply(self, action: NavAction) -> Page {
        match action {
            NavAction::Open(page) => page,
            NavAction::Home => Page::Dashboard,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "🏠 メインダッシュボード",
            Page::Notebook => "📝 デジタルノート",
            Page::Calendar => "📅 詳細カレンダー",
            Page::Tasks => "✅ タスクマネージャー",
            Page::Whiteboard => "🎨 共有ホワイトボード (デモ)",
        }
    }
}
