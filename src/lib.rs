pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod page;
pub mod schedule;
pub mod store;
pub mod task;
pub mod ui;

pub use app::App;
pub use error::{StoreError, StoreResult};
pub use page::{NavAction, Page};
pub use schedule::{classify_date, DayKind, Schedules};
pub use store::{Document, LoadResult, Store};
pub use task::{Task, TaskId, TaskList};
