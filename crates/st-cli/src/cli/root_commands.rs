use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use st_core::{Reminder, TaskCategory, TaskFilter};
use uuid::Uuid;

use super::parse;
use super::subcommands::{CalendarCommands, ReminderCommands};

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List tasks.
    List(ListArgs),
    /// Create a task.
    Add(AddArgs),
    /// Change fields of a task (reschedules its reminder).
    Edit(EditArgs),
    /// Mark a task done, or open again with --undo.
    Done(DoneArgs),
    /// Delete a task, its reminder and its calendar event.
    Delete {
        id: Uuid,
    },
    /// Export tasks to the calendar.
    Calendar {
        #[command(subcommand)]
        action: CalendarCommands,
    },
    /// Inspect or deliver scheduled reminders.
    Reminders {
        #[command(subcommand)]
        action: ReminderCommands,
    },
    /// Show the widget snapshot.
    Widget(WidgetArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive title search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Day filter: all, today, past
    #[arg(long, default_value = "all")]
    pub filter: TaskFilter,

    /// Only completed tasks
    #[arg(long, conflicts_with = "open")]
    pub done: bool,

    /// Only open tasks
    #[arg(long)]
    pub open: bool,
}

impl ListArgs {
    #[must_use]
    pub const fn done_filter(&self) -> Option<bool> {
        match (self.done, self.open) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct AddArgs {
    #[arg(value_parser = parse::title)]
    pub title: String,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date (defaults to now)
    #[arg(long, value_parser = parse::due)]
    pub due: Option<DateTime<Utc>>,

    /// private, work, important, other
    #[arg(short, long)]
    pub category: Option<TaskCategory>,

    /// off, due, or an offset such as 30m, 1h, 1d (before the due date)
    #[arg(short, long)]
    pub reminder: Option<Reminder>,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub id: Uuid,

    #[arg(long, value_parser = parse::title)]
    pub title: Option<String>,

    /// New description; an empty string clears it
    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse::due)]
    pub due: Option<DateTime<Utc>>,

    #[arg(short, long)]
    pub category: Option<TaskCategory>,

    #[arg(short, long)]
    pub reminder: Option<Reminder>,
}

#[derive(Clone, Debug, Args)]
pub struct DoneArgs {
    pub id: Uuid,

    /// Mark the task open again
    #[arg(long)]
    pub undo: bool,
}

#[derive(Clone, Debug, Args)]
pub struct WidgetArgs {
    /// Rewrite the snapshot from the current tasks before showing it
    #[arg(long)]
    pub refresh: bool,
}
