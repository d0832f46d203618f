use clap::Subcommand;
use uuid::Uuid;

/// Calendar export commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CalendarCommands {
    /// Add a calendar event for a task.
    Add { id: Uuid },
    /// Remove a task's calendar event.
    Remove { id: Uuid },
}

/// Reminder queue commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReminderCommands {
    /// List every pending reminder.
    Pending,
    /// Pop and print the reminders whose time has come.
    Due,
}
