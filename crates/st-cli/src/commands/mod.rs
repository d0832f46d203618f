pub mod add;
pub mod calendar;
pub mod config;
pub mod delete;
pub mod dispatch;
pub mod done;
pub mod edit;
pub mod list;
pub mod reminders;
pub mod widget;
