use serde::Serialize;
use serde_json::Value;
use st_core::Task;

use crate::cli::OutputFormat;

pub mod table;

use table::{TableOptions, render_table};

const TASK_HEADERS: [&str; 7] = ["id", "title", "category", "due", "reminder", "done", "calendar"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print tasks; the table form shows one row per task with a fixed column set.
pub fn output_tasks(tasks: &[&Task], format: OutputFormat) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Table => render_task_table(tasks),
        _ => render(&tasks, format)?,
    };
    println!("{rendered}");
    Ok(())
}

pub fn output_task(task: &Task, format: OutputFormat) -> anyhow::Result<()> {
    output_tasks(&[task], format)
}

fn render_task_table(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return String::from("(no tasks)");
    }
    let rows = tasks
        .iter()
        .map(|task| {
            vec![
                task.id.to_string(),
                task.title.clone(),
                task.category.label().to_owned(),
                task.due_date.format("%Y-%m-%d %H:%M").to_string(),
                task.reminder.to_string(),
                if task.is_done { "yes" } else { "no" }.to_owned(),
                if task.is_in_calendar { "yes" } else { "-" }.to_owned(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&TASK_HEADERS, &rows, TableOptions::from_env())
}

/// Table form of a generic response: objects become field/value rows, lists
/// of objects one row each with the first entry's fields as columns.
fn render_value_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = TableOptions::from_env();
    let rendered = match serde_json::to_value(value)? {
        Value::Null => String::from("(none)"),
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) => list_table(&items, options),
        Value::Object(fields) => {
            let rows = fields
                .iter()
                .map(|(name, value)| vec![name.clone(), cell(value)])
                .collect::<Vec<_>>();
            render_table(&["field", "value"], &rows, options)
        }
        scalar => cell(&scalar),
    };
    Ok(rendered)
}

fn list_table(items: &[Value], options: TableOptions) -> String {
    let columns = items
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    if columns.is_empty() {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return render_table(&["value"], &rows, options);
    }

    let rows = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|column| item.get(column).map_or_else(String::new, cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let headers = columns.iter().map(String::as_str).collect::<Vec<_>>();
    render_table(&headers, &rows, options)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(true) => String::from("yes"),
        Value::Bool(false) => String::from("no"),
        Value::String(text) => text.clone(),
        Value::Array(items) => format!("{} item(s)", items.len()),
        other => other.to_string(),
    }
}
