//! Task list persistence over a [`KeyValueStore`]
//!
//! The whole list lives in one JSON array under [`TASKS_KEY`] and is always
//! written in full.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::store::KeyValueStore;
use crate::task::Task;

/// Store key holding the serialized task list
pub const TASKS_KEY: &str = "tasks";

/// Load the task list
///
/// Never fails: a missing key, an unreadable store or a blob that is not a
/// JSON array all give an empty list. Array elements that are not valid
/// task records are dropped and the rest are kept in order.
pub fn load_tasks<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Task> {
    let raw = match store.get_item(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored tasks, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "failed to read stored tasks, starting empty");
            return Vec::new();
        }
    };

    decode_tasks(&raw)
}

/// Decode a stored blob, validating each record
pub fn decode_tasks(raw: &str) -> Vec<Task> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(Value::Null) => return Vec::new(),
        Ok(other) => {
            warn!(kind = value_kind(&other), "stored tasks are not an array, ignoring");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "stored tasks are not valid JSON, ignoring");
            return Vec::new();
        }
    };

    let total = entries.len();
    let tasks: Vec<Task> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<Task>(entry) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!(position = i, error = %e, "skipping invalid stored task");
                None
            }
        })
        .collect();

    debug!(loaded = tasks.len(), skipped = total - tasks.len(), "loaded tasks");
    tasks
}

/// Serialize the task list exactly as held in memory
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Overwrite the stored task list
pub fn save_tasks<S: KeyValueStore + ?Sized>(store: &mut S, tasks: &[Task]) -> Result<()> {
    let blob = encode_tasks(tasks)?;
    store.set_item(TASKS_KEY, &blob)?;
    debug!(count = tasks.len(), "saved tasks");
    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
