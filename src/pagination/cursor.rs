//! Cursor extraction
//!
//! Payloads carry their pagination cursors in one of several places:
//! timeline-style `entries` arrays with `cursorType` markers, flat
//! `next_cursor`-style fields at the top level, or cursor objects buried
//! somewhere deeper. [`extract_cursors`] tries them in that order.

use serde_json::Value;

/// Cursor type marking the next page
pub const CURSOR_BOTTOM: &str = "Bottom";

/// Cursor type marking the previous page
pub const CURSOR_TOP: &str = "Top";

const NEXT_FIELDS: [&str; 3] = ["cursor_bottom", "next_cursor", "next_cursor_str"];
const PREVIOUS_FIELDS: [&str; 3] = ["cursor_top", "previous_cursor", "previous_cursor_str"];

/// Cursors found in a payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursors {
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl Cursors {
    /// Both directions found
    pub fn is_complete(&self) -> bool {
        self.next.is_some() && self.previous.is_some()
    }

    /// Fill the direction named by `kind` unless it is already set
    fn offer(&mut self, kind: &str, value: String) {
        let slot = match kind {
            CURSOR_BOTTOM => &mut self.next,
            CURSOR_TOP => &mut self.previous,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

/// Extract the next/previous cursors from a payload
pub fn extract_cursors(payload: &Value) -> Cursors {
    let mut cursors = Cursors::default();

    let mut entry_lists = Vec::new();
    collect_entries(payload, &mut entry_lists);
    for item in entry_lists.into_iter().flatten() {
        let kind = field_or_content(item, "cursorType");
        let value = field_or_content(item, "value");
        if let (Some(kind), Some(value)) = (kind, value) {
            cursors.offer(&kind, value);
        }
    }

    if cursors.next.is_none() {
        cursors.next = first_field(payload, &NEXT_FIELDS);
    }
    if cursors.previous.is_none() {
        cursors.previous = first_field(payload, &PREVIOUS_FIELDS);
    }

    if !cursors.is_complete() {
        walk(payload, &mut cursors);
    }
    cursors
}

/// Parse `text` and extract cursors; invalid JSON has none
pub fn extract_cursors_str(text: &str) -> Cursors {
    serde_json::from_str::<Value>(text)
        .map(|payload| extract_cursors(&payload))
        .unwrap_or_default()
}

/// Every array named `entries`, in document order
fn collect_entries<'a>(value: &'a Value, out: &mut Vec<&'a Vec<Value>>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "entries" {
                    if let Value::Array(items) = child {
                        out.push(items);
                    }
                }
                collect_entries(child, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_entries(child, out);
            }
        }
        _ => {}
    }
}

/// `item.key`, falling back to `item.content.key`
fn field_or_content(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(scalar_text)
        .or_else(|| item.get("content")?.get(key).and_then(scalar_text))
}

/// First non-empty top-level field among `keys`
fn first_field(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| payload.get(*key).and_then(scalar_text))
}

/// Non-empty string, or a number rendered as text
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn walk(value: &Value, cursors: &mut Cursors) {
    match value {
        Value::Object(map) => {
            let kind = map.get("cursorType").and_then(Value::as_str);
            let cursor = map.get("value").and_then(scalar_text);
            if let (Some(kind), Some(cursor)) = (kind, cursor) {
                cursors.offer(kind, cursor);
            }
            for child in map.values() {
                if cursors.is_complete() {
                    return;
                }
                walk(child, cursors);
            }
        }
        Value::Array(items) => {
            for child in items {
                if cursors.is_complete() {
                    return;
                }
                walk(child, cursors);
            }
        }
        _ => {}
    }
}
