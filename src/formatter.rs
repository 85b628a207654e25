//! Rendering of runtime values as user-facing text.
//!
//! Expressions hand back [`Value`]s; templates hand them here. Multi-valued
//! results are joined as natural language with the expression's join word,
//! e.g. `A, B and C`.

use crate::value::Value;

/// Renders a single value.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::Boolean(b) => b.to_string(),
        Value::List(items) => join_values(items, "and"),
        Value::Null => "<none>".to_string(),
    }
}

/// Renders an ordered sequence, comma-separated with the join word before
/// the final element.
pub fn join_values(values: &[Value], join_word: &str) -> String {
    match values {
        [] => String::new(),
        [single] => format_value(single),
        _ => {
            let mut out = String::new();
            let last = values.len() - 1;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    if i == last {
                        out.push(' ');
                        out.push_str(join_word);
                        out.push(' ');
                    } else {
                        out.push_str(", ");
                    }
                }
                out.push_str(&format_value(value));
            }
            out
        }
    }
}
