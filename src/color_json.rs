//! Purpose: Render JSON for CLI output, pretty or compact, with optional ANSI color.
//! Exports: `RenderStyle`, `render_json`.
//! Role: Small, pure formatter used by every stdout emission path.
//! Invariants: Without color, pretty output equals `serde_json::to_string_pretty`
//! and compact output equals `serde_json::to_string`.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

// 8/16-color palette; bright variants wash out on light themes.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderStyle {
    pub color: bool,
    pub compact: bool,
}

pub fn render_json(value: &Value, style: RenderStyle) -> String {
    let mut out = String::new();
    Writer { style, out: &mut out }.value(value, 0);
    out
}

struct Writer<'a> {
    style: RenderStyle,
    out: &'a mut String,
}

impl Writer<'_> {
    fn value(&mut self, value: &Value, indent: usize) {
        match value {
            Value::Null => self.colored("null", COLOR_NULL),
            Value::Bool(flag) => self.colored(if *flag { "true" } else { "false" }, COLOR_BOOL),
            Value::Number(number) => self.colored(&number.to_string(), COLOR_NUMBER),
            Value::String(text) => self.colored(&encode_str(text), COLOR_STRING),
            Value::Array(items) => self.array(items, indent),
            Value::Object(map) => self.object(map, indent),
        }
    }

    fn array(&mut self, items: &[Value], indent: usize) {
        if items.is_empty() {
            self.colored("[]", COLOR_PUNCT);
            return;
        }
        self.colored("[", COLOR_PUNCT);
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.colored(",", COLOR_PUNCT);
            }
            self.break_line(indent + 1);
            self.value(item, indent + 1);
        }
        self.break_line(indent);
        self.colored("]", COLOR_PUNCT);
    }

    fn object(&mut self, map: &Map<String, Value>, indent: usize) {
        if map.is_empty() {
            self.colored("{}", COLOR_PUNCT);
            return;
        }
        self.colored("{", COLOR_PUNCT);
        for (idx, (key, value)) in map.iter().enumerate() {
            if idx > 0 {
                self.colored(",", COLOR_PUNCT);
            }
            self.break_line(indent + 1);
            self.colored(&encode_str(key), COLOR_KEY);
            self.colored(":", COLOR_PUNCT);
            if !self.style.compact {
                self.out.push(' ');
            }
            self.value(value, indent + 1);
        }
        self.break_line(indent);
        self.colored("}", COLOR_PUNCT);
    }

    fn break_line(&mut self, level: usize) {
        if self.style.compact {
            return;
        }
        self.out.push('\n');
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    fn colored(&mut self, text: &str, color: &str) {
        if !self.style.color {
            self.out.push_str(text);
            return;
        }
        self.out.push_str("\u{1b}[");
        self.out.push_str(color);
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }
}

fn encode_str(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::{RenderStyle, render_json};
    use serde_json::json;

    #[test]
    fn plain_output_matches_serde_json() {
        let value = json!({
            "arr": [1, true, null],
            "nested": { "x": "y" },
            "empty": {}
        });
        let pretty = render_json(&value, RenderStyle::default());
        assert_eq!(pretty, serde_json::to_string_pretty(&value).expect("pretty"));

        let compact = render_json(
            &value,
            RenderStyle {
                color: false,
                compact: true,
            },
        );
        assert_eq!(compact, serde_json::to_string(&value).expect("compact"));
    }

    #[test]
    fn color_wraps_each_token() {
        let value = json!({"k":"v","n":1,"b":true,"z":null});
        let colored = render_json(
            &value,
            RenderStyle {
                color: true,
                compact: false,
            },
        );
        assert!(colored.contains("\u{1b}[36m\"k\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[32m\"v\"\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[33m1\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[35mtrue\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[39mnull\u{1b}[0m"));
    }
}
