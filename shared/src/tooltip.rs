use serde_json::Value;

use crate::feature::Feature;

/// One labeled line of tooltip content, read from a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipField {
    pub label: &'static str,
    pub property: &'static str,
}

impl TooltipField {
    pub const fn new(label: &'static str, property: &'static str) -> Self {
        Self { label, property }
    }
}

/// Ordered set of fields shown for a hovered feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipTemplate {
    pub fields: Vec<TooltipField>,
}

impl TooltipTemplate {
    pub fn new(fields: Vec<TooltipField>) -> Self {
        Self { fields }
    }

    /// Country name plus the two metrics of the population dataset.
    pub fn primary() -> Self {
        Self::new(vec![
            TooltipField::new("Name", "name"),
            TooltipField::new("Area", "m1"),
            TooltipField::new("Population", "m2"),
        ])
    }

    /// ISO code and name of the code-keyed dataset.
    pub fn secondary() -> Self {
        Self::new(vec![
            TooltipField::new("ISO Code", "iso_code"),
            TooltipField::new("Country", "name_en"),
        ])
    }

    /// Plain-text lines for `feature`, or none when there is no feature.
    pub fn lines(&self, feature: Option<&Feature>) -> Vec<String> {
        let Some(feature) = feature else {
            return Vec::new();
        };
        self.fields
            .iter()
            .map(|field| {
                let value = feature
                    .property(field.property)
                    .map(display_value)
                    .unwrap_or_default();
                format!("{}: {}", field.label, value)
            })
            .collect()
    }

    /// Tooltip markup: one paragraph per field in a vertical flex column.
    /// An absent feature renders as the empty string.
    pub fn render_html(&self, feature: Option<&Feature>) -> String {
        let lines = self.lines(feature);
        if lines.is_empty() {
            return String::new();
        }
        let mut html =
            String::from(r#"<div style="display:flex;flex-direction:column;row-gap:6px;">"#);
        for line in &lines {
            html.push_str("<p>");
            html.push_str(&escape_html(line));
            html.push_str("</p>");
        }
        html.push_str("</div>");
        html
    }
}

/// Human-readable property value. Integral floats drop their fraction so that
/// `5.0` reads as `5`.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            (None, None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
