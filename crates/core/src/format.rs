//! Display formatting of typed values.

use std::collections::BTreeMap;

use time::macros::format_description;

use crate::cast::{FALSE_WORD, TRUE_WORD};
use crate::datetime::parse_datetime;
use crate::value::TypedValue;

/// Turns a typed value into display text.
///
/// The document compiler escapes whatever this returns, so implementations
/// produce plain text, never markup.
pub trait ValueFormatter {
    fn format(&self, value: &TypedValue) -> String;
}

impl<F: ValueFormatter + ?Sized> ValueFormatter for &F {
    fn format(&self, value: &TypedValue) -> String {
        (**self).format(value)
    }
}

/// Reference formatter with configurable labels.
#[derive(Debug, Clone)]
pub struct DefaultFormatter {
    pub true_label: String,
    pub false_label: String,
    /// Joins the entries of choice lists and file lists.
    pub separator: String,
    /// Choice id → display label. Unknown ids render as the id itself.
    pub choices: BTreeMap<String, String>,
}

impl Default for DefaultFormatter {
    fn default() -> Self {
        DefaultFormatter {
            true_label: TRUE_WORD.to_string(),
            false_label: FALSE_WORD.to_string(),
            separator: ", ".to_string(),
            choices: BTreeMap::new(),
        }
    }
}

impl DefaultFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn choice_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.choices.get(id).map(String::as_str).unwrap_or(id)
    }
}

impl ValueFormatter for DefaultFormatter {
    fn format(&self, value: &TypedValue) -> String {
        match value {
            TypedValue::Text(s) => s.clone(),
            TypedValue::Number(n) => n.to_string(),
            TypedValue::Boolean(true) => self.true_label.clone(),
            TypedValue::Boolean(false) => self.false_label.clone(),
            TypedValue::Date(d) => d.clone(),
            TypedValue::DateTime(raw) => parse_datetime(raw)
                .and_then(|dt| {
                    dt.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
                        .ok()
                })
                .unwrap_or_else(|| raw.clone()),
            TypedValue::Choice(id) => self.choice_label(id).to_string(),
            TypedValue::ChoiceList(ids) => ids
                .iter()
                .map(|id| self.choice_label(id))
                .collect::<Vec<_>>()
                .join(&self.separator),
            TypedValue::File(files) => files
                .iter()
                .map(|f| f.filename.as_str())
                .collect::<Vec<_>>()
                .join(&self.separator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FileRef;

    #[test]
    fn scalars() {
        let f = DefaultFormatter::new();
        assert_eq!(f.format(&TypedValue::text("a#b")), "a#b");
        assert_eq!(f.format(&TypedValue::Number(42)), "42");
        assert_eq!(f.format(&TypedValue::Boolean(true)), "Yes");
        assert_eq!(f.format(&TypedValue::Boolean(false)), "No");
        assert_eq!(
            f.format(&TypedValue::Date("2024-05-01".to_string())),
            "2024-05-01"
        );
    }

    #[test]
    fn datetime_is_normalised_when_parseable() {
        let f = DefaultFormatter::new();
        assert_eq!(
            f.format(&TypedValue::DateTime("2024-5-1T9:07:33".to_string())),
            "2024-05-01 09:07"
        );
        assert_eq!(
            f.format(&TypedValue::DateTime("soon".to_string())),
            "soon"
        );
    }

    #[test]
    fn choices_use_labels_when_known() {
        let mut f = DefaultFormatter::new();
        f.choices.insert("c1".to_string(), "Red".to_string());
        assert_eq!(f.format(&TypedValue::Choice("c1".to_string())), "Red");
        assert_eq!(f.format(&TypedValue::Choice("c2".to_string())), "c2");
        assert_eq!(
            f.format(&TypedValue::ChoiceList(vec![
                "c1".to_string(),
                "c2".to_string()
            ])),
            "Red, c2"
        );
    }

    #[test]
    fn files_render_filenames() {
        let f = DefaultFormatter {
            separator: " / ".to_string(),
            ..DefaultFormatter::default()
        };
        let file = |name: &str| FileRef {
            url: format!("https://files.example/{}", name),
            filename: name.to_string(),
            size: 1,
            mime_type: "text/plain".to_string(),
            checksum: String::new(),
        };
        assert_eq!(
            f.format(&TypedValue::File(vec![file("a.txt"), file("b.txt")])),
            "a.txt / b.txt"
        );
        assert_eq!(f.format(&TypedValue::File(vec![])), "");
    }
}
