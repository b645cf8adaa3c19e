//! Rich-document tree as produced by the document editor.
//!
//! Every node is `{"type": ..., "attrs": {...}, "content": [...]}`. The tree
//! is validated before it reaches the compiler, so the types here only
//! describe the accepted shapes; they do not re-check them.

use cellform_eval::Expression;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    pub attrs: DocAttrs,
    #[serde(default)]
    pub content: Vec<TopLevelNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocAttrs {
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// A node directly under the document root. Sections only appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TopLevelNode {
    Section(Section),
    Heading(Heading),
    Paragraph(Paragraph),
    OrderedList(List),
    BulletList(List),
    OrderedListPlaceholder(ListPlaceholder),
    BulletListPlaceholder(ListPlaceholder),
}

/// A block inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    OrderedList(List),
    BulletList(List),
    OrderedListPlaceholder(ListPlaceholder),
    BulletListPlaceholder(ListPlaceholder),
}

/// A block inside a list item or a list placeholder template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemBlock {
    Heading(Heading),
    Paragraph(Paragraph),
}

// ──────────────────────────────────────────────
// Blocks
// ──────────────────────────────────────────────

/// Content that is only rendered when its condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub attrs: SectionAttrs,
    #[serde(default)]
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAttrs {
    pub condition: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub attrs: HeadingAttrs,
    #[serde(default)]
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingAttrs {
    /// 1 to 3.
    pub level: u8,
    #[serde(default)]
    pub text_align: Option<TextAlign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub attrs: ParagraphAttrs,
    #[serde(default)]
    pub content: Vec<Inline>,
}

/// Paragraph alignment is kept for the editor; the compiler does not
/// render it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphAttrs {
    #[serde(default)]
    pub text_align: Option<TextAlign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub content: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub content: Vec<ItemBlock>,
}

/// A list repeated once per row of the sub-data entry named by `attrs.id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPlaceholder {
    pub attrs: ListPlaceholderAttrs,
    /// Template blocks rendered for each row.
    #[serde(default)]
    pub content: Vec<ItemBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPlaceholderAttrs {
    pub id: String,
    #[serde(default)]
    pub filter: Option<Expression>,
}

// ──────────────────────────────────────────────
// Inline content
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text {
        text: String,
        /// Applied in order, first mark innermost.
        #[serde(default)]
        marks: Vec<Mark>,
    },
    TextPlaceholder {
        attrs: TextPlaceholderAttrs,
        /// Accepted from the editor; placeholder output is not wrapped.
        #[serde(default)]
        marks: Vec<Mark>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPlaceholderAttrs {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Highlight,
    Strike,
    Code,
    TextStyle {
        #[serde(default)]
        attrs: TextStyleAttrs,
    },
    Link {
        attrs: LinkAttrs,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyleAttrs {
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn editor_json_deserializes() {
        let doc: Doc = serde_json::from_value(json!({
            "type": "doc",
            "attrs": { "title": "Offer", "language": "de" },
            "content": [
                {
                    "type": "heading",
                    "attrs": { "level": 2, "textAlign": null },
                    "content": [{ "type": "text", "text": "Hi" }]
                },
                {
                    "type": "section",
                    "attrs": {
                        "condition": { "type": "and", "expressions": [] }
                    },
                    "content": [{ "type": "paragraph" }]
                },
                {
                    "type": "bulletListPlaceholder",
                    "attrs": { "id": "items" },
                    "content": [{
                        "type": "paragraph",
                        "content": [{ "type": "textPlaceholder", "attrs": { "id": "name" } }]
                    }]
                }
            ]
        }))
        .unwrap();

        assert_eq!(doc.attrs.language.as_deref(), Some("de"));
        assert_eq!(doc.content.len(), 3);
        match &doc.content[0] {
            TopLevelNode::Heading(h) => {
                assert_eq!(h.attrs.level, 2);
                assert_eq!(h.attrs.text_align, None);
            }
            other => panic!("expected heading, got {:?}", other),
        }
        assert!(matches!(doc.content[1], TopLevelNode::Section(_)));
        assert!(matches!(
            doc.content[2],
            TopLevelNode::BulletListPlaceholder(_)
        ));
    }

    #[test]
    fn marks_deserialize_in_order() {
        let inline: Inline = serde_json::from_value(json!({
            "type": "text",
            "text": "x",
            "marks": [
                { "type": "bold" },
                { "type": "textStyle", "attrs": { "color": "#ff0000" } },
                { "type": "link", "attrs": { "href": "https://a.example", "target": "_blank", "rel": null } }
            ]
        }))
        .unwrap();
        match inline {
            Inline::Text { marks, .. } => {
                assert_eq!(marks[0], Mark::Bold);
                assert!(matches!(marks[1], Mark::TextStyle { .. }));
                assert!(
                    matches!(&marks[2], Mark::Link { attrs } if attrs.href == "https://a.example")
                );
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn sections_are_not_blocks() {
        let r: Result<Block, _> = serde_json::from_value(json!({
            "type": "section",
            "attrs": { "condition": { "type": "or", "expressions": [] } }
        }));
        assert!(r.is_err());
    }
}
