//! Document tree → Typst markup.
//!
//! The compiler folds the tree into a string in document order. Sections
//! and list-placeholder filters consult the condition evaluator; all other
//! nodes render unconditionally, and placeholders with no data render as
//! nothing.

use cellform_core::{Data, DefaultFormatter, SubData, ValueFormatter};
use cellform_eval::evaluate;

use crate::document::{
    Block, Doc, DocAttrs, Heading, Inline, ItemBlock, List, ListItem, ListPlaceholder, Mark,
    Paragraph, Section, TopLevelNode,
};
use crate::error::CompileError;
use crate::escape::escape;
use crate::markup;

/// Values a document is compiled against.
///
/// A list placeholder renders each of its rows against a fresh context
/// holding only that row, so nothing from the parent leaks into a row.
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    pub data: &'a Data,
    pub sub_data: Option<&'a SubData>,
}

impl<'a> CompileContext<'a> {
    pub fn new(data: &'a Data) -> Self {
        CompileContext {
            data,
            sub_data: None,
        }
    }

    pub fn with_sub_data(self, sub_data: &'a SubData) -> Self {
        CompileContext {
            sub_data: Some(sub_data),
            ..self
        }
    }

    fn row(data: &'a Data) -> Self {
        CompileContext::new(data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Bullet,
}

impl ListKind {
    fn command(&self) -> &'static str {
        match self {
            ListKind::Ordered => "enum",
            ListKind::Bullet => "list",
        }
    }
}

/// Compiles documents, formatting placeholder values with `F`.
#[derive(Debug, Clone, Default)]
pub struct Compiler<F = DefaultFormatter> {
    formatter: F,
}

impl Compiler<DefaultFormatter> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: ValueFormatter> Compiler<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Compiler { formatter }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Compile `doc` to markup: the preamble followed by every top-level
    /// node in order.
    ///
    /// Fails only when a section condition or placeholder filter cannot be
    /// evaluated.
    pub fn compile(&self, doc: &Doc, ctx: &CompileContext<'_>) -> Result<String, CompileError> {
        let mut out = preamble(&doc.attrs);
        for node in &doc.content {
            out.push_str(&self.top_level(node, ctx)?);
        }
        Ok(out)
    }

    fn top_level(&self, node: &TopLevelNode, ctx: &CompileContext<'_>) -> Result<String, CompileError> {
        match node {
            TopLevelNode::Section(section) => self.section(section, ctx),
            TopLevelNode::Heading(h) => Ok(self.heading(h, ctx)),
            TopLevelNode::Paragraph(p) => Ok(self.paragraph(p, ctx, false)),
            TopLevelNode::OrderedList(list) => Ok(self.list(ListKind::Ordered, list, ctx)),
            TopLevelNode::BulletList(list) => Ok(self.list(ListKind::Bullet, list, ctx)),
            TopLevelNode::OrderedListPlaceholder(p) => {
                self.list_placeholder(ListKind::Ordered, p, ctx)
            }
            TopLevelNode::BulletListPlaceholder(p) => {
                self.list_placeholder(ListKind::Bullet, p, ctx)
            }
        }
    }

    fn section(&self, section: &Section, ctx: &CompileContext<'_>) -> Result<String, CompileError> {
        if !evaluate(&section.attrs.condition, ctx.data).map_err(CompileError::Condition)? {
            tracing::trace!(blocks = section.content.len(), "section condition false, skipping");
            return Ok(String::new());
        }
        let mut out = String::new();
        for block in &section.content {
            out.push_str(&self.block(block, ctx)?);
        }
        Ok(out)
    }

    fn block(&self, block: &Block, ctx: &CompileContext<'_>) -> Result<String, CompileError> {
        match block {
            Block::Heading(h) => Ok(self.heading(h, ctx)),
            Block::Paragraph(p) => Ok(self.paragraph(p, ctx, false)),
            Block::OrderedList(list) => Ok(self.list(ListKind::Ordered, list, ctx)),
            Block::BulletList(list) => Ok(self.list(ListKind::Bullet, list, ctx)),
            Block::OrderedListPlaceholder(p) => self.list_placeholder(ListKind::Ordered, p, ctx),
            Block::BulletListPlaceholder(p) => self.list_placeholder(ListKind::Bullet, p, ctx),
        }
    }

    fn item_block(&self, block: &ItemBlock, ctx: &CompileContext<'_>, simple: bool) -> String {
        match block {
            ItemBlock::Heading(h) => self.heading(h, ctx),
            ItemBlock::Paragraph(p) => self.paragraph(p, ctx, simple),
        }
    }

    fn heading(&self, heading: &Heading, ctx: &CompileContext<'_>) -> String {
        let body = markup::heading(heading.attrs.level, &self.inlines(&heading.content, ctx));
        let mut out = markup::align(heading.attrs.text_align, body);
        out.push('\n');
        out
    }

    /// In simple mode (the sole block of a list item) the inline content is
    /// returned without the paragraph wrapper.
    fn paragraph(&self, paragraph: &Paragraph, ctx: &CompileContext<'_>, simple: bool) -> String {
        let body = self.inlines(&paragraph.content, ctx);
        if simple {
            return body;
        }
        let mut out = markup::wrap("par", &body);
        out.push('\n');
        out
    }

    fn list(&self, kind: ListKind, list: &List, ctx: &CompileContext<'_>) -> String {
        let items: Vec<String> = list
            .content
            .iter()
            .map(|item: &ListItem| self.list_item(&item.content, ctx))
            .collect();
        join_list(kind, &items)
    }

    fn list_item(&self, content: &[ItemBlock], ctx: &CompileContext<'_>) -> String {
        let body = match content {
            [single] => self.item_block(single, ctx, true),
            blocks => blocks
                .iter()
                .map(|b| self.item_block(b, ctx, false))
                .collect(),
        };
        markup::group(&body)
    }

    fn list_placeholder(
        &self,
        kind: ListKind,
        placeholder: &ListPlaceholder,
        ctx: &CompileContext<'_>,
    ) -> Result<String, CompileError> {
        let id = &placeholder.attrs.id;
        let Some(rows) = ctx.sub_data.and_then(|s| s.get(id)) else {
            tracing::trace!(placeholder = %id, "no rows for list placeholder");
            return Ok(String::new());
        };
        if placeholder.content.is_empty() {
            return Ok(String::new());
        }

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(filter) = &placeholder.attrs.filter {
                let keep = evaluate(filter, row).map_err(|source| CompileError::Filter {
                    placeholder: id.clone(),
                    source,
                })?;
                if !keep {
                    continue;
                }
            }
            items.push(self.list_item(&placeholder.content, &CompileContext::row(row)));
        }
        tracing::trace!(placeholder = %id, rows = rows.len(), kept = items.len(), "list placeholder");
        Ok(join_list(kind, &items))
    }

    fn inlines(&self, content: &[Inline], ctx: &CompileContext<'_>) -> String {
        content.iter().map(|i| self.inline(i, ctx)).collect()
    }

    fn inline(&self, inline: &Inline, ctx: &CompileContext<'_>) -> String {
        match inline {
            Inline::Text { text, marks } => marks.iter().fold(escape(text), apply_mark),
            Inline::TextPlaceholder { attrs, .. } => match ctx.data.get(&attrs.id) {
                Some(value) => escape(&self.formatter.format(value)),
                None => String::new(),
            },
        }
    }
}

/// Compile `doc` with the [`DefaultFormatter`].
pub fn compile(doc: &Doc, ctx: &CompileContext<'_>) -> Result<String, CompileError> {
    Compiler::new().compile(doc, ctx)
}

fn preamble(attrs: &DocAttrs) -> String {
    let mut out = String::from(markup::LINK_COLOR);
    out.push('\n');
    if let Some(lang) = &attrs.language {
        out.push_str(&markup::language(lang));
        out.push('\n');
    }
    out.push_str(&markup::title(&escape(&attrs.title)));
    out.push('\n');
    out
}

fn join_list(kind: ListKind, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!("#{}({})\n", kind.command(), items.join(","))
}

fn apply_mark(body: String, mark: &Mark) -> String {
    match mark {
        Mark::Bold => markup::wrap("strong", &body),
        Mark::Italic => markup::wrap("emph", &body),
        Mark::Underline => markup::wrap("underline", &body),
        Mark::Highlight => markup::wrap("highlight", &body),
        Mark::Strike => markup::wrap("strike", &body),
        Mark::Code => markup::wrap("raw", &body),
        Mark::TextStyle { .. } => body,
        Mark::Link { attrs } => markup::link(&attrs.href, &body),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        HeadingAttrs, LinkAttrs, ListPlaceholderAttrs, ParagraphAttrs, SectionAttrs, TextAlign,
        TextPlaceholderAttrs,
    };
    use cellform_core::TypedValue;
    use cellform_eval::{Binary, Expression, Operator};
    use pretty_assertions::assert_eq;

    const PRE: &str = "#show link: set text(fill: blue)\n#set document(title: [T])\n";

    fn text(s: &str) -> Inline {
        Inline::Text {
            text: s.to_string(),
            marks: vec![],
        }
    }

    fn marked(s: &str, marks: Vec<Mark>) -> Inline {
        Inline::Text {
            text: s.to_string(),
            marks,
        }
    }

    fn placeholder(id: &str) -> Inline {
        Inline::TextPlaceholder {
            attrs: TextPlaceholderAttrs { id: id.to_string() },
            marks: vec![],
        }
    }

    fn para(content: Vec<Inline>) -> Paragraph {
        Paragraph {
            attrs: ParagraphAttrs::default(),
            content,
        }
    }

    fn heading(level: u8, align: Option<TextAlign>, content: Vec<Inline>) -> Heading {
        Heading {
            attrs: HeadingAttrs {
                level,
                text_align: align,
            },
            content,
        }
    }

    fn doc(content: Vec<TopLevelNode>) -> Doc {
        Doc {
            attrs: DocAttrs {
                title: "T".to_string(),
                language: None,
            },
            content,
        }
    }

    fn render(d: &Doc, data: &Data) -> String {
        compile(d, &CompileContext::new(data)).unwrap()
    }

    fn body(d: &Doc, data: &Data) -> String {
        render(d, data).strip_prefix(PRE).unwrap().to_string()
    }

    #[test]
    fn preamble_with_language_and_escaped_title() {
        let d = Doc {
            attrs: DocAttrs {
                title: "Offer #12 [draft]".to_string(),
                language: Some("de".to_string()),
            },
            content: vec![],
        };
        assert_eq!(
            render(&d, &Data::new()),
            "#show link: set text(fill: blue)\n#set text(lang: \"de\")\n#set document(title: [Offer \\#12 \\[draft\\]])\n"
        );
    }

    #[test]
    fn paragraph_at_top_level() {
        let d = doc(vec![TopLevelNode::Paragraph(para(vec![text("Hello")]))]);
        assert_eq!(body(&d, &Data::new()), "#par[Hello]\n");
    }

    #[test]
    fn heading_levels_and_alignment() {
        let d = doc(vec![
            TopLevelNode::Heading(heading(1, None, vec![text("A")])),
            TopLevelNode::Heading(heading(2, Some(TextAlign::Center), vec![text("B")])),
            TopLevelNode::Heading(heading(3, Some(TextAlign::Right), vec![text("C")])),
            TopLevelNode::Heading(heading(2, Some(TextAlign::Justify), vec![text("D")])),
        ]);
        assert_eq!(
            body(&d, &Data::new()),
            "#heading(level: 1)[A]\n\
             #align(center)[#heading(level: 2)[B]]\n\
             #align(right)[#heading(level: 3)[C]]\n\
             #heading(level: 2)[D]\n"
        );
    }

    #[test]
    fn marks_fold_first_innermost() {
        let d = doc(vec![TopLevelNode::Paragraph(para(vec![marked(
            "x_y",
            vec![
                Mark::Bold,
                Mark::Italic,
                Mark::TextStyle {
                    attrs: Default::default(),
                },
                Mark::Link {
                    attrs: LinkAttrs {
                        href: "https://a.example/?q=#x".to_string(),
                        rel: None,
                        target: None,
                    },
                },
            ],
        )]))]);
        assert_eq!(
            body(&d, &Data::new()),
            "#par[#link(\"https://a.example/?q=#x\")[#emph[#strong[x\\_y]]]]\n"
        );
    }

    #[test]
    fn remaining_marks() {
        let inline = marked(
            "c",
            vec![Mark::Underline, Mark::Highlight, Mark::Strike, Mark::Code],
        );
        let compiler = Compiler::new();
        let data = Data::new();
        assert_eq!(
            compiler.inline(&inline, &CompileContext::new(&data)),
            "#raw[#strike[#highlight[#underline[c]]]]"
        );
    }

    #[test]
    fn text_placeholder_formats_and_escapes() {
        let data: Data = [
            ("name", TypedValue::text("A*B")),
            ("ok", TypedValue::Boolean(true)),
        ]
        .into_iter()
        .collect();
        let d = doc(vec![TopLevelNode::Paragraph(para(vec![
            placeholder("name"),
            text(" "),
            placeholder("ok"),
            text(" "),
            placeholder("missing"),
        ]))]);
        assert_eq!(body(&d, &data), "#par[A\\*B Yes ]\n");
    }

    #[test]
    fn list_items_simple_and_compound() {
        let list = List {
            content: vec![
                ListItem {
                    content: vec![ItemBlock::Paragraph(para(vec![text("one")]))],
                },
                ListItem {
                    content: vec![
                        ItemBlock::Heading(heading(3, None, vec![text("two")])),
                        ItemBlock::Paragraph(para(vec![text("more")])),
                    ],
                },
            ],
        };
        let d = doc(vec![
            TopLevelNode::OrderedList(list.clone()),
            TopLevelNode::BulletList(list),
        ]);
        assert_eq!(
            body(&d, &Data::new()),
            "#enum([one],[#heading(level: 3)[two]\n#par[more]\n])\n\
             #list([one],[#heading(level: 3)[two]\n#par[more]\n])\n"
        );
    }

    #[test]
    fn empty_lists_render_nothing() {
        let d = doc(vec![
            TopLevelNode::OrderedList(List { content: vec![] }),
            TopLevelNode::BulletList(List { content: vec![] }),
        ]);
        assert_eq!(body(&d, &Data::new()), "");
    }

    fn section(expr: Expression, content: Vec<Block>) -> TopLevelNode {
        TopLevelNode::Section(Section {
            attrs: SectionAttrs { condition: expr },
            content,
        })
    }

    #[test]
    fn section_condition_controls_inclusion() {
        let cond = Expression::from(Binary::new("vip", Operator::Eq, TypedValue::Boolean(true)));
        let content = vec![
            Block::Paragraph(para(vec![text("secret")])),
            Block::Heading(heading(1, None, vec![text("H")])),
        ];
        let d = doc(vec![section(cond, content)]);

        let vip: Data = [("vip", TypedValue::Boolean(true))].into_iter().collect();
        let regular: Data = [("vip", TypedValue::Boolean(false))].into_iter().collect();
        assert_eq!(body(&d, &vip), "#par[secret]\n#heading(level: 1)[H]\n");
        assert_eq!(body(&d, &regular), "");
        assert_eq!(body(&d, &Data::new()), "");
    }

    #[test]
    fn section_condition_failure_propagates() {
        let cond = Expression::from(Binary::new("name", Operator::Lt, TypedValue::text("m")));
        let d = doc(vec![section(cond, vec![])]);
        let data: Data = [("name", TypedValue::text("a"))].into_iter().collect();
        assert!(matches!(
            compile(&d, &CompileContext::new(&data)),
            Err(CompileError::Condition(_))
        ));
    }

    fn rows() -> SubData {
        let row = |name: &str, qty: i64| -> Data {
            [
                ("name", TypedValue::text(name)),
                ("qty", TypedValue::Number(qty)),
            ]
            .into_iter()
            .collect()
        };
        let mut sub = SubData::new();
        sub.insert("items", vec![row("Apple", 3), row("Pear", 0), row("Plum", 5)]);
        sub
    }

    fn list_placeholder(filter: Option<Expression>, content: Vec<ItemBlock>) -> ListPlaceholder {
        ListPlaceholder {
            attrs: ListPlaceholderAttrs {
                id: "items".to_string(),
                filter,
            },
            content,
        }
    }

    #[test]
    fn list_placeholder_renders_each_row_in_order() {
        let p = list_placeholder(
            None,
            vec![ItemBlock::Paragraph(para(vec![
                placeholder("name"),
                text(" x"),
                placeholder("qty"),
            ]))],
        );
        let d = doc(vec![TopLevelNode::BulletListPlaceholder(p)]);
        let data = Data::new();
        let sub = rows();
        let out = compile(&d, &CompileContext::new(&data).with_sub_data(&sub)).unwrap();
        assert_eq!(
            out.strip_prefix(PRE).unwrap(),
            "#list([Apple x3],[Pear x0],[Plum x5])\n"
        );
    }

    #[test]
    fn list_placeholder_filter_uses_row_data_only() {
        // parent data has qty=100, rows are filtered on their own qty
        let filter = Expression::from(Binary::new("qty", Operator::Gt, TypedValue::Number(0)));
        let p = list_placeholder(
            Some(filter),
            vec![ItemBlock::Paragraph(para(vec![placeholder("name"), placeholder("title")]))],
        );
        let d = doc(vec![TopLevelNode::OrderedListPlaceholder(p)]);
        let data: Data = [
            ("qty", TypedValue::Number(100)),
            ("title", TypedValue::text("parent")),
        ]
        .into_iter()
        .collect();
        let sub = rows();
        let out = compile(&d, &CompileContext::new(&data).with_sub_data(&sub)).unwrap();
        assert_eq!(out.strip_prefix(PRE).unwrap(), "#enum([Apple],[Plum])\n");
    }

    #[test]
    fn list_placeholder_renders_nothing_without_rows() {
        let reject_all = Expression::from(Binary::new("qty", Operator::Gt, TypedValue::Number(99)));
        let template = vec![ItemBlock::Paragraph(para(vec![placeholder("name")]))];
        let sub = rows();
        let data = Data::new();
        let ctx = CompileContext::new(&data).with_sub_data(&sub);

        let filtered = doc(vec![TopLevelNode::BulletListPlaceholder(list_placeholder(
            Some(reject_all),
            template.clone(),
        ))]);
        assert_eq!(compile(&filtered, &ctx).unwrap(), PRE);

        let mut unknown = list_placeholder(None, template.clone());
        unknown.attrs.id = "nope".to_string();
        let d = doc(vec![TopLevelNode::BulletListPlaceholder(unknown)]);
        assert_eq!(compile(&d, &ctx).unwrap(), PRE);

        let no_sub_data = doc(vec![TopLevelNode::BulletListPlaceholder(list_placeholder(
            None, template,
        ))]);
        assert_eq!(render(&no_sub_data, &data), PRE);

        let empty_template = doc(vec![TopLevelNode::BulletListPlaceholder(list_placeholder(
            None,
            vec![],
        ))]);
        assert_eq!(compile(&empty_template, &ctx).unwrap(), PRE);
    }

    #[test]
    fn filter_failure_names_the_placeholder() {
        let filter = Expression::from(Binary::new("name", Operator::Gte, TypedValue::text("B")));
        let p = list_placeholder(Some(filter), vec![ItemBlock::Paragraph(para(vec![text("x")]))]);
        let d = doc(vec![TopLevelNode::BulletListPlaceholder(p)]);
        let sub = rows();
        let data = Data::new();
        match compile(&d, &CompileContext::new(&data).with_sub_data(&sub)) {
            Err(CompileError::Filter { placeholder, .. }) => assert_eq!(placeholder, "items"),
            other => panic!("expected filter error, got {:?}", other),
        }
    }

    #[test]
    fn custom_formatter() {
        struct Upper;
        impl ValueFormatter for Upper {
            fn format(&self, value: &TypedValue) -> String {
                match value {
                    TypedValue::Text(s) => s.to_uppercase(),
                    other => format!("{:?}", other.kind()),
                }
            }
        }
        let data: Data = [("n", TypedValue::text("ada"))].into_iter().collect();
        let d = doc(vec![TopLevelNode::Paragraph(para(vec![placeholder("n")]))]);
        let out = Compiler::with_formatter(Upper)
            .compile(&d, &CompileContext::new(&data))
            .unwrap();
        assert_eq!(out.strip_prefix(PRE).unwrap(), "#par[ADA]\n");
    }
}
