//! HTML source and export
//!
//! The question generator hands its output over as a minimal HTML page with one `div` per
//! tagged line. Reading collects the text of every `div` in document order (nested `div`s
//! included, each text node trimmed and concatenated). Writing builds the same layout as an
//! `RcDom` tree and hands it to the html5ever serializer.

use crate::sequencer::ContentItem;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, serialize, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

/// Parse an HTML document into one item per non-empty `div`.
pub fn items_from_html(source: &str) -> Vec<ContentItem> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
    let mut texts = Vec::new();
    collect_divs(&dom.document, &mut texts);
    ContentItem::from_lines(texts)
}

fn collect_divs(handle: &Handle, texts: &mut Vec<String>) {
    if let NodeData::Element { ref name, .. } = handle.data {
        if &*name.local == "div" {
            let mut text = String::new();
            push_text(handle, &mut text);
            if !text.is_empty() {
                texts.push(text);
            }
        }
    }

    for child in handle.children.borrow().iter() {
        collect_divs(child, texts);
    }
}

fn push_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = handle.data {
        out.push_str(contents.borrow().trim());
    }
    for child in handle.children.borrow().iter() {
        push_text(child, out);
    }
}

/// Export tagged text as an HTML page with one `div` per non-empty line.
///
/// Lines break at `\n`, `\r\n` and a lone `\r`. Control characters other than tab are
/// removed, since an HTML parser would not hand them back unchanged.
pub fn to_html(tagged_text: &str) -> io::Result<String> {
    let container = create_element("body");
    for line in export_lines(tagged_text) {
        let div = create_element("div");
        div.children.borrow_mut().push(create_text(&line));
        container.children.borrow_mut().push(div);
    }

    let divs = serialize_children(&container)?;
    Ok(wrap_in_document(&divs))
}

/// The lines `to_html` writes, in order.
pub fn export_lines(tagged_text: &str) -> impl Iterator<Item = String> + '_ {
    tagged_text
        .split(|c: char| c == '\n' || c == '\r')
        .map(|line| {
            line.chars()
                .filter(|c| *c == '\t' || !c.is_control())
                .collect::<String>()
        })
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
}

fn create_element(tag: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(Vec::new()),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize every child of `parent`, one per line. The serializer escapes the text.
fn serialize_children(parent: &Handle) -> io::Result<String> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let mut output = Vec::new();
    for child in parent.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone())?;
        output.push(b'\n');
    }
    String::from_utf8(output)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn wrap_in_document(body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
</head>
<body>
{}</body>
</html>"#,
        body_html
    )
}
