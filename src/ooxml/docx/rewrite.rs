//! Replacing the displayed content of a block-level content control.
//!
//! After a rewrite the control's `w:sdtContent` holds exactly one paragraph.
//! That paragraph keeps its properties and any range markers (bookmarks,
//! comment ranges, permissions) and otherwise holds one run per line. Range
//! markers of the dropped paragraphs stay in the content beside it:
//!
//! ```xml
//! <w:p>
//!   <w:pPr>...</w:pPr>
//!   <w:r><w:rPr/><w:t>first</w:t></w:r>
//!   <w:r><w:rPr/><w:br/><w:t>second</w:t></w:r>
//! </w:p>
//! ```
//!
//! Every run after the first opens with a `w:br`, so N lines give N runs and
//! N-1 breaks. The `w:rPr` of each run is the control's own `w:sdtPr/w:rPr`,
//! shared rather than copied.
use crate::common::xml::{XmlElement, XmlNode};
use crate::ooxml::docx::lines::LineSequence;
use crate::ooxml::opc::constants::namespace::WML_MAIN;
use std::sync::Arc;

/// Rewrite a `w:sdt` element so that it displays `lines`.
///
/// Creates `w:sdtContent` and its paragraph when missing. Rewriting twice with
/// the same lines leaves the same content as rewriting once.
pub fn rewrite(sdt: &mut XmlElement, lines: &LineSequence) {
    let formatting = sdt
        .find_child(WML_MAIN, "sdtPr")
        .and_then(|pr| pr.find_child_shared(WML_MAIN, "rPr"))
        .cloned();

    let content_idx = match sdt.position_of(WML_MAIN, "sdtContent") {
        Some(idx) => idx,
        None => {
            let content = XmlElement::new_like(sdt, "sdtContent");
            sdt.push_element(content)
        },
    };
    let Some(content) = sdt.children_mut()[content_idx].as_element_mut() else {
        return;
    };

    let paragraph_idx = single_paragraph(content);
    let Some(paragraph) = content.children_mut()[paragraph_idx].as_element_mut() else {
        return;
    };

    let insert_at = clear_runs(paragraph);
    let runs: Vec<XmlNode> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| XmlNode::element(text_run(paragraph, formatting.as_ref(), line, i > 0)))
        .collect();
    paragraph.children_mut().splice(insert_at..insert_at, runs);
}

/// Reduce the content to its first paragraph, creating one if there is none.
///
/// Range markers between paragraphs are kept, and those of dropped paragraphs
/// move up into the content in their place. Returns the paragraph's index.
fn single_paragraph(content: &mut XmlElement) -> usize {
    let first = content.position_of(WML_MAIN, "p");
    let old = std::mem::take(content.children_mut());

    let mut paragraph_idx = None;
    for (idx, node) in old.into_iter().enumerate() {
        if Some(idx) == first {
            paragraph_idx = Some(content.children().len());
            content.children_mut().push(node);
        } else if is_range_marker(&node) {
            content.children_mut().push(node);
        } else if node.is_element(WML_MAIN, "p") {
            let markers: Vec<XmlNode> = node
                .as_element()
                .map(|p| p.children().iter().filter(|c| is_range_marker(c)).cloned().collect())
                .unwrap_or_default();
            content.children_mut().extend(markers);
        }
    }

    match paragraph_idx {
        Some(idx) => idx,
        None => {
            let paragraph = XmlElement::new_like(content, "p");
            content.push_element(paragraph)
        },
    }
}

/// Remove everything but properties and range markers from a paragraph.
///
/// Children are removed from the last to the first so pending indexes stay
/// valid. Returns where the new runs go: the position of the first removed
/// child, or the end of the paragraph if nothing was removed.
fn clear_runs(paragraph: &mut XmlElement) -> usize {
    let children = paragraph.children_mut();
    let mut insert_at = children.len();
    for idx in (0..children.len()).rev() {
        let keep = children[idx].is_element(WML_MAIN, "pPr") || is_range_marker(&children[idx]);
        if !keep {
            children.remove(idx);
            insert_at = idx;
        }
    }
    insert_at
}

fn is_range_marker(node: &XmlNode) -> bool {
    let Some(element) = node.as_element() else {
        return false;
    };
    if element.namespace() != Some(WML_MAIN) {
        return false;
    }
    let name = element.local_name();
    matches!(name, "bookmarkStart" | "bookmarkEnd" | "permStart" | "permEnd")
        || name.ends_with("RangeStart")
        || name.ends_with("RangeEnd")
}

fn text_run(
    paragraph: &XmlElement,
    formatting: Option<&Arc<XmlElement>>,
    line: &str,
    after_break: bool,
) -> XmlElement {
    let mut run = XmlElement::new_like(paragraph, "r");
    if let Some(rpr) = formatting {
        run.children_mut().push(XmlNode::Element(Arc::clone(rpr)));
    }
    if after_break {
        run.push_element(XmlElement::new_like(paragraph, "br"));
    }

    let mut text = XmlElement::new_like(paragraph, "t");
    if needs_preserve(line) {
        text.set_attribute("xml:space", "preserve");
    }
    if !line.is_empty() {
        text.push_text(line);
    }
    run.push_element(text);
    run
}

/// Whether whitespace in `line` would be lost without `xml:space="preserve"`.
fn needs_preserve(line: &str) -> bool {
    let is_space = |c: char| c == ' ' || c == '\t';
    line.starts_with(is_space)
        || line.ends_with(is_space)
        || line.contains('\t')
        || line.contains("  ")
}
