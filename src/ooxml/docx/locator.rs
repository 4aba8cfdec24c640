//! Finding content controls in a part's XML tree.
//!
//! The walk is depth-first and pre-order, so controls come out in document
//! order and an outer control precedes the controls nested in it. Every
//! element is visited, including the content of run, row and cell controls,
//! so block controls nested anywhere are still found.
use crate::common::xml::{NodePath, XmlElement};
use crate::ooxml::docx::content_control::{ContentControl, ControlKind, ControlMetadata};
use crate::ooxml::opc::constants::namespace::WML_MAIN;
use log::debug;
use thiserror::Error;

/// Failures that prevent controls from being queried in a part.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A control carries two property or content containers, so which one
    /// defines it is ambiguous
    #[error("content control at {path:?} has more than one <w:{element}>")]
    DuplicateChild { element: &'static str, path: Vec<usize> },

    /// A previously located control is no longer at its recorded position
    #[error("no content control at {path:?}")]
    MissingNode { path: Vec<usize> },
}

/// What the children of an element may legally hold, which decides the shape
/// of a content control found among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Body, cell, header, footer, text box: paragraphs and tables
    Block,
    /// Paragraph content: runs
    Inline,
    /// Table content: rows
    Table,
    /// Row content: cells
    Row,
}

impl Context {
    fn control_kind(self) -> ControlKind {
        match self {
            Context::Block => ControlKind::Block,
            Context::Inline => ControlKind::Run,
            Context::Table => ControlKind::Row,
            Context::Row => ControlKind::Cell,
        }
    }

    /// Context for the children of a WordprocessingML element.
    fn enter(self, local_name: &str) -> Self {
        match local_name {
            "p" => Context::Inline,
            "tbl" => Context::Table,
            "tr" => Context::Row,
            "tc" | "body" | "hdr" | "ftr" | "txbxContent" | "footnote" | "endnote" | "comment" => {
                Context::Block
            },
            _ => self,
        }
    }
}

/// What the walk found at one `w:sdt`.
enum Visit {
    Control(ContentControl),
    /// A control with two property or content containers. Which one defines
    /// it is ambiguous, so it is only an error for a query it could answer.
    Ambiguous {
        element: &'static str,
        kind: ControlKind,
        candidates: Vec<ControlMetadata>,
        path: NodePath,
    },
}

fn walk(root: &XmlElement) -> Vec<Visit> {
    let mut visits = Vec::new();
    let mut stack: Vec<(&XmlElement, NodePath, Context)> = vec![(root, NodePath::new(), Context::Block)];

    while let Some((element, path, ctx)) = stack.pop() {
        let is_sdt = element.is(WML_MAIN, "sdt");

        if is_sdt {
            let properties: Vec<&XmlElement> = element
                .child_elements()
                .filter(|e| e.is(WML_MAIN, "sdtPr"))
                .collect();
            let duplicate = if properties.len() > 1 {
                Some("sdtPr")
            } else if element.count_children(WML_MAIN, "sdtContent") > 1 {
                Some("sdtContent")
            } else {
                None
            };

            let visit = match duplicate {
                Some(name) => {
                    debug!("content control at {:?} has more than one <w:{}>", path.as_slice(), name);
                    Visit::Ambiguous {
                        element: name,
                        kind: ctx.control_kind(),
                        candidates: properties.into_iter().map(ControlMetadata::from_properties).collect(),
                        path: path.clone(),
                    }
                },
                None => {
                    let metadata = properties
                        .first()
                        .map(|pr| ControlMetadata::from_properties(pr))
                        .unwrap_or_default();
                    Visit::Control(ContentControl::new(ctx.control_kind(), metadata, path.clone()))
                },
            };
            visits.push(visit);
        }

        let child_ctx = if element.namespace() == Some(WML_MAIN) && !is_sdt {
            ctx.enter(element.local_name())
        } else {
            ctx
        };

        // Reverse push keeps the pop order equal to document order
        for (idx, child) in element.children().iter().enumerate().rev() {
            let Some(child) = child.as_element() else {
                continue;
            };
            // Only the content of a control holds document content
            if is_sdt && !child.is(WML_MAIN, "sdtContent") {
                continue;
            }
            let mut child_path = path.clone();
            child_path.push(idx);
            stack.push((child, child_path, child_ctx));
        }
    }

    visits
}

/// List every content control under `root`, of every shape, in document order.
///
/// Controls with two `w:sdtPr` or two `w:sdtContent` are left out; the
/// controls nested in their content are still listed.
pub fn controls(root: &XmlElement) -> Vec<ContentControl> {
    walk(root)
        .into_iter()
        .filter_map(|visit| match visit {
            Visit::Control(control) => Some(control),
            Visit::Ambiguous { .. } => None,
        })
        .collect()
}

/// Locate the block-level controls whose alias or tag equals `target`.
///
/// Zero matches is an empty result, not an error. A block-level control with
/// duplicate containers fails the query only when one of its `w:sdtPr`
/// carries `target`; otherwise it is skipped.
pub fn locate(root: &XmlElement, target: &str) -> Result<Vec<ContentControl>, QueryError> {
    let mut found = Vec::new();
    for visit in walk(root) {
        match visit {
            Visit::Control(control) => {
                if control.is_block() && control.metadata().matches(target) {
                    found.push(control);
                }
            },
            Visit::Ambiguous {
                element,
                kind,
                candidates,
                path,
            } => {
                if kind == ControlKind::Block && candidates.iter().any(|m| m.matches(target)) {
                    return Err(QueryError::DuplicateChild {
                        element,
                        path: path.to_vec(),
                    });
                }
            },
        }
    }
    Ok(found)
}
