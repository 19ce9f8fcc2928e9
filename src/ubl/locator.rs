//! Path-like lookups over a [`Document`].
//!
//! A locator is a `/`-separated list of `prefix:Name` steps, optionally
//! absolute (leading `/`, first step tests the root element), with an
//! optional `[@attr="value"]` predicate per step and an optional final
//! `@attr` step selecting an attribute value:
//!
//! ```text
//! /ubl:Invoice/cac:PaymentMeans/cbc:PaymentID
//! cac:Attachment/cbc:EmbeddedDocumentBinaryObject[@mimeCode="application/pdf"]
//! cbc:InvoicedQuantity/@unitCode
//! ```
//!
//! Prefixes come from [`NAMESPACES`](super::NAMESPACES); an unprefixed step
//! only matches elements without a namespace.

use thiserror::Error;

use super::document::{Document, Node};
use super::namespace_for_prefix;

/// A locator expression that does not follow the grammar above.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locator `{expression}`: {reason}")]
pub struct LocatorError {
    pub expression: String,
    pub reason: String,
}

/// A compiled locator expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    absolute: bool,
    steps: Vec<Step>,
    attribute: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    namespace: Option<&'static str>,
    name: String,
    predicate: Option<(String, String)>,
}

impl Step {
    fn matches(&self, node: Node<'_>) -> bool {
        node.is(self.namespace, &self.name)
            && self
                .predicate
                .as_ref()
                .is_none_or(|(attr, value)| node.attribute(attr) == Some(value.as_str()))
    }
}

impl Locator {
    /// Compile a locator.
    ///
    /// # Panics
    ///
    /// Panics when `expression` is malformed. Locators are written in code,
    /// so a bad one is a programming error; use [`Locator::parse`] for
    /// expressions from elsewhere.
    pub fn new(expression: &str) -> Self {
        match Self::parse(expression) {
            Ok(locator) => locator,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn parse(expression: &str) -> Result<Self, LocatorError> {
        let invalid = |reason: String| LocatorError {
            expression: expression.to_string(),
            reason,
        };

        let (absolute, body) = match expression.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, expression),
        };
        if body.trim().is_empty() {
            return Err(invalid("empty path".into()));
        }

        let mut raw_steps = split_steps(body);
        let attribute = match raw_steps
            .last()
            .and_then(|s| s.strip_prefix('@'))
            .map(str::to_string)
        {
            Some(attr) => {
                if !is_name(&attr) {
                    return Err(invalid(format!("invalid attribute name '{attr}'")));
                }
                raw_steps.pop();
                Some(attr)
            }
            None => None,
        };

        if absolute && raw_steps.is_empty() {
            return Err(invalid("absolute path needs at least one element step".into()));
        }

        let steps = raw_steps
            .into_iter()
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        Ok(Self {
            absolute,
            steps,
            attribute,
        })
    }

    /// All matching elements in document order.
    ///
    /// Relative locators start at `context`; without a context (or for an
    /// absolute locator) the first step is tested against the root element.
    pub fn select<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Vec<Node<'a>> {
        let (mut current, steps) = self.start(doc, context);
        for step in steps {
            current = current
                .into_iter()
                .flat_map(|node| node.children())
                .filter(|child| step.matches(*child))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// The first matching element, searched depth-first without collecting.
    pub fn first<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Option<Node<'a>> {
        let (start, steps) = self.start(doc, context);
        start.into_iter().find_map(|node| find_first(node, steps))
    }

    /// Trimmed text (or attribute value) of the first match; empty when nothing matches.
    pub fn value<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> String {
        let Some(node) = self.first(doc, context) else {
            return String::new();
        };
        match &self.attribute {
            Some(attr) => node.attribute(attr).unwrap_or_default().trim().to_string(),
            None => node.text().trim().to_string(),
        }
    }

    fn start<'a, 's>(
        &'s self,
        doc: &'a Document,
        context: Option<Node<'a>>,
    ) -> (Vec<Node<'a>>, &'s [Step]) {
        match context {
            Some(ctx) if !self.absolute => (vec![ctx], self.steps.as_slice()),
            _ => match self.steps.split_first() {
                Some((first, rest)) => {
                    let root = doc.root();
                    let start = if first.matches(root) { vec![root] } else { Vec::new() };
                    (start, rest)
                }
                None => (Vec::new(), self.steps.as_slice()),
            },
        }
    }
}

fn find_first<'a>(node: Node<'a>, steps: &[Step]) -> Option<Node<'a>> {
    let Some((step, rest)) = steps.split_first() else {
        return Some(node);
    };
    node.children()
        .filter(|child| step.matches(*child))
        .find_map(|child| find_first(child, rest))
}

/// Split on `/` outside of `[...]`, so predicate values may contain slashes.
fn split_steps(body: &str) -> Vec<&str> {
    let mut steps = Vec::new();
    let mut start = 0;
    let mut in_predicate = false;
    for (i, c) in body.char_indices() {
        match c {
            '[' => in_predicate = true,
            ']' => in_predicate = false,
            '/' if !in_predicate => {
                steps.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    steps.push(&body[start..]);
    steps
}

fn parse_step(raw: &str) -> Result<Step, String> {
    let (qname, predicate) = match raw.split_once('[') {
        Some((qname, rest)) => {
            let inner = rest
                .strip_suffix(']')
                .ok_or_else(|| format!("unterminated predicate in step '{raw}'"))?;
            (qname, Some(parse_predicate(inner)?))
        }
        None => (raw, None),
    };

    let (namespace, name) = match qname.split_once(':') {
        Some((prefix, name)) => {
            let uri = namespace_for_prefix(prefix)
                .ok_or_else(|| format!("unknown namespace prefix '{prefix}'"))?;
            (Some(uri), name)
        }
        None => (None, qname),
    };
    if !is_name(name) {
        return Err(format!("invalid element name in step '{raw}'"));
    }

    Ok(Step {
        namespace,
        name: name.to_string(),
        predicate,
    })
}

fn parse_predicate(inner: &str) -> Result<(String, String), String> {
    let test = inner
        .strip_prefix('@')
        .ok_or_else(|| format!("predicate '{inner}' must test an attribute"))?;
    let (attr, quoted) = test
        .split_once('=')
        .ok_or_else(|| format!("predicate '{inner}' must compare with '='"))?;
    let value = quoted
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| quoted.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .ok_or_else(|| format!("predicate value in '{inner}' must be quoted"))?;
    if !is_name(attr) {
        return Err(format!("invalid attribute name '{attr}'"));
    }
    Ok((attr.to_string(), value.to_string()))
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Something that can find a non-empty string in a document.
///
/// Implemented for [`Locator`], for `str` (compiled on use), and for slices
/// and arrays of lookups, which try each entry in order and return the first
/// non-empty result. That makes schema fallbacks a plain list:
///
/// ```
/// # use eracun::ubl::{Document, Lookup};
/// let doc = Document::parse_str(
///     r#"<ubl:Invoice xmlns:ubl="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
///                     xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
///          <cbc:Note>hello</cbc:Note>
///        </ubl:Invoice>"#,
/// ).unwrap();
/// let note = ["/ubl:Invoice/cbc:Description", "/ubl:Invoice/cbc:Note"];
/// assert_eq!(doc.text(&note, None), "hello");
/// ```
pub trait Lookup {
    fn try_locate<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Option<String>;
}

impl Lookup for Locator {
    fn try_locate<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Option<String> {
        Some(self.value(doc, context)).filter(|v| !v.is_empty())
    }
}

impl Lookup for str {
    fn try_locate<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Option<String> {
        Locator::new(self).try_locate(doc, context)
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn try_locate<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Option<String> {
        (**self).try_locate(doc, context)
    }
}

impl<L: Lookup> Lookup for [L] {
    fn try_locate<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Option<String> {
        self.iter().find_map(|lookup| lookup.try_locate(doc, context))
    }
}

impl<L: Lookup, const N: usize> Lookup for [L; N] {
    fn try_locate<'a>(&self, doc: &'a Document, context: Option<Node<'a>>) -> Option<String> {
        self.as_slice().try_locate(doc, context)
    }
}

impl Document {
    /// First non-empty trimmed value for `lookup`, or an empty string.
    pub fn text<'a>(&'a self, lookup: &(impl Lookup + ?Sized), context: Option<Node<'a>>) -> String {
        lookup.try_locate(self, context).unwrap_or_default()
    }

    /// All elements matching `locator`.
    ///
    /// # Panics
    ///
    /// Panics on a malformed locator, see [`Locator::new`].
    pub fn select<'a>(&'a self, locator: &str, context: Option<Node<'a>>) -> Vec<Node<'a>> {
        Locator::new(locator).select(self, context)
    }

    /// First element matching `locator`.
    ///
    /// # Panics
    ///
    /// Panics on a malformed locator, see [`Locator::new`].
    pub fn first<'a>(&'a self, locator: &str, context: Option<Node<'a>>) -> Option<Node<'a>> {
        Locator::new(locator).first(self, context)
    }
}
