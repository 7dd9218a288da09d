//! XML element tree and element path queries
//!
//! The tree is built with quick-xml's namespace-aware reader. Document type
//! declarations are skipped without being interpreted, so entity definitions
//! never take effect: only the predefined entities and character references
//! are expanded and anything else fails to unescape.
//!
//! Paths follow the ElementTree subset:
//!
//! ```text
//! tag             children named `tag` in any namespace
//! {uri}tag        children named `tag` in namespace `uri`
//! {*}tag  {}tag   any namespace / no namespace
//! *  .  ..        any child / self / parent
//! a//b            `b` descendants of `a`
//! tag[@k]         ... with attribute `k`
//! tag[@k='v']     ... with attribute `k` equal to `v` (also `!=`)
//! tag[c]          ... with a child `c`
//! tag[c='t']      ... with a child `c` whose full text is `t`
//! tag[.='t']      ... whose own full text is `t`
//! tag[2]          ... second of its same-named siblings (also `last()`, `last()-1`)
//! ```

use crate::error::{DecodeCause, Error, Result};
use crate::types::FormatTag;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use std::collections::HashSet;

type NodeId = usize;

// ============================================================================
// Element Tree
// ============================================================================

/// A parsed element
#[derive(Debug, Clone, Default)]
pub struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    tail: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// One past the last node of this element's subtree
    end: NodeId,
}

impl Element {
    /// Local name, without prefix or namespace
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved namespace URI, if the element is in one
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Text before the first child element, if any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Attribute value by local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An XML document as a flat arena of elements in document order
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Document {
    /// Parse a complete document.
    ///
    /// Everything that keeps the body from being one well-formed element tree
    /// is a decode error, including an empty body.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(xml);
        let mut nodes: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root_closed = false;

        loop {
            let (resolved, event) = reader.read_resolved_event().map_err(xml_error)?;
            let namespace = match resolved {
                ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
                ResolveResult::Unbound => None,
                ResolveResult::Unknown(prefix) => {
                    return Err(structure_error(format!(
                        "unbound prefix '{}'",
                        String::from_utf8_lossy(&prefix)
                    )));
                }
            };

            match event {
                Event::Start(start) => {
                    let id = open_element(&mut nodes, &stack, root_closed, namespace, &start)?;
                    stack.push(id);
                }
                Event::Empty(start) => {
                    open_element(&mut nodes, &stack, root_closed, namespace, &start)?;
                    if stack.is_empty() {
                        root_closed = true;
                    }
                }
                Event::End(_) => {
                    let id = stack
                        .pop()
                        .ok_or_else(|| structure_error("unexpected closing tag"))?;
                    nodes[id].end = nodes.len();
                    if stack.is_empty() {
                        root_closed = true;
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(xml_error)?;
                    append_text(&mut nodes, &stack, &text)?;
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    append_text(&mut nodes, &stack, &text)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and DTDs carry no content
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(structure_error("unclosed element at end of document"));
        }
        if nodes.is_empty() {
            return Err(structure_error("no element found"));
        }

        Ok(Self { nodes })
    }

    /// The document element
    pub fn root(&self) -> &Element {
        &self.nodes[0]
    }

    /// First element matching `path`, relative to the root
    pub fn find(&self, path: &ElementPath) -> Option<&Element> {
        self.select(path).first().map(|&id| &self.nodes[id])
    }

    /// All elements matching `path`, relative to the root
    pub fn find_all(&self, path: &ElementPath) -> Vec<&Element> {
        self.select(path)
            .into_iter()
            .map(|id| &self.nodes[id])
            .collect()
    }

    fn select(&self, path: &ElementPath) -> Vec<NodeId> {
        if path.steps.is_empty() {
            return Vec::new();
        }
        let mut current = vec![0];

        for step in &path.steps {
            let mut next = Vec::new();
            let mut seen = HashSet::new();

            for &id in &current {
                let candidates: Vec<NodeId> = match &step.axis {
                    Axis::Child(test) => self.nodes[id]
                        .children
                        .iter()
                        .copied()
                        .filter(|&child| self.name_matches(child, test))
                        .collect(),
                    Axis::Descendant(test) => self
                        .descendants(id)
                        .filter(|&node| self.name_matches(node, test))
                        .collect(),
                    Axis::SelfNode => vec![id],
                    Axis::Parent => self.nodes[id].parent.into_iter().collect(),
                };

                for candidate in candidates {
                    if step
                        .predicates
                        .iter()
                        .all(|predicate| self.predicate_matches(candidate, predicate))
                        && seen.insert(candidate)
                    {
                        next.push(candidate);
                    }
                }
            }

            if next.is_empty() {
                return next;
            }
            current = next;
        }

        current
    }

    /// Descendants in document order. The arena is laid out depth first, so a
    /// subtree is a contiguous range.
    fn descendants(&self, id: NodeId) -> std::ops::Range<NodeId> {
        id + 1..self.nodes[id].end
    }

    fn name_matches(&self, id: NodeId, test: &NameTest) -> bool {
        let element = &self.nodes[id];
        let name_ok = test.name == "*" || test.name == element.name;
        let namespace_ok = match &test.namespace {
            NamespaceTest::Any => true,
            NamespaceTest::None => element.namespace.is_none(),
            NamespaceTest::Uri(uri) => element.namespace.as_deref() == Some(uri.as_str()),
        };
        name_ok && namespace_ok
    }

    fn predicate_matches(&self, id: NodeId, predicate: &Predicate) -> bool {
        let element = &self.nodes[id];
        match predicate {
            Predicate::HasAttribute(name) => element.attribute(name).is_some(),
            Predicate::AttributeEquals(name, value) => {
                element.attribute(name) == Some(value.as_str())
            }
            Predicate::AttributeNotEquals(name, value) => element
                .attribute(name)
                .is_some_and(|actual| actual != value.as_str()),
            Predicate::HasChild(test) => element
                .children
                .iter()
                .any(|&child| self.name_matches(child, test)),
            Predicate::ChildTextEquals(test, value) => element
                .children
                .iter()
                .any(|&child| self.name_matches(child, test) && self.full_text(child) == *value),
            Predicate::TextEquals(value) => self.full_text(id) == *value,
            Predicate::Position(position) => self.position_matches(id, *position),
        }
    }

    fn position_matches(&self, id: NodeId, position: Position) -> bool {
        let Some(parent) = self.nodes[id].parent else {
            return false;
        };
        let element = &self.nodes[id];
        let siblings: Vec<NodeId> = self.nodes[parent]
            .children
            .iter()
            .copied()
            .filter(|&sibling| {
                let other = &self.nodes[sibling];
                other.name == element.name && other.namespace == element.namespace
            })
            .collect();

        let index = match position {
            Position::FromStart(n) => n.checked_sub(1),
            Position::FromEnd(n) => n
                .checked_add(1)
                .and_then(|back| siblings.len().checked_sub(back)),
        };
        index.and_then(|i| siblings.get(i)) == Some(&id)
    }

    /// Concatenated text of an element and all of its descendants
    fn full_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut pending = vec![TextChunk::Text(id)];

        while let Some(chunk) = pending.pop() {
            match chunk {
                TextChunk::Text(node) => {
                    let element = &self.nodes[node];
                    if let Some(text) = &element.text {
                        out.push_str(text);
                    }
                    for &child in element.children.iter().rev() {
                        pending.push(TextChunk::Tail(child));
                        pending.push(TextChunk::Text(child));
                    }
                }
                TextChunk::Tail(node) => {
                    if let Some(tail) = &self.nodes[node].tail {
                        out.push_str(tail);
                    }
                }
            }
        }

        out
    }
}

enum TextChunk {
    Text(NodeId),
    Tail(NodeId),
}

fn open_element(
    nodes: &mut Vec<Element>,
    stack: &[NodeId],
    root_closed: bool,
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<NodeId> {
    if root_closed {
        return Err(structure_error("junk after document element"));
    }

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(e.into()))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(xml_error)?.into_owned();
        attributes.push((key, value));
    }

    let id = nodes.len();
    let parent = stack.last().copied();
    nodes.push(Element {
        namespace,
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        parent,
        end: id + 1,
        ..Element::default()
    });
    if let Some(parent) = parent {
        nodes[parent].children.push(id);
    }
    Ok(id)
}

fn append_text(nodes: &mut [Element], stack: &[NodeId], text: &str) -> Result<()> {
    let Some(&open) = stack.last() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(structure_error("text outside of the document element"));
    };

    let last_child = nodes[open].children.last().copied();
    let target = match last_child {
        Some(last_child) => &mut nodes[last_child].tail,
        None => &mut nodes[open].text,
    };
    target.get_or_insert_with(String::new).push_str(text);
    Ok(())
}

fn xml_error(err: quick_xml::Error) -> Error {
    Error::decode(FormatTag::Xml, err)
}

fn structure_error(message: impl Into<String>) -> Error {
    Error::decode(FormatTag::Xml, DecodeCause::Structure(message.into()))
}

// ============================================================================
// Element Path
// ============================================================================

/// A compiled element path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Axis {
    Child(NameTest),
    Descendant(NameTest),
    SelfNode,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NameTest {
    namespace: NamespaceTest,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NamespaceTest {
    Any,
    None,
    Uri(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    HasAttribute(String),
    AttributeEquals(String, String),
    AttributeNotEquals(String, String),
    HasChild(NameTest),
    ChildTextEquals(NameTest, String),
    TextEquals(String),
    Position(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// 1-based index
    FromStart(usize),
    /// 0 is the last element
    FromEnd(usize),
}

impl ElementPath {
    /// Compile a path expression.
    ///
    /// The empty path compiles to a path that matches nothing.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self { steps: Vec::new() });
        }
        if path.starts_with('/') {
            return Err(Error::invalid_key(path, "cannot use absolute path on element"));
        }

        let raw_steps = split_steps(path)?;
        let mut steps = Vec::with_capacity(raw_steps.len());
        let mut descendant = false;

        for (i, raw) in raw_steps.iter().enumerate() {
            if raw.is_empty() {
                if descendant || i == raw_steps.len() - 1 {
                    return Err(Error::invalid_key(path, "expected an element after '/'"));
                }
                descendant = true;
                continue;
            }

            let (head, predicates) = split_predicates(path, raw)?;
            let predicates = predicates
                .iter()
                .map(|p| parse_predicate(path, p))
                .collect::<Result<Vec<_>>>()?;

            let axis = match head {
                "." if !descendant => Axis::SelfNode,
                ".." if !descendant => Axis::Parent,
                "." | ".." => {
                    return Err(Error::invalid_key(path, "'.' and '..' cannot follow '//'"));
                }
                name => {
                    let test = parse_name_test(path, name)?;
                    if descendant {
                        Axis::Descendant(test)
                    } else {
                        Axis::Child(test)
                    }
                }
            };
            descendant = false;
            steps.push(Step { axis, predicates });
        }

        Ok(Self { steps })
    }
}

/// Split on `/` outside of `{...}`, `[...]` and quotes
fn split_steps(path: &str) -> Result<Vec<&str>> {
    let mut steps = Vec::new();
    let mut start = 0;
    let mut brace = false;
    let mut bracket = false;
    let mut quote: Option<char> = None;

    for (i, c) in path.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') if bracket => quote = Some(c),
            (None, '{') if !bracket => brace = true,
            (None, '}') if brace => brace = false,
            (None, '[') if !brace => bracket = true,
            (None, ']') if bracket => bracket = false,
            (None, '/') if !brace && !bracket => {
                steps.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if brace || bracket || quote.is_some() {
        return Err(Error::invalid_key(path, "unbalanced brackets or quotes"));
    }
    steps.push(&path[start..]);
    Ok(steps)
}

/// Split `tag[a][b]` into `tag` and `["a", "b"]`
fn split_predicates<'a>(path: &str, step: &'a str) -> Result<(&'a str, Vec<&'a str>)> {
    let mut in_brace = false;
    let mut head_end = step.len();
    for (i, c) in step.char_indices() {
        match c {
            '{' => in_brace = true,
            '}' => in_brace = false,
            '[' if !in_brace => {
                head_end = i;
                break;
            }
            _ => {}
        }
    }

    let head = &step[..head_end];
    let mut rest = &step[head_end..];
    let mut predicates = Vec::new();

    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(Error::invalid_key(path, format!("unexpected '{rest}'")));
        }
        let mut quote: Option<char> = None;
        let mut close = None;
        for (i, c) in rest.char_indices().skip(1) {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(c),
                (None, ']') => {
                    close = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let close = close.ok_or_else(|| Error::invalid_key(path, "unterminated predicate"))?;
        predicates.push(rest[1..close].trim());
        rest = &rest[close + 1..];
    }

    if head.is_empty() {
        return Err(Error::invalid_key(path, "predicate without an element"));
    }
    Ok((head, predicates))
}

fn parse_name_test(path: &str, name: &str) -> Result<NameTest> {
    if let Some(rest) = name.strip_prefix('{') {
        let (uri, local) = rest
            .split_once('}')
            .ok_or_else(|| Error::invalid_key(path, "unterminated namespace"))?;
        if local.is_empty() {
            return Err(Error::invalid_key(path, "missing element name"));
        }
        let namespace = match uri {
            "*" => NamespaceTest::Any,
            "" => NamespaceTest::None,
            uri => NamespaceTest::Uri(uri.to_string()),
        };
        return Ok(NameTest {
            namespace,
            name: local.to_string(),
        });
    }

    // Prefixes are not resolved, `ns:tag` matches `tag` in any namespace
    let local = name.rsplit_once(':').map_or(name, |(_, local)| local);
    if local.is_empty() || local.contains(['{', '}', '@', '=', '(', ')']) {
        return Err(Error::invalid_key(path, format!("invalid element name '{name}'")));
    }
    Ok(NameTest {
        namespace: NamespaceTest::Any,
        name: local.to_string(),
    })
}

fn parse_predicate(path: &str, predicate: &str) -> Result<Predicate> {
    if let Some(position) = parse_position(path, predicate)? {
        return Ok(Predicate::Position(position));
    }

    if let Some(attribute) = predicate.strip_prefix('@') {
        return Ok(match split_comparison(path, attribute)? {
            None => Predicate::HasAttribute(attribute.trim().to_string()),
            Some((name, false, value)) => Predicate::AttributeEquals(name, value),
            Some((name, true, value)) => Predicate::AttributeNotEquals(name, value),
        });
    }

    match split_comparison(path, predicate)? {
        None => Ok(Predicate::HasChild(parse_name_test(path, predicate)?)),
        Some((left, false, value)) if left == "." => Ok(Predicate::TextEquals(value)),
        Some((left, false, value)) => Ok(Predicate::ChildTextEquals(
            parse_name_test(path, &left)?,
            value,
        )),
        Some((_, true, _)) => Err(Error::invalid_key(
            path,
            "'!=' is only supported on attributes",
        )),
    }
}

/// `name='value'` or `name!='value'`, returning `(name, negated, value)`
fn split_comparison(path: &str, expr: &str) -> Result<Option<(String, bool, String)>> {
    let Some(eq) = expr.find('=') else {
        return Ok(None);
    };
    let (left, negated) = match expr[..eq].strip_suffix('!') {
        Some(left) => (left, true),
        None => (&expr[..eq], false),
    };
    let right = expr[eq + 1..].trim();
    let value = right
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| right.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
        .ok_or_else(|| Error::invalid_key(path, "comparison value must be quoted"))?;

    let left = left.trim();
    if left.is_empty() {
        return Err(Error::invalid_key(path, "missing name before '='"));
    }
    Ok(Some((left.to_string(), negated, value.to_string())))
}

fn parse_position(path: &str, predicate: &str) -> Result<Option<Position>> {
    if predicate.chars().all(|c| c.is_ascii_digit()) && !predicate.is_empty() {
        let n: usize = predicate
            .parse()
            .map_err(|_| Error::invalid_key(path, "position out of range"))?;
        if n == 0 {
            return Err(Error::invalid_key(path, "position must be >= 1"));
        }
        return Ok(Some(Position::FromStart(n)));
    }

    let Some(rest) = predicate.strip_prefix("last()") else {
        return Ok(None);
    };
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(Some(Position::FromEnd(0)));
    }
    let offset = rest
        .strip_prefix('-')
        .and_then(|n| n.trim().parse::<usize>().ok())
        .ok_or_else(|| Error::invalid_key(path, "expected last() or last()-n"))?;
    Ok(Some(Position::FromEnd(offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(doc: &Document, path: &str) -> Vec<String> {
        doc.find_all(&ElementPath::parse(path).unwrap())
            .into_iter()
            .map(|e| e.text().unwrap_or_default().to_string())
            .collect()
    }

    const FEED: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:m="urn:meta">
  <title>News</title>
  <entry id="1"><title>First</title><m:score>3</m:score></entry>
  <entry id="2" lang="en"><title>Second</title><m:score>7</m:score></entry>
  <entry id="3"><title>Third</title></entry>
</feed>"#;

    #[test]
    fn test_parse_tree_shape() {
        let doc = Document::parse(FEED).unwrap();
        assert_eq!(doc.root().name(), "feed");
        assert_eq!(doc.root().namespace(), Some("http://www.w3.org/2005/Atom"));
    }

    #[test]
    fn test_child_path_ignores_namespace() {
        let doc = Document::parse(FEED).unwrap();
        assert_eq!(texts(&doc, "title"), vec!["News"]);
        assert_eq!(texts(&doc, "entry/title"), vec!["First", "Second", "Third"]);
        assert_eq!(texts(&doc, "entry/score"), vec!["3", "7"]);
        assert_eq!(texts(&doc, "entry/m:score"), vec!["3", "7"]);
    }

    #[test]
    fn test_explicit_namespaces() {
        let doc = Document::parse(FEED).unwrap();
        assert_eq!(texts(&doc, "entry/{urn:meta}score"), vec!["3", "7"]);
        assert_eq!(texts(&doc, "{*}entry/{*}title").len(), 3);
        assert!(texts(&doc, "entry/{urn:other}score").is_empty());
        assert!(texts(&doc, "{}title").is_empty());
    }

    #[test]
    fn test_descendant_and_wildcard() {
        let doc = Document::parse(FEED).unwrap();
        assert_eq!(texts(&doc, ".//title"), vec!["News", "First", "Second", "Third"]);
        assert_eq!(texts(&doc, "entry/*").len(), 5);
        assert_eq!(texts(&doc, "entry/title/..").len(), 3);
    }

    #[test]
    fn test_predicates() {
        let doc = Document::parse(FEED).unwrap();
        assert_eq!(texts(&doc, "entry[@lang]/title"), vec!["Second"]);
        assert_eq!(texts(&doc, "entry[@id='3']/title"), vec!["Third"]);
        assert_eq!(texts(&doc, "entry[@id!='1']/title"), vec!["Second", "Third"]);
        assert_eq!(texts(&doc, "entry[score]/title"), vec!["First", "Second"]);
        assert_eq!(texts(&doc, "entry[score='7']/title"), vec!["Second"]);
        assert_eq!(texts(&doc, "entry/title[.='Third']"), vec!["Third"]);
    }

    #[test]
    fn test_positions() {
        let doc = Document::parse(FEED).unwrap();
        assert_eq!(texts(&doc, "entry[2]/title"), vec!["Second"]);
        assert_eq!(texts(&doc, "entry[last()]/title"), vec!["Third"]);
        assert_eq!(texts(&doc, "entry[last()-2]/title"), vec!["First"]);
        assert!(texts(&doc, "entry[9]/title").is_empty());
    }

    #[test]
    fn test_last_offset_overflow_matches_nothing() {
        let doc = Document::parse(FEED).unwrap();
        assert!(texts(&doc, &format!("entry[last()-{}]", usize::MAX)).is_empty());
        assert!(texts(&doc, "entry[last()-3]").is_empty());
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        const DEPTH: usize = 60_000;
        let body = format!(
            "<r>{}<x>deep</x>{}</r>",
            "<a>".repeat(DEPTH),
            "</a>".repeat(DEPTH)
        );
        let doc = Document::parse(&body).unwrap();

        // Run on a small stack so recursion per level would overflow
        std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || {
                assert_eq!(texts(&doc, ".//x"), vec!["deep"]);
                assert!(texts(&doc, ".//zz").is_empty());
                assert_eq!(texts(&doc, "a[.='deep']").len(), 1);
            })
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn test_text_and_tail() {
        let doc = Document::parse("<r><p>a<b>b</b>c</p></r>").unwrap();
        let p = doc.find(&ElementPath::parse("p").unwrap()).unwrap();
        assert_eq!(p.text(), Some("a"));
        assert_eq!(texts(&doc, "p[.='abc']"), vec!["a"]);
    }

    #[test]
    fn test_cdata_and_entities() {
        let doc = Document::parse("<r><a><![CDATA[1 < 2]]></a><b>&lt;&#65;&gt;</b></r>").unwrap();
        assert_eq!(texts(&doc, "a"), vec!["1 < 2"]);
        assert_eq!(texts(&doc, "b"), vec!["<A>"]);
    }

    #[test]
    fn test_malformed_documents() {
        for body in [
            "",
            "   ",
            "not xml",
            "<a>",
            "<a></b>",
            "</a>",
            "<a/><b/>",
            "<a/>junk",
            "<p:a/>",
        ] {
            let err = Document::parse(body).unwrap_err();
            assert!(err.is_decode(), "{body:?} gave {err}");
        }
    }

    #[test]
    fn test_undeclared_entity_is_rejected() {
        let body = r#"<!DOCTYPE r [<!ENTITY e "expanded">]><r>&e;</r>"#;
        assert!(Document::parse(body).unwrap_err().is_decode());
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["/a", "a[", "a[@x='1]", "a//", "a[0]", "[1]", "a[b!='1']", "{urn"] {
            let err = ElementPath::parse(path).unwrap_err();
            assert!(matches!(err, Error::InvalidKey { .. }), "{path:?} gave {err}");
        }
    }

    #[test]
    fn test_empty_path_matches_nothing() {
        let doc = Document::parse("<r><a>x</a></r>").unwrap();
        assert!(doc.find(&ElementPath::parse("").unwrap()).is_none());
    }
}
