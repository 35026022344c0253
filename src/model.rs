//! Parsed server responses.
//!
//! A `ResponseModel` is an untyped tree produced by one of the wire format
//! adapters. Callers query it with a small path language:
//!
//! - segments are separated by `/`, a leading `/` is optional
//! - each segment is a name with an optional zero-based `[n]` index
//! - for XML the first segment names the root element
//!
//! e.g. `/user/token`, `/assets/asset[0]/id` or, for JSON, `asset[0]/id`.
//! Anything that does not resolve yields `None`.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseModel {
    Json(Value),
    Xml(XmlDocument),
}

impl ResponseModel {
    /// Text of the node at `path`, if there is one.
    pub fn select_text(&self, path: &str) -> Option<String> {
        let segments = parse_path(path)?;
        match self {
            ResponseModel::Json(value) => select_json(value, &segments).and_then(json_text),
            ResponseModel::Xml(document) => {
                select_xml(document.root(), &segments).map(XmlElement::text)
            }
        }
    }
}

impl std::fmt::Display for ResponseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseModel::Json(value) => write!(f, "{:#}", value),
            ResponseModel::Xml(document) => write!(f, "{}", document.source()),
        }
    }
}

/// An XML response, kept both as an owned element tree and as its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
    source: String,
}

impl XmlDocument {
    pub fn parse(source: &str) -> Result<XmlDocument, roxmltree::Error> {
        let document = roxmltree::Document::parse(source)?;
        Ok(XmlDocument {
            root: XmlElement::from_node(document.root_element()),
            source: source.to_string(),
        })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    fn from_node(node: roxmltree::Node) -> XmlElement {
        let attributes = node
            .attributes()
            .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
            .collect();

        let children = node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(XmlNode::Element(XmlElement::from_node(child)))
                } else if child.is_text() {
                    child.text().map(|text| XmlNode::Text(text.to_string()))
                } else {
                    None
                }
            })
            .collect();

        XmlElement {
            name: node.tag_name().name().to_string(),
            attributes,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated text of every descendant text node.
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, buffer: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => buffer.push_str(text),
                XmlNode::Element(element) => element.collect_text(buffer),
            }
        }
    }
}

#[derive(Debug, PartialEq)]
struct PathSegment<'a> {
    name: &'a str,
    index: Option<usize>,
}

fn parse_path(path: &str) -> Option<Vec<PathSegment<'_>>> {
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        return Some(Vec::new());
    }

    path.split('/')
        .map(|segment| match segment.split_once('[') {
            Some((name, rest)) => {
                let index = rest.strip_suffix(']')?.trim().parse().ok()?;
                (!name.is_empty()).then_some(PathSegment {
                    name,
                    index: Some(index),
                })
            }
            None => (!segment.is_empty()).then_some(PathSegment {
                name: segment,
                index: None,
            }),
        })
        .collect()
}

fn select_json<'v>(value: &'v Value, segments: &[PathSegment]) -> Option<&'v Value> {
    segments.iter().try_fold(value, |node, segment| {
        let member = node.as_object()?.get(segment.name)?;
        match segment.index {
            Some(index) => member.as_array()?.get(index),
            None => Some(member),
        }
    })
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn select_xml<'e>(root: &'e XmlElement, segments: &[PathSegment]) -> Option<&'e XmlElement> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(root);
    };
    if first.name != root.name || first.index.unwrap_or(0) != 0 {
        return None;
    }
    rest.iter().try_fold(root, |element, segment| {
        element
            .children()
            .filter(|child| child.name == segment.name)
            .nth(segment.index.unwrap_or(0))
    })
}
