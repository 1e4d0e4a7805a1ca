//! XML ⇄ JSON value mapping.
//!
//! Writing: the document element is `<root>`, object keys become child
//! element names, an array under a key becomes one repeated element per item
//! and any other array (top level or nested in an array) becomes `<item>`
//! children. `null` and empty containers are empty elements.
//!
//! Reading: the document element's name is dropped. Attributes and child
//! elements become fields, repeated siblings collapse into an array and a
//! text-only element becomes a string. Text mixed with children is kept
//! under the `""` key.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Value};

use crate::error::{ConversionError, ConversionResult};

const FORMAT: &str = "XML";
const ROOT_ELEMENT: &str = "root";
const ITEM_ELEMENT: &str = "item";
/// Deepest element nesting accepted when reading.
pub const MAX_DEPTH: usize = 512;

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Serialize a JSON value as an indented XML document.
pub fn write_value(value: &Value) -> ConversionResult<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_element(&mut writer, ROOT_ELEMENT, value)?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> ConversionResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ConversionError::render(FORMAT, e))
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> ConversionResult<()> {
    match value {
        Value::Null => emit(writer, Event::Empty(BytesStart::new(name))),
        Value::Object(map) if map.is_empty() => emit(writer, Event::Empty(BytesStart::new(name))),
        Value::Array(items) if items.is_empty() => {
            emit(writer, Event::Empty(BytesStart::new(name)))
        }
        Value::Object(map) => {
            emit(writer, Event::Start(BytesStart::new(name)))?;
            for (key, child) in map {
                let child_name = element_name(key);
                match child {
                    Value::Array(items) if !items.is_empty() => {
                        for item in items {
                            write_element(writer, &child_name, item)?;
                        }
                    }
                    other => write_element(writer, &child_name, other)?,
                }
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        Value::Array(items) => {
            emit(writer, Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_element(writer, ITEM_ELEMENT, item)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        scalar => {
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if text.is_empty() {
                return emit(writer, Event::Empty(BytesStart::new(name)));
            }
            emit(writer, Event::Start(BytesStart::new(name)))?;
            emit(writer, Event::Text(BytesText::new(&text)))?;
            emit(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

/// Turn an arbitrary object key into a legal XML element name.
///
/// Characters outside letters, digits, `_`, `-` and `.` become `_`, and a
/// name that does not start with a letter or `_` gets a `_` prefix.
pub fn element_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Node {
    name: String,
    fields: Vec<(String, Value)>,
    text: String,
}

impl Node {
    fn open(start: &BytesStart<'_>) -> ConversionResult<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut fields = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ConversionError::malformed(FORMAT, e))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| ConversionError::malformed(FORMAT, e))?;
            fields.push((key, Value::String(value.into_owned())));
        }
        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn into_value(self) -> Value {
        let text = self.text.trim();
        if self.fields.is_empty() {
            return Value::String(text.to_string());
        }

        let mut map = Map::new();
        for (key, value) in self.fields {
            insert_merged(&mut map, key, value);
        }
        if !text.is_empty() {
            insert_merged(&mut map, String::new(), Value::String(text.to_string()));
        }
        Value::Object(map)
    }
}

/// Insert a field, turning a repeated key into an array of its values.
/// Node values are never arrays, so an existing array is always a merge.
fn insert_merged(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        None => {
            map.insert(key, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Parse an XML document into a JSON value.
pub fn read_value(input: &[u8]) -> ConversionResult<Value> {
    let text = std::str::from_utf8(input).map_err(|e| ConversionError::malformed(FORMAT, e))?;
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ConversionError::malformed(
                FORMAT,
                format!("at position {}: {e}", reader.buffer_position()),
            )
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ConversionError::malformed(FORMAT, "content after the root element"));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(ConversionError::malformed(
                        FORMAT,
                        format!("nesting too deep (limit {MAX_DEPTH})"),
                    ));
                }
                stack.push(Node::open(&start)?);
            }
            Event::Empty(start) => {
                let node = Node::open(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ConversionError::malformed(FORMAT, "unmatched closing tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(t) => {
                let unescaped = t.unescape().map_err(|e| ConversionError::malformed(FORMAT, e))?;
                push_text(&mut stack, &unescaped)?;
            }
            Event::CData(c) => {
                push_text(&mut stack, &String::from_utf8_lossy(&c))?;
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConversionError::malformed(
            FORMAT,
            format!("element <{}> is not closed", open.name),
        ));
    }

    root.map(Node::into_value)
        .ok_or_else(|| ConversionError::malformed(FORMAT, "document has no root element"))
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> ConversionResult<()> {
    if let Some(parent) = stack.last_mut() {
        let name = node.name.clone();
        parent.fields.push((name, node.into_value()));
        Ok(())
    } else if root.is_none() {
        *root = Some(node);
        Ok(())
    } else {
        Err(ConversionError::malformed(FORMAT, "content after the root element"))
    }
}

fn push_text(stack: &mut [Node], text: &str) -> ConversionResult<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(node) => {
            if !node.text.is_empty() {
                node.text.push(' ');
            }
            node.text.push_str(text.trim());
            Ok(())
        }
        None => Err(ConversionError::malformed(FORMAT, "text outside the root element")),
    }
}
