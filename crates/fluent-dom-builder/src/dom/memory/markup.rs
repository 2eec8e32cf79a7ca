//! Markup parsing and serialization for the in-memory host.
//!
//! The parser is forgiving where browsers are (unclosed elements are closed
//! at the end of input, stray end tags are dropped) and strict about
//! truncated syntax, which it reports as [`DomError::Syntax`].

use std::rc::Rc;

use super::{MemoryElement, MemoryNode};
use crate::config::MemoryDocumentConfig;
use crate::debug_log;
use crate::error::DomError;

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Like raw text, but character references are decoded.
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

struct StartTag {
	name: String,
	attributes: Vec<(String, String)>,
	self_closing: bool,
	next: usize,
}

/// Parses `markup` into detached top-level nodes.
pub(super) fn parse_fragment(
	markup: &str,
	config: &Rc<MemoryDocumentConfig>,
) -> Result<Vec<MemoryNode>, DomError> {
	let mut roots: Vec<MemoryNode> = Vec::new();
	let mut stack: Vec<MemoryElement> = Vec::new();
	let bytes = markup.as_bytes();
	let mut i = 0usize;

	while i < bytes.len() {
		if starts_with_at(bytes, i, b"<!--") {
			let end = find_subslice(bytes, i + 4, b"-->")
				.ok_or_else(|| DomError::Syntax("unclosed comment".to_string()))?;
			i = end + 3;
			continue;
		}

		if starts_with_at(bytes, i, b"<!") || starts_with_at(bytes, i, b"<?") {
			// Doctype and processing instructions carry no content here.
			i = skip_past(bytes, i, b'>')?;
			continue;
		}

		if starts_with_at(bytes, i, b"</") {
			if !bytes.get(i + 2).is_some_and(u8::is_ascii_alphabetic) {
				i = skip_past(bytes, i, b'>')?;
				continue;
			}
			let (name, next) = parse_end_tag(markup, i)?;
			i = next;
			let name = config.normalize_name(&name);
			match stack.iter().rposition(|open| open.tag_name_is(&name)) {
				Some(position) => stack.truncate(position),
				None => debug_log!("ignoring stray end tag </{}>", name),
			}
			continue;
		}

		if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
			let tag = parse_start_tag(markup, i)?;
			i = tag.next;

			if config.html_semantics {
				close_implied(&mut stack, &tag.name.to_ascii_lowercase());
			}
			if stack.len() >= config.max_nesting_depth {
				return Err(DomError::NestingTooDeep {
					limit: config.max_nesting_depth,
				});
			}

			let name = config.normalize_name(&tag.name);
			let element = MemoryElement::detached(name.clone(), Rc::clone(config));
			for (attribute, value) in tag.attributes {
				element.push_attribute(config.normalize_name(&attribute), value);
			}
			append_node(&stack, &mut roots, MemoryNode::Element(element.clone()));

			let raw = RAW_TEXT_ELEMENTS.contains(&name.as_str());
			let escapable = ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&name.as_str());
			if (raw || escapable) && !tag.self_closing {
				let (text, next) = take_raw_text(markup, i, &name);
				i = next;
				if !text.is_empty() {
					let text = if escapable {
						decode_character_references(text)
					} else {
						text.to_string()
					};
					element.push_node(MemoryNode::Text(text));
				}
				continue;
			}

			if !tag.self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
				stack.push(element);
			}
			continue;
		}

		let start = i;
		i += 1;
		while i < bytes.len() && bytes[i] != b'<' {
			i += 1;
		}
		let text = decode_character_references(&markup[start..i]);
		append_node(&stack, &mut roots, MemoryNode::Text(text));
	}

	Ok(roots)
}

/// Start tags that end an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
	"address",
	"article",
	"aside",
	"blockquote",
	"details",
	"div",
	"dl",
	"fieldset",
	"figcaption",
	"figure",
	"footer",
	"form",
	"h1",
	"h2",
	"h3",
	"h4",
	"h5",
	"h6",
	"header",
	"hr",
	"main",
	"nav",
	"ol",
	"p",
	"pre",
	"section",
	"table",
	"ul",
];

/// Elements that stop the search for an open `<p>`.
const PARAGRAPH_SCOPE: &[&str] = &[
	"button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

/// Pops elements whose end tag is implied by the start tag `name`, the way an
/// HTML parser closes `<p>` before a block and `<li>` before a sibling item.
fn close_implied(stack: &mut Vec<MemoryElement>, name: &str) {
	if CLOSES_PARAGRAPH.contains(&name) {
		let open = stack.iter().rposition(|open| {
			open.tag_name_is("p") || PARAGRAPH_SCOPE.iter().any(|scope| open.tag_name_is(scope))
		});
		if let Some(position) = open.filter(|&position| stack[position].tag_name_is("p")) {
			stack.truncate(position);
		}
	}
	if name == "li" {
		let open = stack.iter().rposition(|open| {
			["li", "ul", "ol"].iter().any(|tag| open.tag_name_is(tag))
		});
		if let Some(position) = open.filter(|&position| stack[position].tag_name_is("li")) {
			stack.truncate(position);
		}
	}
}

fn append_node(stack: &[MemoryElement], roots: &mut Vec<MemoryNode>, node: MemoryNode) {
	match stack.last() {
		Some(parent) => parent.push_node(node),
		None => match (roots.last_mut(), node) {
			(Some(MemoryNode::Text(last)), MemoryNode::Text(text)) => last.push_str(&text),
			(_, node) => roots.push(node),
		},
	}
}

fn parse_start_tag(markup: &str, at: usize) -> Result<StartTag, DomError> {
	let bytes = markup.as_bytes();
	let mut i = at + 1;

	let name_start = i;
	while i < bytes.len() && is_tag_char(bytes[i]) {
		i += 1;
	}
	let name = markup[name_start..i].to_string();

	let mut attributes: Vec<(String, String)> = Vec::new();
	let self_closing;

	loop {
		skip_whitespace(bytes, &mut i);
		if i >= bytes.len() {
			return Err(DomError::Syntax(format!("unclosed start tag <{name}")));
		}

		if bytes[i] == b'>' {
			self_closing = false;
			i += 1;
			break;
		}

		if bytes[i] == b'/' {
			if bytes.get(i + 1) == Some(&b'>') {
				self_closing = true;
				i += 2;
				break;
			}
			i += 1;
			continue;
		}

		let attr_start = i;
		while i < bytes.len() && is_attribute_name_char(bytes[i]) {
			i += 1;
		}
		if i == attr_start {
			return Err(DomError::Syntax(format!(
				"invalid attribute name in <{name}>"
			)));
		}
		let attribute = markup[attr_start..i].to_string();

		skip_whitespace(bytes, &mut i);
		let value = if bytes.get(i) == Some(&b'=') {
			i += 1;
			skip_whitespace(bytes, &mut i);
			parse_attribute_value(markup, &mut i)?
		} else {
			String::new()
		};

		if !attributes
			.iter()
			.any(|(existing, _)| existing.eq_ignore_ascii_case(&attribute))
		{
			attributes.push((attribute, value));
		}
	}

	Ok(StartTag {
		name,
		attributes,
		self_closing,
		next: i,
	})
}

fn parse_end_tag(markup: &str, at: usize) -> Result<(String, usize), DomError> {
	let bytes = markup.as_bytes();
	let mut i = at + 2;

	let name_start = i;
	while i < bytes.len() && is_tag_char(bytes[i]) {
		i += 1;
	}
	let name = markup[name_start..i].to_string();

	let next = skip_past(bytes, i, b'>')
		.map_err(|_| DomError::Syntax(format!("unclosed end tag </{name}")))?;
	Ok((name, next))
}

fn parse_attribute_value(markup: &str, i: &mut usize) -> Result<String, DomError> {
	let bytes = markup.as_bytes();
	if *i >= bytes.len() {
		return Err(DomError::Syntax("missing attribute value".to_string()));
	}

	if bytes[*i] == b'"' || bytes[*i] == b'\'' {
		let quote = bytes[*i];
		*i += 1;
		let start = *i;
		while *i < bytes.len() && bytes[*i] != quote {
			*i += 1;
		}
		if *i >= bytes.len() {
			return Err(DomError::Syntax(
				"unclosed quoted attribute value".to_string(),
			));
		}
		let value = decode_character_references(&markup[start..*i]);
		*i += 1;
		return Ok(value);
	}

	let start = *i;
	while *i < bytes.len()
		&& !bytes[*i].is_ascii_whitespace()
		&& bytes[*i] != b'>'
		&& !(bytes[*i] == b'/' && bytes.get(*i + 1) == Some(&b'>'))
	{
		*i += 1;
	}
	Ok(decode_character_references(&markup[start..*i]))
}

/// Returns the raw content of a raw-text element and the index after its end
/// tag. A missing end tag consumes the rest of the input.
fn take_raw_text<'a>(markup: &'a str, at: usize, name: &str) -> (&'a str, usize) {
	let bytes = markup.as_bytes();
	let mut i = at;
	while let Some(lt) = find_subslice(bytes, i, b"</") {
		let name_end = lt + 2 + name.len();
		let matches_name = bytes
			.get(lt + 2..name_end)
			.is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()));
		let boundary = matches!(
			bytes.get(name_end),
			None | Some(b'>') | Some(b'/') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')
		);
		if matches_name && boundary {
			let next = skip_past(bytes, name_end, b'>').unwrap_or(bytes.len());
			return (&markup[at..lt], next);
		}
		i = lt + 2;
	}
	(&markup[at..], bytes.len())
}

/// Decodes `&name;`, `&#NN;` and `&#xNN;` references. Unknown references are
/// kept literally.
pub(super) fn decode_character_references(src: &str) -> String {
	if !src.contains('&') {
		return src.to_string();
	}

	let mut out = String::with_capacity(src.len());
	let mut rest = src;
	while let Some(amp) = rest.find('&') {
		out.push_str(&rest[..amp]);
		let after = &rest[amp + 1..];
		let decoded = after.find(';').and_then(|semi| {
			let reference = &after[..semi];
			decode_reference(reference).map(|c| (c, semi))
		});
		match decoded {
			Some((c, semi)) => {
				out.push(c);
				rest = &after[semi + 1..];
			}
			None => {
				out.push('&');
				rest = after;
			}
		}
	}
	out.push_str(rest);
	out
}

fn decode_reference(reference: &str) -> Option<char> {
	if let Some(numeric) = reference.strip_prefix('#') {
		let code = match numeric.strip_prefix(['x', 'X']) {
			Some(hex) => u32::from_str_radix(hex, 16).ok()?,
			None => numeric.parse::<u32>().ok()?,
		};
		return char::from_u32(code);
	}
	match reference {
		"amp" => Some('&'),
		"lt" => Some('<'),
		"gt" => Some('>'),
		"quot" => Some('"'),
		"apos" => Some('\''),
		"nbsp" => Some('\u{00A0}'),
		"copy" => Some('©'),
		"reg" => Some('®'),
		"trade" => Some('™'),
		"hellip" => Some('…'),
		"mdash" => Some('—'),
		"ndash" => Some('–'),
		"laquo" => Some('«'),
		"raquo" => Some('»'),
		"middot" => Some('·'),
		_ => None,
	}
}

/// Pending serializer work, popped from an explicit stack.
enum Step {
	Element(MemoryElement),
	Text { text: String, raw: bool },
	EndTag(String),
}

/// Serializes `element` with its own start and end tags.
pub(super) fn serialize_element(element: &MemoryElement, out: &mut String) {
	serialize_steps(vec![Step::Element(element.clone())], out);
}

/// Serializes the children of `element`.
pub(super) fn serialize_children(element: &MemoryElement, out: &mut String) {
	let mut steps = Vec::new();
	push_children(element, &mut steps);
	serialize_steps(steps, out);
}

/// Pushes the children of `element` so the first child is popped first.
fn push_children(element: &MemoryElement, steps: &mut Vec<Step>) {
	let data = element.inner.borrow();
	let raw = RAW_TEXT_ELEMENTS.contains(&data.tag_name.as_str());
	steps.extend(data.children.iter().rev().map(|child| match child {
		MemoryNode::Element(child) => Step::Element(child.clone()),
		MemoryNode::Text(text) => Step::Text {
			text: text.clone(),
			raw,
		},
	}));
}

fn serialize_steps(mut steps: Vec<Step>, out: &mut String) {
	while let Some(step) = steps.pop() {
		match step {
			Step::Text { text, raw: true } => out.push_str(&text),
			Step::Text { text, raw: false } => escape_text(&text, out),
			Step::EndTag(name) => {
				out.push_str("</");
				out.push_str(&name);
				out.push('>');
			}
			Step::Element(element) => {
				let data = element.inner.borrow();
				out.push('<');
				out.push_str(&data.tag_name);
				for (name, value) in &data.attributes {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					escape_attribute(value, out);
					out.push('"');
				}
				out.push('>');

				if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
					continue;
				}
				steps.push(Step::EndTag(data.tag_name.clone()));
				drop(data);
				push_children(&element, &mut steps);
			}
		}
	}
}

fn escape_text(text: &str, out: &mut String) {
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'\u{00A0}' => out.push_str("&nbsp;"),
			_ => out.push(c),
		}
	}
}

fn escape_attribute(value: &str, out: &mut String) {
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'"' => out.push_str("&quot;"),
			'\u{00A0}' => out.push_str("&nbsp;"),
			_ => out.push(c),
		}
	}
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
	bytes.get(at..at + needle.len()) == Some(needle)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
	if from > bytes.len() {
		return None;
	}
	bytes[from..]
		.windows(needle.len())
		.position(|window| window == needle)
		.map(|offset| from + offset)
}

/// Index just after the next `byte` at or after `from`.
fn skip_past(bytes: &[u8], from: usize, byte: u8) -> Result<usize, DomError> {
	bytes
		.get(from..)
		.and_then(|tail| tail.iter().position(|b| *b == byte))
		.map(|offset| from + offset + 1)
		.ok_or_else(|| DomError::Syntax("unexpected end of markup".to_string()))
}

fn skip_whitespace(bytes: &[u8], i: &mut usize) {
	while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
		*i += 1;
	}
}

fn is_tag_char(b: u8) -> bool {
	b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.') || !b.is_ascii()
}

fn is_attribute_name_char(b: u8) -> bool {
	!b.is_ascii_whitespace() && !matches!(b, b'/' | b'>' | b'=' | b'"' | b'\'' | b'<')
}
