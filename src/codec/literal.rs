//! Tree ↔ literal text
//!
//! The canonical form is a nested mapping: `{"root": {"a.txt": {"binary": false, "content":
//! "hello"}}}`. Files are the two-key `binary`/`content` records; every other mapping is a
//! directory.
//!
//! Parsing goes through a hand-written recursive-descent parser that understands strings,
//! booleans, mappings and sequences and nothing else. There is no evaluation step, so a hostile
//! literal can at worst fail to parse.

use crate::error::{ParseError, ParseErrorKind};
use crate::tree::node::{is_valid_name, DirectoryNode, FileNode, Node};
use serde::{Deserialize, Serialize};

pub const BINARY_KEY: &str = "binary";
pub const CONTENT_KEY: &str = "content";

/// Parser limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum bracket nesting accepted before giving up
    #[serde(default = "default_max_nesting")]
    pub max_nesting: usize,
}

fn default_max_nesting() -> usize {
    512
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting: default_max_nesting(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Render a tree as its canonical literal
pub fn serialize(node: &Node) -> String {
    let mut out = String::new();
    out.push('{');
    write_string(&mut out, node.name());
    out.push_str(": ");
    write_node(&mut out, node);
    out.push('}');
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::File(file) => {
            out.push('{');
            write_string(out, BINARY_KEY);
            out.push_str(if file.is_binary() { ": true, " } else { ": false, " });
            write_string(out, CONTENT_KEY);
            out.push_str(": ");
            write_string(out, file.content());
            out.push('}');
        }
        Node::Directory(dir) => {
            out.push('{');
            for (i, child) in dir.children().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_string(out, child.name());
                out.push_str(": ");
                write_node(out, child);
            }
            out.push('}');
        }
    }
}

/// Quote a string. NUL is written as-is: it is reserved for padding and never escaped.
fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a literal with the default limits
pub fn parse(text: &str) -> Result<Node, ParseError> {
    LiteralParser::new(&ParserConfig::default()).parse(text)
}

/// Restricted-grammar parser for tree literals
pub struct LiteralParser {
    max_nesting: usize,
}

impl LiteralParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            max_nesting: config.max_nesting,
        }
    }

    /// Parse `text` into a tree
    ///
    /// The top level must be a single-entry mapping from the root name to its node.
    pub fn parse(&self, text: &str) -> Result<Node, ParseError> {
        let mut cursor = Cursor {
            chars: text.chars().collect(),
            index: 0,
            max_nesting: self.max_nesting,
        };
        let value = cursor.parse_value(0)?;
        cursor.skip_whitespace();
        if !cursor.is_end() {
            return Err(ParseError::new(cursor.index, ParseErrorKind::TrailingInput));
        }
        root_from_value(value)
    }
}

/// A parsed value and the char offset it started at
#[derive(Debug)]
struct Spanned {
    position: usize,
    value: Value,
}

#[derive(Debug)]
enum Value {
    Str(String),
    Bool(bool),
    Map(Vec<(String, Spanned)>),
    Seq(Vec<Spanned>),
}

impl Value {
    fn describe(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Map(_) => "mapping",
            Value::Seq(_) => "sequence",
        }
    }
}

struct Cursor {
    chars: Vec<char>,
    index: usize,
    max_nesting: usize,
}

impl Cursor {
    fn parse_value(&mut self, depth: usize) -> Result<Spanned, ParseError> {
        self.skip_whitespace();
        let position = self.index;
        let value = match self.peek() {
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            Some('{') => Value::Map(self.parse_map(depth + 1)?),
            Some('[') => Value::Seq(self.parse_seq(']', depth + 1)?),
            Some('(') => Value::Seq(self.parse_seq(')', depth + 1)?),
            Some('"') | Some('\'') => Value::Str(self.parse_string()?),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => Value::Bool(self.parse_keyword()?),
            Some(c) => return Err(self.error(ParseErrorKind::UnexpectedChar(c))),
        };
        Ok(Spanned { position, value })
    }

    fn parse_map(&mut self, depth: usize) -> Result<Vec<(String, Spanned)>, ParseError> {
        self.check_nesting(depth)?;
        self.expect('{')?;
        let mut entries = Vec::new();

        loop {
            self.skip_whitespace();
            if self.consume('}') {
                return Ok(entries);
            }

            match self.peek() {
                Some('"') | Some('\'') => {}
                Some(c) => return Err(self.error(ParseErrorKind::UnexpectedChar(c))),
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value(depth)?;
            entries.push((key, value));

            self.skip_whitespace();
            if self.consume(',') {
                continue;
            }
            self.expect('}')?;
            return Ok(entries);
        }
    }

    fn parse_seq(&mut self, close: char, depth: usize) -> Result<Vec<Spanned>, ParseError> {
        self.check_nesting(depth)?;
        self.index += 1;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.consume(close) {
                return Ok(items);
            }
            items.push(self.parse_value(depth)?);

            self.skip_whitespace();
            if self.consume(',') {
                continue;
            }
            self.expect(close)?;
            return Ok(items);
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.index;
        let quote = match self.next() {
            Some(q @ ('"' | '\'')) => q,
            Some(c) => return Err(ParseError::new(start, ParseErrorKind::UnexpectedChar(c))),
            None => return Err(ParseError::new(start, ParseErrorKind::UnexpectedEnd)),
        };

        let mut value = String::new();
        loop {
            match self.next() {
                None => return Err(ParseError::new(start, ParseErrorKind::UnterminatedString)),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => value.push(self.parse_escape()?),
                Some(c) => value.push(c),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let start = self.index - 1;
        let escaped = match self.next() {
            Some('\\') => '\\',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('0') => '\0',
            Some('a') => '\u{07}',
            Some('b') => '\u{08}',
            Some('f') => '\u{0c}',
            Some('v') => '\u{0b}',
            Some('x') => self.parse_hex_escape(start, 2)?,
            Some('u') => self.parse_hex_escape(start, 4)?,
            Some('U') => self.parse_hex_escape(start, 8)?,
            Some(c) => {
                return Err(ParseError::new(
                    start,
                    ParseErrorKind::InvalidEscape(format!("\\{}", c)),
                ))
            }
            None => return Err(ParseError::new(start, ParseErrorKind::UnterminatedString)),
        };
        Ok(escaped)
    }

    fn parse_hex_escape(&mut self, start: usize, digits: usize) -> Result<char, ParseError> {
        let end = (self.index + digits).min(self.chars.len());
        let hex: String = self.chars[self.index..end].iter().collect();
        let invalid = || ParseError::new(start, ParseErrorKind::InvalidEscape(format!("\\{}", hex)));

        if hex.chars().count() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        self.index = end;
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(invalid)
    }

    /// Booleans are the only bare words in the grammar
    fn parse_keyword(&mut self) -> Result<bool, ParseError> {
        let start = self.index;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.index += 1;
        }
        let word: String = self.chars[start..self.index].iter().collect();
        match word.as_str() {
            "true" | "True" => Ok(true),
            "false" | "False" => Ok(false),
            _ => Err(ParseError::new(start, ParseErrorKind::UnexpectedToken(word))),
        }
    }

    fn check_nesting(&self, depth: usize) -> Result<(), ParseError> {
        if depth > self.max_nesting {
            return Err(self.error(ParseErrorKind::NestingTooDeep(self.max_nesting)));
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.index += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.index += 1;
                Ok(())
            }
            Some(c) => Err(self.error(ParseErrorKind::UnexpectedChar(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    fn consume(&mut self, expected: char) -> bool {
        self.peek() == Some(expected) && {
            self.index += 1;
            true
        }
    }

    fn is_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.index, kind)
    }
}

// ---------------------------------------------------------------------------
// Value → tree
// ---------------------------------------------------------------------------

fn root_from_value(root: Spanned) -> Result<Node, ParseError> {
    match root.value {
        Value::Map(mut entries) if entries.len() == 1 => {
            let (name, value) = entries.remove(0);
            node_from_value(name, value)
        }
        Value::Map(entries) => Err(ParseError::new(
            root.position,
            ParseErrorKind::Schema(format!(
                "top level must map exactly one root name, found {}",
                entries.len()
            )),
        )),
        other => Err(ParseError::new(
            root.position,
            ParseErrorKind::Schema(format!(
                "top level must be a mapping, found {}",
                other.describe()
            )),
        )),
    }
}

fn node_from_value(name: String, spanned: Spanned) -> Result<Node, ParseError> {
    let position = spanned.position;
    if !is_valid_name(&name) {
        return Err(ParseError::new(position, ParseErrorKind::InvalidName(name)));
    }

    let entries = match spanned.value {
        Value::Map(entries) => entries,
        other => {
            return Err(ParseError::new(
                position,
                ParseErrorKind::Schema(format!(
                    "entry {:?} must be a mapping, found {}",
                    name,
                    other.describe()
                )),
            ))
        }
    };

    if let Some((is_binary, content)) = file_record(&entries) {
        let content = content.to_string();
        let file = if is_binary {
            FileNode::from_base64(name.clone(), content)
                .map_err(|_| ParseError::new(position, ParseErrorKind::InvalidBase64(name)))?
        } else {
            FileNode::text(name, content)
        };
        return Ok(Node::File(file));
    }

    let mut dir = DirectoryNode::new(name);
    for (child_name, child_value) in entries {
        let child_position = child_value.position;
        let child = node_from_value(child_name, child_value)?;
        dir.insert(child).map_err(|dup| {
            ParseError::new(
                child_position,
                ParseErrorKind::DuplicateKey(dup.name().to_string()),
            )
        })?;
    }
    Ok(Node::Directory(dir))
}

/// Recognize a `{binary: bool, content: string}` record
fn file_record(entries: &[(String, Spanned)]) -> Option<(bool, &str)> {
    if entries.len() != 2 {
        return None;
    }
    let mut is_binary = None;
    let mut content = None;
    for (key, spanned) in entries {
        match (key.as_str(), &spanned.value) {
            (BINARY_KEY, Value::Bool(b)) => is_binary = Some(*b),
            (CONTENT_KEY, Value::Str(s)) => content = Some(s.as_str()),
            _ => return None,
        }
    }
    Some((is_binary?, content?))
}
