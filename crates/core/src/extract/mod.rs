//! Record extraction from authored asset files.
//!
//! Source text is scanned once into a token stream (`Document`); named array
//! blocks are then located and decomposed by a small recursive-descent parser
//! with bracket matching. A block or entry is either delimited exactly or
//! omitted and reported; nothing is guessed.

pub mod scanner;

use serde::Serialize;
use thiserror::Error;

use crate::model::{MuscleEntry, OutputRecord, SourceBlock, View};
use scanner::{Location, ScannedToken, Token};

/// Errors locating a named block. Both are non-fatal to a pipeline run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Block `{name}` not found")]
    BlockNotFound { name: String },

    #[error("Block `{name}` at {location} could not be delimited")]
    UndelimitedBlock { name: String, location: Location },
}

/// An array element that could not be turned into an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Zero-based position of the element inside its block.
    pub index: usize,
    pub location: Location,
    pub reason: String,
}

/// Names of the fields read from each authored entry object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    /// Field holding the region key, e.g. `muscle: MuscleType.CHEST`.
    pub key: String,
    /// Field holding the polygon strings, e.g. `svgPoints: ['...']`.
    pub polygons: String,
}

impl Default for EntryFields {
    fn default() -> Self {
        Self { key: "muscle".to_string(), polygons: "svgPoints".to_string() }
    }
}

/// A block's entries plus the elements that had to be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub block: SourceBlock,
    pub skipped: Vec<SkippedEntry>,
}

/// Records read back from a generated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRead {
    pub records: Vec<OutputRecord>,
    pub skipped: Vec<SkippedEntry>,
}

/// Parsed literal value. Only what entries need is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    /// Dotted identifier path, e.g. `MuscleType.CHEST`.
    Path(Vec<String>),
    Number,
    Array(Vec<Value>),
    Object,
}

impl Value {
    fn describe(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Path(_) => "identifier",
            Value::Number => "number",
            Value::Array(_) => "array",
            Value::Object => "object",
        }
    }
}

type Fields = Vec<(String, Value)>;

/// Object elements of a block, each with its index and location.
type BlockObjects = Vec<(usize, Location, Fields)>;

/// Tokenized source, ready for any number of block lookups.
#[derive(Debug, Clone)]
pub struct Document {
    tokens: Vec<ScannedToken>,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self { tokens: scanner::scan(source) }
    }

    /// Extract the muscle entries of block `name`, tagging them with `view`.
    pub fn extract_block(
        &self,
        name: &str,
        view: View,
        fields: &EntryFields,
    ) -> Result<Extraction, ExtractError> {
        let (objects, mut skipped) = self.block_objects(name)?;
        let mut entries = Vec::new();
        for (index, location, object) in objects {
            match entry_from_fields(object, fields) {
                Ok(entry) => entries.push(entry),
                Err(reason) => skipped.push(SkippedEntry { index, location, reason }),
            }
        }
        skipped.sort_by_key(|s| s.index);
        Ok(Extraction { block: SourceBlock { name: name.to_string(), view, entries }, skipped })
    }

    /// Read `{ id, name, view, points }` records from a generated table block.
    pub fn read_table(&self, name: &str) -> Result<TableRead, ExtractError> {
        let (objects, mut skipped) = self.block_objects(name)?;
        let mut records = Vec::new();
        for (index, location, object) in objects {
            match record_from_fields(object) {
                Ok(record) => records.push(record),
                Err(reason) => skipped.push(SkippedEntry { index, location, reason }),
            }
        }
        skipped.sort_by_key(|s| s.index);
        Ok(TableRead { records, skipped })
    }

    /// Locate block `name` and parse every object element in it.
    fn block_objects(&self, name: &str) -> Result<(BlockObjects, Vec<SkippedEntry>), ExtractError> {
        let Some(open) = self.find_block_start(name) else {
            // A scan cut short by an unterminated string or comment hides
            // everything after it, so the block may exist but be unreadable.
            return Err(match self.scan_stopped_at() {
                Some(location) => ExtractError::UndelimitedBlock { name: name.to_string(), location },
                None => ExtractError::BlockNotFound { name: name.to_string() },
            });
        };
        let close = self.matching_close(open).ok_or_else(|| ExtractError::UndelimitedBlock {
            name: name.to_string(),
            location: self.tokens[open].loc,
        })?;

        let mut objects = Vec::new();
        let mut skipped = Vec::new();
        let mut pos = open + 1;
        let mut index = 0;
        while pos < close {
            let location = self.tokens[pos].loc;
            // The block is balanced, so every element ends at a ',' or at `close`.
            let end = self.element_end(pos, close);
            if self.tokens[pos].tok == Token::Punct('{') {
                let mut parser = Parser { tokens: &self.tokens[..end], pos };
                match parser.object_fields().and_then(|f| parser.expect_end().map(|_| f)) {
                    Ok(fields) => objects.push((index, location, fields)),
                    Err(reason) => skipped.push(SkippedEntry { index, location, reason }),
                }
            } else if end > pos {
                // `end == pos` is an elided element such as `[a, , b]`.
                skipped.push(SkippedEntry {
                    index,
                    location,
                    reason: "element is not an object literal".to_string(),
                });
            }
            index += 1;
            pos = end + 1;
        }
        Ok((objects, skipped))
    }

    /// Find the '[' opening the initializer of a declaration named `name`.
    ///
    /// Accepts `name = [` and `name: Some.Type[] = [` where `name` is being
    /// declared (after `const`/`let`/`var`) or starts a statement. Mentions
    /// such as `typeof name` or `x.name` are passed over.
    fn find_block_start(&self, name: &str) -> Option<usize> {
        self.tokens.iter().enumerate().find_map(|(i, scanned)| match &scanned.tok {
            Token::Identifier(id) if id == name && self.starts_declaration(i) => {
                self.initializer_bracket(i + 1)
            }
            _ => None,
        })
    }

    fn starts_declaration(&self, pos: usize) -> bool {
        let Some(prev) = pos.checked_sub(1) else {
            return true;
        };
        match &self.tokens[prev].tok {
            Token::Identifier(word) => matches!(word.as_str(), "const" | "let" | "var" | "export"),
            Token::Punct(';' | '}') => true,
            _ => false,
        }
    }

    /// Where the scan gave up, if an unterminated string or comment ended it.
    fn scan_stopped_at(&self) -> Option<Location> {
        self.tokens.iter().find_map(|scanned| match scanned.tok {
            Token::Invalid(_) => Some(scanned.loc),
            _ => None,
        })
    }

    fn initializer_bracket(&self, mut pos: usize) -> Option<usize> {
        if let Some(Token::Punct(':')) = self.tokens.get(pos).map(|t| &t.tok) {
            pos += 1;
            // Type annotation: identifiers, generics, array and union markers.
            while let Some(tok) = self.tokens.get(pos).map(|t| &t.tok) {
                match tok {
                    Token::Identifier(_) => {}
                    Token::Punct('.' | '[' | ']' | '<' | '>' | ',' | '|') => {}
                    _ => break,
                }
                pos += 1;
            }
        }
        match (self.tokens.get(pos).map(|t| &t.tok), self.tokens.get(pos + 1).map(|t| &t.tok)) {
            (Some(Token::Punct('=')), Some(Token::Punct('['))) => Some(pos + 1),
            _ => None,
        }
    }

    /// Index of the bracket closing the one at `open`, if the brackets in
    /// between balance before the scan ends.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut stack = Vec::new();
        for (offset, scanned) in self.tokens[open..].iter().enumerate() {
            match scanned.tok {
                Token::Punct(ch @ ('[' | '{' | '(')) => stack.push(ch),
                Token::Punct(ch @ (']' | '}' | ')')) => {
                    let expected = match stack.pop()? {
                        '[' => ']',
                        '{' => '}',
                        _ => ')',
                    };
                    if ch != expected {
                        return None;
                    }
                    if stack.is_empty() {
                        return Some(open + offset);
                    }
                }
                Token::Invalid(_) | Token::EndOfFile => return None,
                _ => {}
            }
        }
        None
    }

    /// Position of the ',' ending the element starting at `pos`, or `close`.
    fn element_end(&self, mut pos: usize, close: usize) -> usize {
        let mut depth = 0usize;
        while pos < close {
            match self.tokens[pos].tok {
                Token::Punct('[' | '{' | '(') => depth += 1,
                Token::Punct(']' | '}' | ')') => depth = depth.saturating_sub(1),
                Token::Punct(',') if depth == 0 => return pos,
                _ => {}
            }
            pos += 1;
        }
        close
    }
}

/// Recursive-descent parser over one delimited element.
struct Parser<'a> {
    tokens: &'a [ScannedToken],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|t| &t.tok)
    }

    fn increment(&mut self) {
        self.pos += 1;
    }

    fn consume(&mut self, ch: char) -> Result<(), String> {
        match self.current() {
            Some(Token::Punct(found)) if *found == ch => {
                self.increment();
                Ok(())
            }
            other => Err(format!("expected '{}', found {}", ch, describe(other))),
        }
    }

    fn expect_end(&self) -> Result<(), String> {
        match self.current() {
            None => Ok(()),
            other => Err(format!("unexpected {} after object", describe(other))),
        }
    }

    fn object_fields(&mut self) -> Result<Fields, String> {
        self.consume('{')?;
        let mut fields = Vec::new();
        loop {
            let name = match self.current() {
                Some(Token::Punct('}')) => {
                    self.increment();
                    return Ok(fields);
                }
                Some(Token::Identifier(n)) | Some(Token::QuotedString(n)) => n.clone(),
                other => return Err(format!("expected field name, found {}", describe(other))),
            };
            self.increment();
            self.consume(':')?;
            let value = self.value()?;
            fields.push((name, value));
            match self.current() {
                Some(Token::Punct(',')) => self.increment(),
                Some(Token::Punct('}')) => {}
                other => {
                    return Err(format!("expected ',' or '}}', found {}", describe(other)));
                }
            }
        }
    }

    fn value(&mut self) -> Result<Value, String> {
        match self.current() {
            Some(Token::QuotedString(s)) => {
                self.increment();
                Ok(Value::Str(s.clone()))
            }
            Some(Token::Number(_)) => {
                self.increment();
                Ok(Value::Number)
            }
            Some(Token::Punct('-')) => {
                self.increment();
                match self.current() {
                    Some(Token::Number(_)) => {
                        self.increment();
                        Ok(Value::Number)
                    }
                    other => Err(format!("expected number after '-', found {}", describe(other))),
                }
            }
            Some(Token::Identifier(first)) => {
                self.increment();
                let mut path = vec![first.clone()];
                while let Some(Token::Punct('.')) = self.current() {
                    self.increment();
                    match self.current() {
                        Some(Token::Identifier(next)) => {
                            path.push(next.clone());
                            self.increment();
                        }
                        other => {
                            return Err(format!(
                                "expected identifier after '.', found {}",
                                describe(other)
                            ))
                        }
                    }
                }
                Ok(Value::Path(path))
            }
            Some(Token::Punct('[')) => self.array(),
            Some(Token::Punct('{')) => {
                self.object_fields()?;
                Ok(Value::Object)
            }
            other => Err(format!("expected value, found {}", describe(other))),
        }
    }

    fn array(&mut self) -> Result<Value, String> {
        self.consume('[')?;
        let mut items = Vec::new();
        loop {
            if let Some(Token::Punct(']')) = self.current() {
                self.increment();
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            match self.current() {
                Some(Token::Punct(',')) => self.increment(),
                Some(Token::Punct(']')) => {}
                other => return Err(format!("expected ',' or ']', found {}", describe(other))),
            }
        }
    }
}

fn describe(tok: Option<&Token>) -> String {
    match tok {
        None | Some(Token::EndOfFile) => "end of element".to_string(),
        Some(Token::Identifier(name)) => format!("identifier `{name}`"),
        Some(Token::QuotedString(_)) => "string".to_string(),
        Some(Token::Number(n)) => format!("number `{n}`"),
        Some(Token::Punct(ch)) => format!("'{ch}'"),
        Some(Token::Invalid(kind)) => kind.to_string(),
    }
}

fn take_field(fields: &mut Fields, name: &str) -> Option<Value> {
    let idx = fields.iter().position(|(n, _)| n == name)?;
    Some(fields.remove(idx).1)
}

fn entry_from_fields(mut fields: Fields, names: &EntryFields) -> Result<MuscleEntry, String> {
    let key = match take_field(&mut fields, &names.key) {
        Some(Value::Path(path)) => path.last().cloned().unwrap_or_default(),
        Some(Value::Str(s)) => s,
        Some(other) => {
            return Err(format!("field `{}` is a {}, not a key", names.key, other.describe()))
        }
        None => return Err(format!("missing `{}` field", names.key)),
    };
    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return Err(format!("field `{}` is empty", names.key));
    }

    let polygons = match take_field(&mut fields, &names.polygons) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Str(s) => Ok(s),
                other => Err(format!(
                    "field `{}` holds a {}, expected strings",
                    names.polygons,
                    other.describe()
                )),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(format!("field `{}` is a {}, not an array", names.polygons, other.describe()))
        }
        None => return Err(format!("missing `{}` field", names.polygons)),
    };

    Ok(MuscleEntry::new(key, polygons))
}

fn record_from_fields(mut fields: Fields) -> Result<OutputRecord, String> {
    let mut string_field = |name: &str| match take_field(&mut fields, name) {
        Some(Value::Str(s)) => Ok(s),
        Some(other) => Err(format!("field `{}` is a {}, not a string", name, other.describe())),
        None => Err(format!("missing `{}` field", name)),
    };
    let id = string_field("id")?;
    let name = string_field("name")?;
    let view = string_field("view")?.parse::<View>()?;
    let points = string_field("points")?;
    Ok(OutputRecord { id, name, view, points })
}
