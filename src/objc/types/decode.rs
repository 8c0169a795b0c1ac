//! Recursive-descent decoder for `@encode`-style strings.
//!
//! Every production takes a [`Cursor`] and returns the node it recognised together with the cursor
//! positioned after it. Field lists, block arguments, and nested aggregates have no separators, so
//! the end of one production is the only way to find the start of the next.

use smallvec::SmallVec;
use tracing::debug;

use super::cursor::{Cursor, Decoded};
use super::error::{DecodeError, DecodeResult};
use super::modifier::Modifier;
use super::node::{Aggregate, BlockArguments, BlockSignature, Field, TypeNode};
use super::options::DecodeOptions;
use super::primitive::Primitive;

#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

/// Decodes `input` with default options. See [`Decoder::decode`].
pub fn decode(input: &str) -> Option<TypeNode> {
    Decoder::default().decode(input)
}

/// Decodes `input` strictly. See [`Decoder::try_decode`].
pub fn try_decode(input: &str) -> DecodeResult<TypeNode> {
    Decoder::default().try_decode(input)
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Best-effort decode of the first type in `input`.
    ///
    /// Returns `None` only for empty input or a leading byte that starts no production. When a
    /// production starts but cannot finish, the whole input is kept as [`TypeNode::Other`].
    /// Anything after the first complete type is ignored; use [`Decoder::decode_prefix`] to see it.
    pub fn decode(&self, input: &str) -> Option<TypeNode> {
        let cursor = Cursor::new(input);
        if cursor.is_empty() {
            return None;
        }
        match self.decode_type(cursor) {
            Ok(decoded) => {
                if let Some(rest) = decoded.trailing() {
                    debug!(input, rest, "ignoring input after the first type");
                }
                Some(decoded.node)
            }
            Err(DecodeError::UnknownSymbol { offset: 0, .. }) => None,
            Err(err) => {
                debug!(input, %err, "keeping undecodable encoding as a raw fragment");
                Some(TypeNode::Other(input.to_owned()))
            }
        }
    }

    /// Decodes one type from the front of `input` and reports what is left over.
    pub fn decode_prefix<'a>(&self, input: &'a str) -> Option<Decoded<'a>> {
        self.decode_type(Cursor::new(input)).ok()
    }

    /// Decodes exactly one type; every sub-decode must succeed and no input may remain.
    pub fn try_decode(&self, input: &str) -> DecodeResult<TypeNode> {
        let cursor = Cursor::new(input);
        if cursor.is_empty() {
            return Err(DecodeError::Empty);
        }
        let strict = Decoder::new(self.options.with_strict(true));
        let decoded = strict.decode_type(cursor)?;
        if !decoded.rest.is_empty() {
            return Err(DecodeError::TrailingInput {
                offset: decoded.rest.offset(),
                rest: decoded.rest.rest().to_owned(),
            });
        }
        Ok(decoded.node)
    }

    /// Decodes a packed run of types such as `v@:` until the input is exhausted.
    pub fn decode_sequence(&self, input: &str) -> DecodeResult<Vec<TypeNode>> {
        let mut cursor = Cursor::new(input);
        let mut nodes = Vec::new();
        while !cursor.is_empty() {
            let decoded = self.decode_type(cursor)?;
            nodes.push(decoded.node);
            cursor = decoded.rest;
        }
        Ok(nodes)
    }

    /// Single production dispatch on the leading byte.
    pub fn decode_type<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<Decoded<'a>> {
        let Some(byte) = cursor.peek() else {
            return Err(DecodeError::Malformed {
                offset: cursor.offset(),
                production: "type",
            });
        };
        match byte {
            b'@' => match cursor.peek_at(1) {
                Some(b'"') => self.decode_named_object(cursor),
                Some(b'?') => self.decode_block(cursor),
                _ => Ok(Decoded::new(TypeNode::Object(None), cursor.advance(1))),
            },
            b'^' if cursor.peek_at(1) == Some(b'?') => {
                Ok(Decoded::new(TypeNode::FunctionPointer, cursor.advance(2)))
            }
            b'^' => {
                let pointee = self.decode_type(cursor.advance(1))?;
                Ok(Decoded::new(TypeNode::pointer(pointee.node), pointee.rest))
            }
            b'b' => self.decode_bitfield(cursor),
            b'[' => self.decode_array(cursor),
            b'{' => self.decode_aggregate(cursor, b'{', b'}'),
            b'(' => self.decode_aggregate(cursor, b'(', b')'),
            _ => {
                if let Some(modifier) = Modifier::from_code(byte) {
                    let inner = self.decode_type(cursor.advance(1))?;
                    return Ok(Decoded::new(
                        TypeNode::modified(modifier, inner.node),
                        inner.rest,
                    ));
                }
                if let Some(primitive) = Primitive::from_code(byte) {
                    return Ok(Decoded::new(
                        TypeNode::Primitive(primitive),
                        cursor.advance(1),
                    ));
                }
                Err(DecodeError::UnknownSymbol {
                    offset: cursor.offset(),
                    symbol: char::from(byte),
                })
            }
        }
    }

    fn decode_named_object<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<Decoded<'a>> {
        let name_start = cursor.advance(2);
        match name_start.find_byte(b'"') {
            Some(close) => {
                let name = name_start.until(close).rest().to_owned();
                Ok(Decoded::new(TypeNode::Object(Some(name)), cursor.jump_to(close + 1)))
            }
            None if self.options.strict => Err(DecodeError::Unterminated {
                offset: cursor.offset() + 1,
                open: '"',
            }),
            None => Ok(Decoded::new(TypeNode::Object(None), cursor.advance(1))),
        }
    }

    fn decode_block<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<Decoded<'a>> {
        let after = cursor.advance(2);
        if after.peek() != Some(b'<') {
            return Ok(Decoded::new(TypeNode::Block(None), after));
        }
        let Some(close) = after.find_closing(b'<', b'>') else {
            return Err(DecodeError::Unterminated {
                offset: after.offset(),
                open: '<',
            });
        };
        let rest = after.jump_to(close + 1);
        match self.decode_block_signature(after.advance(1).until(close)) {
            Ok(signature) => Ok(Decoded::new(
                TypeNode::Block(Some(Box::new(signature))),
                rest,
            )),
            Err(err) if self.options.tolerates_block_damage() => {
                debug!(%err, "treating block with unreadable signature as opaque");
                Ok(Decoded::new(TypeNode::Block(None), rest))
            }
            Err(err) => Err(err),
        }
    }

    /// `<return>@?<arg><arg>...`. A bare `@` is accepted in place of the `@?` self marker.
    fn decode_block_signature(&self, inner: Cursor<'_>) -> DecodeResult<BlockSignature> {
        let returns = self.decode_type(inner)?;
        let marker = returns.rest;
        let mut cursor = if marker.starts_with(b"@?") {
            marker.advance(2)
        } else if marker.peek() == Some(b'@') && marker.peek_at(1) != Some(b'"') {
            marker.advance(1)
        } else {
            return Err(DecodeError::MissingBlockMarker {
                offset: marker.offset(),
            });
        };
        let mut arguments = BlockArguments::new();
        while !cursor.is_empty() {
            let argument = self.decode_type(cursor)?;
            arguments.push(argument.node);
            cursor = argument.rest;
        }
        Ok(BlockSignature {
            returns: returns.node,
            arguments,
        })
    }

    fn decode_bitfield<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<Decoded<'a>> {
        let Some((digits, rest)) = cursor.advance(1).take_digits(true) else {
            return Err(DecodeError::MissingDigits {
                offset: cursor.offset(),
                production: "bitfield",
            });
        };
        let width = digits.parse::<i32>().map_err(|_| DecodeError::Malformed {
            offset: cursor.offset(),
            production: "bitfield",
        })?;
        Ok(Decoded::new(TypeNode::BitField(width), rest))
    }

    fn decode_array<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<Decoded<'a>> {
        let Some(close) = cursor.find_closing(b'[', b']') else {
            return Err(DecodeError::Unterminated {
                offset: cursor.offset(),
                open: '[',
            });
        };
        let inner = cursor.advance(1).until(close);
        let (size, element_start) = match inner.take_digits(false) {
            Some((digits, rest)) => {
                let size = digits.parse::<usize>().map_err(|_| DecodeError::Malformed {
                    offset: inner.offset(),
                    production: "array size",
                })?;
                (Some(size), rest)
            }
            None => (None, inner),
        };
        let element = self.decode_type(element_start)?;
        if let Some(extra) = element.trailing() {
            if self.options.strict {
                return Err(DecodeError::Malformed {
                    offset: element.rest.offset(),
                    production: "array",
                });
            }
            debug!(extra, "ignoring leftover array content");
        }
        Ok(Decoded::new(
            TypeNode::array(element.node, size),
            cursor.jump_to(close + 1),
        ))
    }

    fn decode_aggregate<'a>(
        &self,
        cursor: Cursor<'a>,
        open: u8,
        close: u8,
    ) -> DecodeResult<Decoded<'a>> {
        let Some(close_at) = cursor.find_closing(open, close) else {
            return Err(DecodeError::Unterminated {
                offset: cursor.offset(),
                open: char::from(open),
            });
        };
        let inner = cursor.advance(1).until(close_at);
        let aggregate = match inner.find_top_level(b'=') {
            None => Aggregate::new(aggregate_name(inner)?, None),
            Some(equals) => {
                let name = aggregate_name(inner.until(equals))?;
                let fields = self.decode_fields(inner.jump_to(equals + 1))?;
                Aggregate::new(name, Some(fields))
            }
        };
        let node = if open == b'(' {
            TypeNode::Union(aggregate)
        } else {
            TypeNode::Struct(aggregate)
        };
        Ok(Decoded::new(node, cursor.jump_to(close_at + 1)))
    }

    fn decode_fields(&self, mut cursor: Cursor<'_>) -> DecodeResult<Vec<Field>> {
        let named = cursor.peek() == Some(b'"');
        let mut fields = Vec::new();
        while !cursor.is_empty() {
            match self.decode_field(cursor, named) {
                Ok((field, rest)) => {
                    fields.push(field);
                    cursor = rest;
                }
                Err(err) if !self.options.strict => {
                    debug!(%err, kept = fields.len(), "field list cut short");
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(fields)
    }

    fn decode_field<'a>(&self, cursor: Cursor<'a>, named: bool) -> DecodeResult<(Field, Cursor<'a>)> {
        if cursor.peek() != Some(b'"') {
            let decoded = self.decode_field_type(cursor, named)?;
            return Ok((Field::anonymous(decoded.node), decoded.rest));
        }
        let name_start = cursor.advance(1);
        let Some(close) = name_start.find_byte(b'"') else {
            return Err(DecodeError::Unterminated {
                offset: cursor.offset(),
                open: '"',
            });
        };
        let name = name_start.until(close).rest().to_owned();
        let decoded = self.decode_field_type(cursor.jump_to(close + 1), named)?;
        Ok((Field::named(name, decoded.node), decoded.rest))
    }

    /// In named lists `@"X"` is ambiguous: `X` is either the class of this field or the name of
    /// the next one. It is a class name only when another name or the end of the list follows.
    fn decode_field_type<'a>(&self, cursor: Cursor<'a>, named: bool) -> DecodeResult<Decoded<'a>> {
        if named && self.options.field_class_names && cursor.starts_with(b"@\"") {
            let quote = cursor.advance(1);
            if let Some(close) = quote.advance(1).find_byte(b'"') {
                let after = quote.jump_to(close + 1);
                if !after.is_empty() && after.peek() != Some(b'"') {
                    return Ok(Decoded::new(TypeNode::Object(None), quote));
                }
            }
        }
        self.decode_type(cursor)
    }
}

/// `?` is the anonymous tag. Template names such as `vector<int>` may nest brackets, but they must
/// balance.
fn aggregate_name(name: Cursor<'_>) -> DecodeResult<Option<String>> {
    let raw = name.rest();
    if !brackets_balance(raw) {
        debug!(name = raw, offset = name.offset(), "unbalanced aggregate name");
        return Err(DecodeError::Malformed {
            offset: name.offset(),
            production: "aggregate name",
        });
    }
    Ok(if raw == "?" { None } else { Some(raw.to_owned()) })
}

fn brackets_balance(raw: &str) -> bool {
    let mut open: SmallVec<[u8; 8]> = SmallVec::new();
    for byte in raw.bytes() {
        let expected = match byte {
            b'{' | b'(' | b'[' | b'<' => {
                open.push(byte);
                continue;
            }
            b'}' => b'{',
            b')' => b'(',
            b']' => b'[',
            b'>' => b'<',
            _ => continue,
        };
        if open.pop() != Some(expected) {
            return false;
        }
    }
    open.is_empty()
}
