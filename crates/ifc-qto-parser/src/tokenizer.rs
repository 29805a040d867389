// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP record tokenizer using nom combinators
//!
//! Parses single instance records (`#12=IFCWALL(...)`) and header records
//! (`FILE_SCHEMA(('IFC4'))`) into decoded attribute values.

use ifc_qto_model::{AttributeValue, DecodedEntity, EntityId, IfcType, ParseError};
use memchr::memchr2;
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{opt, recognize},
    error::ErrorKind,
    multi::separated_list0,
    sequence::{delimited, pair},
    IResult, Parser,
};

/// Raw token from a STEP record (before conversion to AttributeValue)
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// Entity reference (#123)
    EntityRef(u32),
    /// String value, still escaped ('it''s')
    String(&'a str),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// Enumeration (.VALUE.)
    Enum(&'a str),
    /// List of tokens
    List(Vec<Token<'a>>),
    /// Typed value like IFCVOLUMEMEASURE(2.5)
    TypedValue(&'a str, Vec<Token<'a>>),
    /// Null value ($)
    Null,
    /// Derived value (*)
    Derived,
}

impl<'a> Token<'a> {
    /// Convert token to owned AttributeValue, decoding string escapes
    pub fn to_attribute_value(&self) -> AttributeValue {
        match self {
            Token::EntityRef(id) => AttributeValue::EntityRef(EntityId(*id)),
            Token::String(s) => AttributeValue::String(decode_step_string(s)),
            Token::Integer(i) => AttributeValue::Integer(*i),
            Token::Float(f) => AttributeValue::Float(*f),
            Token::Enum(s) => AttributeValue::Enum((*s).to_string()),
            Token::List(items) => {
                AttributeValue::List(items.iter().map(|t| t.to_attribute_value()).collect())
            }
            Token::TypedValue(name, args) => AttributeValue::TypedValue(
                (*name).to_string(),
                args.iter().map(|t| t.to_attribute_value()).collect(),
            ),
            Token::Null => AttributeValue::Null,
            Token::Derived => AttributeValue::Derived,
        }
    }
}

/// One instance record from the DATA section
#[derive(Clone, Debug)]
pub enum Record {
    /// `#id=TYPE(...)`
    Simple(DecodedEntity),
    /// `#id=(TYPEA(...) TYPEB(...))`, not decoded
    Complex(EntityId),
}

// ============================================================================
// Parsing Primitives
// ============================================================================

fn ws(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

fn entity_ref(input: &str) -> IResult<&str, Token> {
    let (rest, _) = char('#')(input)?;
    let (rest, digits) = take_while1(|c: char| c.is_ascii_digit())(rest)?;
    let id = digits
        .parse::<u32>()
        .map_err(|_| nom::Err::Failure(nom::error::Error::new(input, ErrorKind::Digit)))?;
    Ok((rest, Token::EntityRef(id)))
}

/// Parse a STEP string ('text' with '' for escaped quotes)
fn step_string(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('\'')(input)?;

    let bytes = input.as_bytes();
    let mut end = 0;
    loop {
        match bytes.get(end) {
            Some(b'\'') if bytes.get(end + 1) == Some(&b'\'') => end += 2,
            Some(b'\'') => break,
            Some(_) => end += 1,
            None => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    ErrorKind::Char,
                )))
            }
        }
    }

    Ok((&input[end + 1..], Token::String(&input[..end])))
}

fn number(input: &str) -> IResult<&str, Token> {
    let (rest, num_str) = recognize((
        opt(alt((char('+'), char('-')))),
        take_while1(|c: char| c.is_ascii_digit()),
        opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit()))),
        opt((
            alt((char('e'), char('E'))),
            opt(alt((char('+'), char('-')))),
            take_while1(|c: char| c.is_ascii_digit()),
        )),
    ))
    .parse(input)?;

    let invalid = |_| nom::Err::Failure(nom::error::Error::new(input, ErrorKind::Float));

    if num_str.contains(['.', 'e', 'E']) {
        let f: f64 = lexical_core::parse(num_str.as_bytes()).map_err(invalid)?;
        Ok((rest, Token::Float(f)))
    } else {
        let i: i64 = lexical_core::parse(num_str.as_bytes()).map_err(invalid)?;
        Ok((rest, Token::Integer(i)))
    }
}

fn enumeration(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('.')(input)?;
    let (input, name) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    let (input, _) = char('.')(input)?;
    Ok((input, Token::Enum(name)))
}

fn null_value(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('$')(input)?;
    Ok((input, Token::Null))
}

fn derived_value(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('*')(input)?;
    Ok((input, Token::Derived))
}

fn list(input: &str) -> IResult<&str, Token> {
    let (input, items) = attribute_list(input)?;
    Ok((input, Token::List(items)))
}

fn keyword(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Parse a typed value like IFCLABEL('text')
fn typed_value(input: &str) -> IResult<&str, Token> {
    let (input, type_name) = keyword(input)?;
    let (input, _) = ws(input)?;
    let (input, args) = attribute_list(input)?;
    Ok((input, Token::TypedValue(type_name, args)))
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        entity_ref,
        step_string,
        null_value,
        derived_value,
        enumeration,
        number,
        list,
        typed_value,
    ))
    .parse(input)
}

fn attribute_list(input: &str) -> IResult<&str, Vec<Token>> {
    delimited(
        pair(char('('), ws),
        separated_list0((ws, char(','), ws), token),
        pair(ws, char(')')),
    )
    .parse(input)
}

// ============================================================================
// Record Parsing
// ============================================================================

/// Parse one DATA record, without its terminating `;`
///
/// Format: `#123=IFCWALL(attr1,attr2,...)`
pub fn parse_record(input: &str) -> Result<Record, ParseError> {
    let input = input.trim();

    let (input, _) = char::<&str, nom::error::Error<&str>>('#')
        .parse(input)
        .map_err(|_| ParseError::format("expected '#' at start of instance"))?;

    let (input, id_str) =
        take_while1::<_, &str, nom::error::Error<&str>>(|c: char| c.is_ascii_digit())
            .parse(input)
            .map_err(|_| ParseError::format("expected instance id"))?;

    let id = id_str
        .parse::<u32>()
        .map(EntityId)
        .map_err(|_| ParseError::format(format!("instance id out of range: #{id_str}")))?;

    let (input, _) = (ws, char('='), ws)
        .parse(input)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| {
            ParseError::entity_parse(id, "expected '=' after instance id")
        })?;

    if input.starts_with('(') {
        return Ok(Record::Complex(id));
    }

    let (input, type_name) =
        keyword(input).map_err(|_| ParseError::entity_parse(id, "expected type name"))?;

    let (input, _) = ws(input).unwrap_or((input, ()));

    let (rest, tokens) = attribute_list(input)
        .map_err(|e| ParseError::entity_parse(id, format!("malformed attributes: {e}")))?;

    if !rest.trim().is_empty() {
        return Err(ParseError::entity_parse(
            id,
            format!("unexpected trailing input: {}", rest.trim()),
        ));
    }

    Ok(Record::Simple(DecodedEntity {
        id,
        ifc_type: IfcType::parse(type_name),
        attributes: tokens.iter().map(|t| t.to_attribute_value()).collect(),
    }))
}

/// Parse a header record such as `FILE_NAME('a.ifc',...)`
///
/// Returns the keyword and its decoded arguments.
pub fn parse_header_record(input: &str) -> Result<(String, Vec<AttributeValue>), String> {
    match typed_value(input.trim()) {
        Ok((_, Token::TypedValue(name, args))) => Ok((
            name.to_ascii_uppercase(),
            args.iter().map(|t| t.to_attribute_value()).collect(),
        )),
        Ok(_) => Err("expected keyword with arguments".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

// ============================================================================
// String Decoding
// ============================================================================

/// Decode the escapes of a raw STEP string body
///
/// Handles doubled quotes, `\\`, `\S\` (ISO 8859-1 upper half), `\X\hh`
/// (ISO 8859-1 code point), `\X2\...\X0\` (UTF-16) and `\X4\...\X0\`
/// (UTF-32). Code page switches (`\PA\`) are dropped. Anything else is kept
/// verbatim.
pub fn decode_step_string(raw: &str) -> String {
    if memchr2(b'\'', b'\\', raw.as_bytes()).is_none() {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("''") {
            out.push('\'');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("\\\\") {
            out.push('\\');
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("\\X2\\") {
            rest = decode_wide(tail, 4, &mut out).unwrap_or_else(|| {
                out.push('\\');
                &rest[1..]
            });
        } else if let Some(tail) = rest.strip_prefix("\\X4\\") {
            rest = decode_wide(tail, 8, &mut out).unwrap_or_else(|| {
                out.push('\\');
                &rest[1..]
            });
        } else if let Some(byte) = rest.strip_prefix("\\X\\").and_then(|t| hex_prefix(t, 2)) {
            out.push(char::from(byte as u8));
            rest = &rest[5..];
        } else if let Some(high) = rest
            .strip_prefix("\\S\\")
            .and_then(|t| t.chars().next())
            .filter(|c| c.is_ascii())
        {
            out.push(char::from(high as u8 + 0x80));
            rest = &rest[4..];
        } else if is_code_page_switch(rest) {
            rest = &rest[4..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

/// Leading `digits` hex digits of `s` as a number
fn hex_prefix(s: &str, digits: usize) -> Option<u32> {
    let hex = s.get(..digits)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

fn is_code_page_switch(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 4
        && bytes[0] == b'\\'
        && bytes[1] == b'P'
        && bytes[2].is_ascii_uppercase()
        && bytes[3] == b'\\'
}

/// Decode hex groups of `width` digits up to `\X0\`; returns the remainder
fn decode_wide<'s>(tail: &'s str, width: usize, out: &mut String) -> Option<&'s str> {
    let end = tail.find("\\X0\\")?;
    let hex = &tail[..end];
    if hex.len() % width != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let units = (0..hex.len())
        .step_by(width)
        .filter_map(|i| u32::from_str_radix(&hex[i..i + width], 16).ok());

    if width == 4 {
        let units: Vec<u16> = units.map(|u| u as u16).collect();
        out.extend(
            char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    } else {
        out.extend(units.map(|u| char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER)));
    }

    Some(&tail[end + 4..])
}
