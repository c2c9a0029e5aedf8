// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SOSI line tokenizer using nom combinators
//!
//! Parses group headers, element lines and `..REF` lists.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, multispace0, space0},
    combinator::{map, map_res, opt, recognize, verify},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    IResult, Parser,
};

/// One `..TAG value` line
#[derive(Clone, Debug, PartialEq)]
pub struct Element<'a> {
    /// Number of leading dots (2 for `..TAG`, 3 for `...TAG`)
    pub depth: usize,
    pub name: &'a str,
    /// Everything after the name, trimmed
    pub value: &'a str,
}

/// One token of a `..REF` list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefToken {
    /// `:12` or `-:12`
    Ref { serial: u32, reversed: bool },
    /// `(` starts an island ring
    Open,
    /// `)` ends an island ring
    Close,
}

// ============================================================================
// Parsing Primitives
// ============================================================================

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Parse a group header line: `.KURVE 12:`
///
/// Returns the group name and its serial, if present.
pub fn group_start(input: &str) -> IResult<&str, (&str, Option<u32>)> {
    let (input, _) = char('.').parse(input)?;
    let (input, name) = take_while1(is_name_char).parse(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, serial) = opt(terminated(
        map_res(digit1, |d: &str| d.parse::<u32>()),
        char(':'),
    ))
    .parse(input)?;
    Ok((input, (name, serial)))
}

/// Parse an element line: `..OBJTYPE Veg` or `...KOORDSYS 22`
pub fn element(input: &str) -> IResult<&str, Element<'_>> {
    let (input, dots) = verify(take_while1(|c: char| c == '.'), |d: &str| d.len() >= 2).parse(input)?;
    let (input, name) = take_while1(is_name_char).parse(input)?;
    let (value, _) = space0.parse(input)?;
    Ok((
        "",
        Element {
            depth: dots.len(),
            name,
            value: value.trim(),
        },
    ))
}

/// Parse one reference token
fn ref_token(input: &str) -> IResult<&str, RefToken> {
    alt((
        map(char('('), |_| RefToken::Open),
        map(char(')'), |_| RefToken::Close),
        map(
            (
                opt(char('-')),
                char(':'),
                map_res(digit1, |d: &str| d.parse::<u32>()),
            ),
            |(sign, _, serial)| RefToken::Ref {
                serial,
                reversed: sign.is_some(),
            },
        ),
    ))
    .parse(input)
}

/// Parse a `..REF` value or one of its continuation lines
///
/// Stops at the first token that is not a reference, sign or parenthesis.
pub fn ref_list(input: &str) -> IResult<&str, Vec<RefToken>> {
    many0(preceded(multispace0, ref_token)).parse(input)
}

/// Parse one value token: a quoted string or a run of non-space characters
fn value_token(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(delimited(char('"'), take_while(|c: char| c != '"'), char('"'))),
        recognize(delimited(char('\''), take_while(|c: char| c != '\''), char('\''))),
        take_while1(|c: char| !c.is_whitespace()),
    ))
    .parse(input)
}

// ============================================================================
// Line Helpers
// ============================================================================

/// Split an element value into whitespace-separated tokens
///
/// Quoted strings stay one token, quotes included.
pub fn split_value(value: &str) -> Vec<&str> {
    many0(preceded(multispace0, value_token))
        .parse(value)
        .map(|(_, tokens)| tokens)
        .unwrap_or_default()
}

/// Remove a trailing `!` comment, ignoring `!` inside quotes
pub fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (i, c) in line.char_indices() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (q, Some(open)) if q == open => quote = None,
            ('!', None) => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Numeric tokens of a coordinate line, stopping at trailing `...KP` markers
pub fn coordinate_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace().take_while(|t| !t.starts_with('.'))
}

/// Strip one pair of surrounding quotes
pub fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
