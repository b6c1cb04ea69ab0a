use std::{fs, io};

/// Here we will define all the parsing Helper functions
/// Such as the block boundary search, the property lookup and primitive parsers
use nom::{
    IResult, Parser,
    bytes::complete::take_while_m_n,
    combinator::{all_consuming, map_res},
};

use crate::{
    models::SourceEncoding,
    parsing::error::{PResult, ParsingError},
};

/// Last character of a line that closes a block.
pub(crate) const BLOCK_TERMINATOR: char = '.';

pub(crate) fn read_lines(path: &str, encoding: SourceEncoding) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(decode_lines(&bytes, encoding))
}

pub(crate) fn decode_lines(bytes: &[u8], encoding: SourceEncoding) -> Vec<String> {
    // A byte order mark overrides the requested encoding.
    let (contents, actual_encoding, had_errors) = encoding.encoding().decode(bytes);
    if had_errors {
        log::warn!(
            "Malformed {} sequences were replaced while decoding",
            actual_encoding.name()
        );
    }
    contents.lines().map(String::from).collect()
}

/// Returns the index of the first line after `start` that ends with the block terminator, or the
/// number of lines if there is none.
///
/// Blocks are not properly nested in the format: a nested block header or the closing line of a
/// nested block ends the search just the same.
pub(crate) fn find_block_end(lines: &[String], start: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| line.ends_with(BLOCK_TERMINATOR))
        .map_or(lines.len(), |(index, _)| index)
}

/// Value of the first `name=value` line of the block whose header is at `block_start`.
pub(crate) fn get_property<'a>(
    lines: &'a [String],
    block_start: usize,
    name: &str,
) -> PResult<&'a str> {
    let end = find_block_end(lines, block_start);
    lines[block_start + 1..end]
        .iter()
        .find_map(|line| {
            line.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .ok_or_else(|| ParsingError::PropertyNotFound {
            property: name.to_string(),
            block_start,
        })
}

/// Indices of the lines that are exactly `header`.
pub(crate) fn block_starts<'a>(
    lines: &'a [String],
    header: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    lines
        .iter()
        .enumerate()
        .filter(move |(_, line)| line.as_str() == header)
        .map(|(index, _)| index)
}

pub(crate) fn u8_from_2_digits_parser(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_digit()),
        |digits: &str| digits.parse::<u8>(),
    )
    .parse(input)
}

/// `HHMM` with nothing else around it.
pub(crate) fn hhmm_parser(input: &str) -> IResult<&str, (u8, u8)> {
    all_consuming((u8_from_2_digits_parser, u8_from_2_digits_parser)).parse(input)
}

#[cfg(test)]
pub(crate) fn to_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}
