use nom::{
    bytes::complete as bytes, character::complete as character, combinator, multi, sequence,
    IResult,
};
use thiserror::Error;

use crate::{Layers, Minutes};

/// Why a piece of text couldn't be read as a number of minutes or layers.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    /// Nothing but whitespace was given.
    #[error("expected a number but got nothing")]
    Empty,
    /// The text isn't a decimal integer.
    #[error("couldn't parse {input:?} as a whole number")]
    Invalid {
        /// The rejected text.
        input: String,
    },
    /// The text is a decimal integer that doesn't fit in 64 bits.
    #[error("{input:?} is too large")]
    Overflow {
        /// The rejected text.
        input: String,
    },
}

fn read_digits(s: &str) -> IResult<&str, &str> {
    combinator::recognize(multi::many1(sequence::terminated(
        character::one_of("0123456789"),
        multi::many0(bytes::tag("_")),
    )))(s)
}

pub(crate) fn read_i64(s: &str) -> IResult<&str, Option<i64>> {
    combinator::map(
        sequence::pair(combinator::opt(character::one_of("+-")), read_digits),
        |(sign, digits): (Option<char>, &str)| {
            let negative = sign == Some('-');
            // Accumulate toward the sign so that i64::MIN is representable.
            digits
                .bytes()
                .filter(|&c| c != b'_')
                .try_fold(0i64, |acc, c| {
                    let digit = i64::from(c - b'0');
                    let acc = acc.checked_mul(10)?;
                    if negative {
                        acc.checked_sub(digit)
                    } else {
                        acc.checked_add(digit)
                    }
                })
        },
    )(s)
}

fn parse_i64(s: &str) -> Result<i64, ParseError> {
    use nom::Finish;

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    match combinator::all_consuming(read_i64)(trimmed).finish() {
        Ok((_, Some(value))) => Ok(value),
        Ok((_, None)) => Err(ParseError::Overflow {
            input: trimmed.to_string(),
        }),
        Err(_) => Err(ParseError::Invalid {
            input: trimmed.to_string(),
        }),
    }
}

/// Reads a number of minutes, such as `30`, `-5` or `1_000`.
pub fn parse_minutes(s: &str) -> Result<Minutes, ParseError> {
    parse_i64(s)
}

/// Reads a number of layers, such as `4`.
pub fn parse_layers(s: &str) -> Result<Layers, ParseError> {
    parse_i64(s)
}
