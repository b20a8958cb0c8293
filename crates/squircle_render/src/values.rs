//! Attribute and computed-style value parsing
//!
//! Small nom parsers for the CSS-ish values the declarative scan reads:
//! lengths, smoothing factors, colors, and border shorthands. Parse failures
//! never propagate; callers fall back to defaults.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::opt,
    error::ParseError as NomParseError,
    number::complete::float,
    IResult,
};

use crate::color::Color;

/// Parsed border shorthand
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderInfo {
    pub width: f32,
    pub color: Color,
}

/// Parse a length value with an optional `px` suffix
///
/// `"16px"`, `"16"`, and `"16.5 "` all parse; anything trailing other than
/// whitespace rejects the value.
pub fn parse_length(input: &str) -> Option<f32> {
    let (rest, value) = length::<nom::error::Error<&str>>(input.trim()).ok()?;
    rest.is_empty().then_some(value)
}

/// Parse a smoothing factor, clamped into [0, 1]
pub fn parse_factor(input: &str) -> Option<f32> {
    let (rest, value) = float::<_, nom::error::Error<&str>>(input.trim()).ok()?;
    rest.is_empty().then(|| value.clamp(0.0, 1.0))
}

/// Parse a color value
///
/// Accepts hex (#rgb, #rrggbb, #rrggbbaa), rgb()/rgba() with components in
/// either 0-1 or 0-255 range, and a small set of named colors including
/// `transparent`.
pub fn parse_color(input: &str) -> Option<Color> {
    let input = input.trim();

    if let Ok((_, color)) = hex_color::<nom::error::Error<&str>>(input) {
        return Some(color);
    }
    if let Ok((_, color)) = rgba_color::<nom::error::Error<&str>>(input) {
        return Some(color);
    }
    if let Ok((_, color)) = rgb_color::<nom::error::Error<&str>>(input) {
        return Some(color);
    }
    named_color(input)
}

/// Parse a computed border shorthand, e.g. `"2px solid #333"`
///
/// Only `solid` borders count; `none`, dashed, and dotted borders return
/// `None`. Component order follows the computed-style convention
/// (width, style, color). A missing color defaults to opaque black.
pub fn parse_border(input: &str) -> Option<BorderInfo> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("none") {
        return None;
    }

    let (rest, width) = length::<nom::error::Error<&str>>(input).ok()?;
    let (rest, _) = multispace1::<_, nom::error::Error<&str>>(rest).ok()?;
    let (rest, _) = tag_no_case::<_, _, nom::error::Error<&str>>("solid")(rest).ok()?;

    let rest = rest.trim();
    let color = if rest.is_empty() {
        Color::BLACK
    } else {
        parse_color(rest)?
    };

    Some(BorderInfo { width, color })
}

/// Float with an optional case-insensitive `px` suffix
fn length<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, f32, E> {
    let (input, value) = float(input)?;
    let (input, _) = opt(tag_no_case("px"))(input)?;
    Ok((input, value))
}

fn ws<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    multispace0(input)
}

/// Parse hex color: #RGB, #RRGGBB, or #RRGGBBAA
fn hex_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (input, _) = char('#')(input)?;
    let (input, hex) = take_while1(|c: char| c.is_ascii_hexdigit())(input)?;

    let err = || nom::Err::Error(E::from_error_kind(input, nom::error::ErrorKind::HexDigit));
    let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());

    let color = match hex.len() {
        3 => {
            let r = byte(&hex[0..1].repeat(2))?;
            let g = byte(&hex[1..2].repeat(2))?;
            let b = byte(&hex[2..3].repeat(2))?;
            Color::from_rgba8(r, g, b, 255)
        }
        6 => {
            let r = byte(&hex[0..2])?;
            let g = byte(&hex[2..4])?;
            let b = byte(&hex[4..6])?;
            Color::from_rgba8(r, g, b, 255)
        }
        8 => {
            let r = byte(&hex[0..2])?;
            let g = byte(&hex[2..4])?;
            let b = byte(&hex[4..6])?;
            let a = byte(&hex[6..8])?;
            Color::from_rgba8(r, g, b, a)
        }
        _ => return Err(err()),
    };

    Ok((input, color))
}

/// Parse rgba(r, g, b, a)
fn rgba_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (input, _) = tag_no_case("rgba")(input)?;
    let (input, components) = color_components::<E>(input)?;
    let [r, g, b] = normalize_rgb(components[0], components[1], components[2]);
    let a = components.get(3).copied().unwrap_or(1.0);
    Ok((input, Color::rgba(r, g, b, a)))
}

/// Parse rgb(r, g, b)
fn rgb_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (input, _) = tag_no_case("rgb")(input)?;
    let (input, components) = color_components::<E>(input)?;
    let [r, g, b] = normalize_rgb(components[0], components[1], components[2]);
    Ok((input, Color::rgb(r, g, b)))
}

/// Parenthesized comma-separated floats: `(r, g, b)` or `(r, g, b, a)`
fn color_components<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Vec<f32>, E> {
    let (input, _) = ws(input)?;
    let (mut input, _) = char('(')(input)?;

    let mut components = Vec::with_capacity(4);
    loop {
        let (rest, _) = ws(input)?;
        let (rest, value) = float(rest)?;
        components.push(value);
        let (rest, _) = ws(rest)?;
        let (rest, sep) = opt(alt((tag(","), tag(")"))))(rest)?;
        input = rest;
        match sep {
            Some(",") if components.len() < 4 => continue,
            Some(")") => break,
            _ => {
                return Err(nom::Err::Error(E::from_error_kind(
                    input,
                    nom::error::ErrorKind::Char,
                )))
            }
        }
    }

    if components.len() < 3 {
        return Err(nom::Err::Error(E::from_error_kind(
            input,
            nom::error::ErrorKind::Count,
        )));
    }
    Ok((input, components))
}

/// Components above 1.0 are treated as 0-255 range
fn normalize_rgb(r: f32, g: f32, b: f32) -> [f32; 3] {
    if r > 1.0 || g > 1.0 || b > 1.0 {
        [r / 255.0, g / 255.0, b / 255.0]
    } else {
        [r, g, b]
    }
}

/// Parse named colors
fn named_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::rgb(1.0, 0.0, 0.0)),
        "green" => Some(Color::rgb(0.0, 0.5, 0.0)),
        "blue" => Some(Color::rgb(0.0, 0.0, 1.0)),
        "gray" | "grey" => Some(Color::rgb(0.5, 0.5, 0.5)),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(parse_length("16px"), Some(16.0));
        assert_eq!(parse_length("16"), Some(16.0));
        assert_eq!(parse_length(" 2.5px "), Some(2.5));
        assert_eq!(parse_length("abc"), None);
        assert_eq!(parse_length("16em"), None);
    }

    #[test]
    fn factors_clamp_into_unit_range() {
        assert_eq!(parse_factor("0.6"), Some(0.6));
        assert_eq!(parse_factor("1.5"), Some(1.0));
        assert_eq!(parse_factor("-0.2"), Some(0.0));
        assert_eq!(parse_factor(""), None);
        assert_eq!(parse_factor("fast"), None);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_color("#000000"), Some(Color::BLACK));
        let c = parse_color("#ff000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn rgb_colors_normalize_255_range() {
        assert_eq!(parse_color("rgb(255, 0, 0)"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(parse_color("rgb(1, 0, 0)"), Some(Color::rgb(1.0, 0.0, 0.0)));
        let c = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn named_colors_include_transparent() {
        assert_eq!(parse_color("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(parse_color("White"), Some(Color::WHITE));
        assert_eq!(parse_color("mauve"), None);
    }

    #[test]
    fn border_shorthands() {
        let border = parse_border("2px solid #ff0000").unwrap();
        assert_eq!(border.width, 2.0);
        assert_eq!(border.color, Color::rgb(1.0, 0.0, 0.0));

        // Missing color defaults to black
        assert_eq!(
            parse_border("1px solid"),
            Some(BorderInfo {
                width: 1.0,
                color: Color::BLACK
            })
        );

        assert_eq!(parse_border("none"), None);
        assert_eq!(parse_border("2px dashed red"), None);
        assert_eq!(parse_border(""), None);
    }

    #[test]
    fn transparent_borders_are_detectable() {
        let border = parse_border("3px solid transparent").unwrap();
        assert!(border.color.is_transparent());
    }
}
