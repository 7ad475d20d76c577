//! Parser for the line-oriented sheet text format.
//!
//! Each non-blank, non-comment line is a keyword followed by `key="value"`
//! attributes. Header lines (`version="2"`, `imagePath="hero.png"`) have no
//! keyword and conventionally precede the first `animation` line. A `frame`
//! belongs to the most recent `animation`, a `point` to the most recent
//! `frame`.

use std::str::FromStr;

use crate::error::SheetError;
use crate::model::{Animation, Frame, Point, Sheet, SheetVersion};

/// Parse a complete sheet file.
pub fn parse_sheet(text: &str) -> Result<Sheet, SheetError> {
    let mut sheet = Sheet::default();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let first = line.split_whitespace().next().unwrap_or("");

        if first.contains('=') {
            parse_header(line, line_no, &mut sheet)?;
            continue;
        }

        let rest = &line[first.len()..];
        let attrs = parse_attrs(rest, line_no)?;

        match first {
            "animation" => {
                let state = require(&attrs, "animation", "state", line_no)?;
                sheet.animations.push(Animation::new(state));
            }
            "frame" => {
                let animation = sheet
                    .animations
                    .last_mut()
                    .ok_or(SheetError::OrphanFrame { line: line_no })?;
                animation.frames.push(parse_frame(&attrs, line_no)?);
            }
            "point" => {
                let frame = sheet
                    .animations
                    .last_mut()
                    .and_then(|a| a.frames.last_mut())
                    .ok_or(SheetError::OrphanPoint { line: line_no })?;
                frame.points.push(Point {
                    label: require(&attrs, "point", "label", line_no)?.to_string(),
                    x: number(&attrs, "x", 0, line_no)?,
                    y: number(&attrs, "y", 0, line_no)?,
                });
            }
            other => {
                return Err(SheetError::UnknownKeyword {
                    line: line_no,
                    keyword: other.to_string(),
                });
            }
        }
    }

    Ok(sheet)
}

fn parse_header(line: &str, line_no: usize, sheet: &mut Sheet) -> Result<(), SheetError> {
    for (key, value) in parse_attrs(line, line_no)? {
        match key.as_str() {
            "version" => {
                if value == "2" {
                    sheet.version = SheetVersion::Modern;
                }
            }
            "imagePath" => sheet.image_path = Some(value),
            // Unknown headers are tolerated for forward compatibility.
            _ => {}
        }
    }
    Ok(())
}

fn parse_frame(attrs: &[(String, String)], line_no: usize) -> Result<Frame, SheetError> {
    let duration = require(attrs, "frame", "duration", line_no)?.to_string();

    Ok(Frame {
        x: number(attrs, "x", 0, line_no)?,
        y: number(attrs, "y", 0, line_no)?,
        w: number(attrs, "w", 0, line_no)?,
        h: number(attrs, "h", 0, line_no)?,
        originx: number(attrs, "originx", 0, line_no)?,
        originy: number(attrs, "originy", 0, line_no)?,
        flipx: number::<i32>(attrs, "flipx", 0, line_no)? != 0,
        flipy: number::<i32>(attrs, "flipy", 0, line_no)? != 0,
        duration,
        points: Vec::new(),
    })
}

/// Tokenize `key="value"` pairs from the remainder of a line.
fn parse_attrs(rest: &str, line_no: usize) -> Result<Vec<(String, String)>, SheetError> {
    let mut attrs = Vec::new();
    let mut chars = rest.char_indices().peekable();

    loop {
        // Skip whitespace between attributes.
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        let Some(&(key_start, _)) = chars.peek() else {
            break;
        };

        let key_end;
        loop {
            match chars.next() {
                Some((i, '=')) => {
                    key_end = i;
                    break;
                }
                Some((_, c)) if c.is_whitespace() => {
                    return Err(SheetError::Parse {
                        line: line_no,
                        message: "attribute is missing '='".to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    return Err(SheetError::Parse {
                        line: line_no,
                        message: "attribute is missing '='".to_string(),
                    });
                }
            }
        }
        let key = rest[key_start..key_end].to_string();

        match chars.next() {
            Some((_, '"')) => {}
            _ => {
                return Err(SheetError::Parse {
                    line: line_no,
                    message: format!("attribute \"{key}\" value must be quoted"),
                });
            }
        }

        let value_start = chars.peek().map(|&(i, _)| i).unwrap_or(rest.len());
        let mut value_end = None;
        for (i, c) in chars.by_ref() {
            if c == '"' {
                value_end = Some(i);
                break;
            }
        }
        let Some(value_end) = value_end else {
            return Err(SheetError::Parse {
                line: line_no,
                message: format!("unterminated value for attribute \"{key}\""),
            });
        };

        attrs.push((key, rest[value_start..value_end].to_string()));
    }

    Ok(attrs)
}

fn lookup<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn require<'a>(
    attrs: &'a [(String, String)],
    keyword: &'static str,
    attr: &'static str,
    line_no: usize,
) -> Result<&'a str, SheetError> {
    lookup(attrs, attr).ok_or(SheetError::MissingAttribute {
        line: line_no,
        keyword,
        attr,
    })
}

/// Parse an optional numeric attribute, falling back to `default` when the
/// attribute is absent.
fn number<T: FromStr + Copy>(
    attrs: &[(String, String)],
    attr: &'static str,
    default: T,
    line_no: usize,
) -> Result<T, SheetError> {
    match lookup(attrs, attr) {
        None => Ok(default),
        Some(value) => value.trim().parse::<T>().map_err(|_| SheetError::BadNumber {
            line: line_no,
            attr,
            value: value.to_string(),
        }),
    }
}
