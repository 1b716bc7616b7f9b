use sapper_core::{Coord, Coord2, MouseButtons};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown buttons {token:?}, expected one of `-`, `L`, `R`, `LR`")]
    UnknownButtons { line: usize, token: String },
    #[error("line {line}: `{command}` needs a column and a row")]
    MissingCoords { line: usize, command: String },
    #[error("line {line}: invalid coordinate {token:?}")]
    InvalidCoord { line: usize, token: String },
    #[error("line {line}: unexpected {token:?}")]
    Trailing { line: usize, token: String },
}

/// Pressed buttons and pointer cell for one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptFrame {
    pub pressed: MouseButtons,
    pub pointer: Option<Coord2>,
}

/// Parses a whole input script.
///
/// Each line is either a raw frame, `<buttons> [<col> <row>]`, or one of the `click <col> <row>`
/// and `flag <col> <row>` shorthands, which expand to a press frame followed by a release frame on
/// the same cell. Blank lines and everything after `#` are ignored.
pub fn parse_script(source: &str) -> Result<Vec<ScriptFrame>, ScriptError> {
    let mut frames = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default();
        let mut tokens = content.split_whitespace();
        let Some(head) = tokens.next() else {
            continue;
        };

        match head {
            "click" | "flag" => {
                let pointer = parse_coords(line, head, &mut tokens)?.ok_or_else(|| {
                    ScriptError::MissingCoords {
                        line,
                        command: head.to_owned(),
                    }
                })?;
                let button = if head == "click" {
                    MouseButtons::PRIMARY
                } else {
                    MouseButtons::SECONDARY
                };
                frames.push(ScriptFrame {
                    pressed: button,
                    pointer: Some(pointer),
                });
                frames.push(ScriptFrame {
                    pressed: MouseButtons::empty(),
                    pointer: Some(pointer),
                });
            }
            _ => {
                let pressed = parse_buttons(line, head)?;
                let pointer = parse_coords(line, head, &mut tokens)?;
                frames.push(ScriptFrame { pressed, pointer });
            }
        }

        if let Some(token) = tokens.next() {
            return Err(ScriptError::Trailing {
                line,
                token: token.to_owned(),
            });
        }
    }
    Ok(frames)
}

fn parse_buttons(line: usize, token: &str) -> Result<MouseButtons, ScriptError> {
    match token {
        "-" => Ok(MouseButtons::empty()),
        "L" => Ok(MouseButtons::PRIMARY),
        "R" => Ok(MouseButtons::SECONDARY),
        "LR" | "RL" => Ok(MouseButtons::PRIMARY | MouseButtons::SECONDARY),
        _ => Err(ScriptError::UnknownButtons {
            line,
            token: token.to_owned(),
        }),
    }
}

fn parse_coords<'a>(
    line: usize,
    command: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<Option<Coord2>, ScriptError> {
    let Some(col) = tokens.next() else {
        return Ok(None);
    };
    let col = parse_coord(line, col)?;
    let row = match tokens.next() {
        Some(row) => parse_coord(line, row)?,
        None => {
            return Err(ScriptError::MissingCoords {
                line,
                command: command.to_owned(),
            });
        }
    };
    Ok(Some((col, row)))
}

fn parse_coord(line: usize, token: &str) -> Result<Coord, ScriptError> {
    token.parse().map_err(|_| ScriptError::InvalidCoord {
        line,
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_frames() {
        let frames = parse_script("-\nL 3 4\nLR\nR 0 255\n").unwrap();
        assert_eq!(
            frames,
            vec![
                ScriptFrame {
                    pressed: MouseButtons::empty(),
                    pointer: None,
                },
                ScriptFrame {
                    pressed: MouseButtons::PRIMARY,
                    pointer: Some((3, 4)),
                },
                ScriptFrame {
                    pressed: MouseButtons::all(),
                    pointer: None,
                },
                ScriptFrame {
                    pressed: MouseButtons::SECONDARY,
                    pointer: Some((0, 255)),
                },
            ]
        );
    }

    #[test]
    fn shorthands_expand_to_press_and_release() {
        let frames = parse_script("click 1 2\nflag 5 6").unwrap();
        assert_eq!(
            frames,
            vec![
                ScriptFrame {
                    pressed: MouseButtons::PRIMARY,
                    pointer: Some((1, 2)),
                },
                ScriptFrame {
                    pressed: MouseButtons::empty(),
                    pointer: Some((1, 2)),
                },
                ScriptFrame {
                    pressed: MouseButtons::SECONDARY,
                    pointer: Some((5, 6)),
                },
                ScriptFrame {
                    pressed: MouseButtons::empty(),
                    pointer: Some((5, 6)),
                },
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let frames = parse_script("# pick easy\n\n   \nclick 0 0 # first row\n").unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn errors_carry_line_numbers() {
        assert_eq!(
            parse_script("-\nX 1 1"),
            Err(ScriptError::UnknownButtons {
                line: 2,
                token: "X".into(),
            })
        );
        assert_eq!(
            parse_script("\n\nclick"),
            Err(ScriptError::MissingCoords {
                line: 3,
                command: "click".into(),
            })
        );
        assert_eq!(
            parse_script("L 4"),
            Err(ScriptError::MissingCoords {
                line: 1,
                command: "L".into(),
            })
        );
        assert_eq!(
            parse_script("flag 1 256"),
            Err(ScriptError::InvalidCoord {
                line: 1,
                token: "256".into(),
            })
        );
        assert_eq!(
            parse_script("L 1 2 3"),
            Err(ScriptError::Trailing {
                line: 1,
                token: "3".into(),
            })
        );
    }

    #[test]
    fn error_messages() {
        let err = parse_script("click -1 0").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid coordinate \"-1\"");
    }
}
