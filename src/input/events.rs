//! Input events consumed by the interaction controller.
//!
//! Events also have a one-line textual form so recorded sessions can be
//! replayed from a script:
//!
//! ```text
//! save
//! down 100 100
//! move 300 250
//! up
//! confirm
//! ```

use std::str::FromStr;

use thiserror::Error;

use super::tool::ToolAction;
use crate::util::{MAX_VIEWPORT_DIMENSION, Point, Viewport};

/// A single event delivered to the controller, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Tool menu button
    Tool(ToolAction),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// Pointer left the viewport
    PointerLeave,
    /// Confirm prompt accepted
    Confirm,
    /// Confirm prompt dismissed, or the session aborted
    Cancel,
    /// Viewport changed size
    Resize(Viewport),
    /// Export the whole drawing without a selection
    ExportCanvas,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("empty event")]
    Empty,

    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("'{command}' expects {expected}")]
    WrongArguments {
        command: String,
        expected: &'static str,
    },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("viewport {width}x{height} exceeds the {max}px limit")]
    ViewportTooLarge { width: u32, height: u32, max: u32 },
}

impl FromStr for InputEvent {
    type Err = ParseEventError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseEventError::Empty)?;
        let args: Vec<&str> = words.collect();
        let lower = command.to_ascii_lowercase();

        let event = match lower.as_str() {
            "down" => InputEvent::PointerDown(point_args(&lower, &args)?),
            "move" => InputEvent::PointerMove(point_args(&lower, &args)?),
            "up" => no_args(&lower, &args, InputEvent::PointerUp)?,
            "leave" => no_args(&lower, &args, InputEvent::PointerLeave)?,
            "confirm" => no_args(&lower, &args, InputEvent::Confirm)?,
            "cancel" => no_args(&lower, &args, InputEvent::Cancel)?,
            "export-canvas" => no_args(&lower, &args, InputEvent::ExportCanvas)?,
            "resize" => {
                let [width, height] = two_args(&lower, &args, "a width and a height")?;
                let viewport = Viewport::new(number(width)?, number(height)?);
                if !viewport.is_supported() {
                    return Err(ParseEventError::ViewportTooLarge {
                        width: viewport.width,
                        height: viewport.height,
                        max: MAX_VIEWPORT_DIMENSION,
                    });
                }
                InputEvent::Resize(viewport)
            }
            _ => match command.parse::<ToolAction>() {
                Ok(action) => no_args(&lower, &args, InputEvent::Tool(action))?,
                Err(_) => return Err(ParseEventError::UnknownEvent(command.to_string())),
            },
        };
        Ok(event)
    }
}

fn no_args(command: &str, args: &[&str], event: InputEvent) -> Result<InputEvent, ParseEventError> {
    if args.is_empty() {
        Ok(event)
    } else {
        Err(ParseEventError::WrongArguments {
            command: command.to_string(),
            expected: "no arguments",
        })
    }
}

fn two_args<'a>(
    command: &str,
    args: &[&'a str],
    expected: &'static str,
) -> Result<[&'a str; 2], ParseEventError> {
    match args {
        [a, b] => Ok([*a, *b]),
        _ => Err(ParseEventError::WrongArguments {
            command: command.to_string(),
            expected,
        }),
    }
}

fn point_args(command: &str, args: &[&str]) -> Result<Point, ParseEventError> {
    let [x, y] = two_args(command, args, "x and y coordinates")?;
    Ok(Point::new(number(x)?, number(y)?))
}

fn number<T: FromStr>(text: &str) -> Result<T, ParseEventError> {
    text.parse()
        .map_err(|_| ParseEventError::InvalidNumber(text.to_string()))
}
