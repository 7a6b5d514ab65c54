use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("[{line}]: {message}")]
pub struct CommandError {
    pub line: usize,
    pub message: String,
}

impl CommandError {
    pub fn new<M: Into<String>>(line: usize, message: M) -> Self {
        Self { line, message: message.into() }
    }
}

/// One line of a driver script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push(String),
    Pop,
    Top,
    Peek(usize),
    Get(usize),
    Set(usize, String),
    Size,
    Capacity,
    Empty,
    Clear,
    Reserve(usize),
    Print,
    Reverse,
    Copy,
    Restore,
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Push(value) => write!(f, "push {}", value),
            Command::Pop => write!(f, "pop"),
            Command::Top => write!(f, "top"),
            Command::Peek(distance) => write!(f, "peek {}", distance),
            Command::Get(index) => write!(f, "get {}", index),
            Command::Set(index, value) => write!(f, "set {} {}", index, value),
            Command::Size => write!(f, "size"),
            Command::Capacity => write!(f, "capacity"),
            Command::Empty => write!(f, "empty"),
            Command::Clear => write!(f, "clear"),
            Command::Reserve(capacity) => write!(f, "reserve {}", capacity),
            Command::Print => write!(f, "print"),
            Command::Reverse => write!(f, "reverse"),
            Command::Copy => write!(f, "copy"),
            Command::Restore => write!(f, "restore"),
        }
    }
}

type Result<T> = std::result::Result<T, CommandError>;

/// Parses a single line. Blank lines and `#` comments give `None`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match text.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (text, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "push" => Command::Push(value(line, "push", rest)?),
        "pop" => no_operand(line, "pop", rest, Command::Pop)?,
        "top" => no_operand(line, "top", rest, Command::Top)?,
        "peek" => Command::Peek(number(line, "peek", rest)?),
        "get" => Command::Get(number(line, "get", rest)?),
        "set" => {
            let (index, value) = match rest.split_once(char::is_whitespace) {
                Some((index, value)) => (index, value.trim()),
                None => (rest, ""),
            };
            Command::Set(number(line, "set", index)?, self::value(line, "set", value)?)
        },
        "size" => no_operand(line, "size", rest, Command::Size)?,
        "capacity" => no_operand(line, "capacity", rest, Command::Capacity)?,
        "empty" => no_operand(line, "empty", rest, Command::Empty)?,
        "clear" => no_operand(line, "clear", rest, Command::Clear)?,
        "reserve" => Command::Reserve(number(line, "reserve", rest)?),
        "print" => no_operand(line, "print", rest, Command::Print)?,
        "reverse" => no_operand(line, "reverse", rest, Command::Reverse)?,
        "copy" => no_operand(line, "copy", rest, Command::Copy)?,
        "restore" => no_operand(line, "restore", rest, Command::Restore)?,
        _ => return Err(CommandError::new(line, format!("Unknown command '{}'", keyword))),
    };

    Ok(Some(command))
}

pub fn parse_script(source: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (index, text) in source.lines().enumerate() {
        if let Some(command) = parse_line(index + 1, text)? {
            commands.push(command);
        }
    }

    Ok(commands)
}

fn value(line: usize, keyword: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(CommandError::new(line, format!("Expected a value after '{}'", keyword)));
    }

    Ok(rest.to_string())
}

fn number(line: usize, keyword: &str, rest: &str) -> Result<usize> {
    rest.parse()
        .map_err(|_| CommandError::new(line, format!("Expected a number after '{}', found '{}'", keyword, rest)))
}

fn no_operand(line: usize, keyword: &str, rest: &str, command: Command) -> Result<Command> {
    if !rest.is_empty() {
        return Err(CommandError::new(line, format!("'{}' takes no operand", keyword)));
    }

    Ok(command)
}
