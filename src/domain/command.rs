//! Command protocol: one command per turn, tokens separated by whitespace.
//!
//! Well-formed shapes:
//!   `HELLO` `GOLD` `PICKUP` `LOOK` `QUIT` `MOVE <N|S|E|W>`
//! Everything else is `Invalid`. Parsing never fails.

use std::fmt;

use super::entity::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Hello,
    Gold,
    Pickup,
    Look,
    Quit,
    Move(Direction),
    Invalid,
}

impl Command {
    /// Parse a raw input line. Case-insensitive.
    pub fn parse(line: &str) -> Self {
        let upper = line.to_uppercase();
        let tokens: Vec<&str> = upper.split_whitespace().collect();
        Command::from_tokens(&tokens)
    }

    /// Parse an already tokenized, upper-case command.
    pub fn from_tokens(tokens: &[&str]) -> Self {
        match tokens {
            ["HELLO"] => Command::Hello,
            ["GOLD"] => Command::Gold,
            ["PICKUP"] => Command::Pickup,
            ["LOOK"] => Command::Look,
            ["QUIT"] => Command::Quit,
            ["MOVE", dir] => match Direction::from_token(dir) {
                Some(d) => Command::Move(d),
                None => Command::Invalid,
            },
            _ => Command::Invalid,
        }
    }
}

/// Canonical upper-case form, as it would be typed.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Hello => f.write_str("HELLO"),
            Command::Gold => f.write_str("GOLD"),
            Command::Pickup => f.write_str("PICKUP"),
            Command::Look => f.write_str("LOOK"),
            Command::Quit => f.write_str("QUIT"),
            Command::Move(d) => write!(f, "MOVE {}", d.letter()),
            Command::Invalid => f.write_str("<invalid>"),
        }
    }
}
