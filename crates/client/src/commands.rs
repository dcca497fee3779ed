//! Line commands for the `stockwatch` binary.

use thiserror::Error;

use stockwatch_core::{DomainError, PartNumber};
use stockwatch_inventory::{InventoryIntent, NewRecord};

pub const HELP: &str = "\
commands:
  list                              show all items
  json                              print all items as JSON
  show <part>                       show one item as stored
  add <part> <name> <bin> <qty>     add an item (quote names with spaces)
  delete <part>                     delete an item
  inc <part>                        increase quantity by one
  dec <part>                        decrease quantity by one
  enable-sms                        enable text alerts
  help                              this text
  quit                              exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Intent(InventoryIntent),
    List,
    Json,
    Show(PartNumber),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid part number: {0}")]
    InvalidPart(#[from] DomainError),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("unterminated quote")]
    UnterminatedQuote,
}

pub fn parse_line(line: &str) -> Result<ClientCommand, ParseError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };

    let part = |usage: &'static str| -> Result<PartNumber, ParseError> {
        match args {
            [raw] => Ok(PartNumber::new(raw.as_str())?),
            _ => Err(ParseError::Usage(usage)),
        }
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => ClientCommand::List,
        "json" => ClientCommand::Json,
        "help" | "?" => ClientCommand::Help,
        "quit" | "exit" => ClientCommand::Quit,
        "show" => ClientCommand::Show(part("show <part>")?),
        "delete" | "rm" => ClientCommand::Intent(InventoryIntent::Delete {
            part_number: part("delete <part>")?,
        }),
        "inc" | "+" => ClientCommand::Intent(InventoryIntent::Increase {
            part_number: part("inc <part>")?,
        }),
        "dec" | "-" => ClientCommand::Intent(InventoryIntent::Decrease {
            part_number: part("dec <part>")?,
        }),
        "enable-sms" => ClientCommand::Intent(InventoryIntent::EnableNotifications),
        "add" => match args {
            [part_number, name, bin, qty] => {
                let quantity = qty
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidQuantity(qty.clone()))?;
                ClientCommand::Intent(InventoryIntent::Add(NewRecord::new(
                    part_number.as_str(),
                    name.as_str(),
                    bin.as_str(),
                    quantity,
                )))
            }
            _ => return Err(ParseError::Usage("add <part> <name> <bin> <qty>")),
        },
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(command)
}

/// Split on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(ParseError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
