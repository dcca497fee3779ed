//! List-display collaborator.

use std::io::Write;

use stockwatch_inventory::InventoryRecord;

use crate::types::UserMessage;

/// Receives positional list updates and per-operation messages.
///
/// Positions refer to the controller's record list at the moment of the call.
pub trait ListDisplay {
    fn item_inserted(&mut self, position: usize, record: &InventoryRecord);

    fn item_removed(&mut self, position: usize);

    fn item_changed(&mut self, position: usize, record: &InventoryRecord);

    fn show_message(&mut self, message: &UserMessage);
}

impl<D: ListDisplay + ?Sized> ListDisplay for Box<D> {
    fn item_inserted(&mut self, position: usize, record: &InventoryRecord) {
        (**self).item_inserted(position, record)
    }

    fn item_removed(&mut self, position: usize) {
        (**self).item_removed(position)
    }

    fn item_changed(&mut self, position: usize, record: &InventoryRecord) {
        (**self).item_changed(position, record)
    }

    fn show_message(&mut self, message: &UserMessage) {
        (**self).show_message(message)
    }
}

/// Format one record as a single table row.
pub fn format_row(position: usize, record: &InventoryRecord) -> String {
    format!(
        "{:>3}  {:<12} {:<24} bin {:<8} qty {}",
        position,
        record.part_number(),
        record.name(),
        record.bin(),
        record.quantity()
    )
}

/// Line-oriented display for terminals and pipes.
#[derive(Debug)]
pub struct ConsoleDisplay<W: Write> {
    out: W,
}

impl ConsoleDisplay<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            tracing::warn!("failed to write to console: {err}");
        }
    }
}

impl<W: Write> ListDisplay for ConsoleDisplay<W> {
    fn item_inserted(&mut self, position: usize, record: &InventoryRecord) {
        self.line(&format!("+ {}", format_row(position, record)));
    }

    fn item_removed(&mut self, position: usize) {
        self.line(&format!("- {position:>3}"));
    }

    fn item_changed(&mut self, position: usize, record: &InventoryRecord) {
        self.line(&format!("~ {}", format_row(position, record)));
    }

    fn show_message(&mut self, message: &UserMessage) {
        self.line(&message.to_string());
    }
}
