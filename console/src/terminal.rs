//! Line-oriented terminal front end.

use std::io::{self, BufRead, Write};

use entity::Field;
use tracing::{debug, warn};

use crate::{
    feedback::StatusKind,
    overlay::OverlayClick,
    registry::{Registry, UiEvent},
    surface::{Frame, Surface},
    table::{TableRow, TableView},
};

const HELP: &str = "\
Commands:
  add            fill in and submit the add form
  edit <row>     open the edit overlay for a row
  save           submit the edit overlay
  close          close the edit overlay
  delete <row>   delete a row (asks for confirmation)
  reload         fetch the collection again
  help           show this text
  quit           leave the console";

/// Paints frames as plain text and reads answers line by line.
pub struct TerminalSurface<R, W> {
    input: R,
    output: W,
}

impl TerminalSurface<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSurface<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// `Ok(None)` once input is exhausted.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        writeln!(self.output)?;
        write_table(&mut self.output, frame.table)?;

        if frame.overlay.is_visible() {
            writeln!(self.output)?;
            writeln!(self.output, "-- Editing {} (read-only name) --", frame.overlay.name())?;
            for field in Field::EDITABLE {
                writeln!(
                    self.output,
                    "  {:<15} {}",
                    field.label(),
                    frame.overlay.values().get(field)
                )?;
            }
        }

        if let Some(status) = frame.status {
            let tag = match status.kind {
                StatusKind::Success => "ok",
                StatusKind::Error => "error",
            };
            writeln!(self.output, "[{tag}] {}", status.text)?;
        }
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Surface for TerminalSurface<R, W> {
    fn paint(&mut self, frame: &Frame<'_>) {
        if let Err(err) = self.draw(frame) {
            warn!(error = %err, "failed to paint frame");
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        match self.prompt(&format!("{question} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "confirmation prompt failed");
                false
            }
        }
    }
}

/// Writes the table with a leading 1-based row number column.
pub fn write_table(out: &mut impl Write, table: &TableView) -> io::Result<()> {
    let headers = TableView::headers();
    let mut widths = headers.map(str::len);
    for row in table.rows() {
        if let TableRow::Record { cells, .. } = row {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut line = String::from("  # ");
    for (header, width) in headers.iter().zip(widths) {
        line.push_str(&format!("| {header:<width$} "));
    }
    writeln!(out, "{}", line.trim_end())?;
    let total = line.trim_end().chars().count();
    writeln!(out, "{}", "-".repeat(total))?;

    for (idx, row) in table.rows().iter().enumerate() {
        match row {
            TableRow::Record { cells, .. } => {
                let mut line = format!("{:>3} ", idx + 1);
                for (cell, width) in cells.iter().zip(widths) {
                    line.push_str(&format!("| {cell:<width$} "));
                }
                line.push_str("| edit / delete");
                writeln!(out, "{line}")?;
            }
            TableRow::Placeholder { text, .. } => {
                writeln!(out, "{text:^total$}")?;
            }
        }
    }
    Ok(())
}

/// One console command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add,
    Edit(usize),
    Save,
    Close,
    Delete(usize),
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Rows are typed 1-based and come back zero-based.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut parts = input.split_whitespace();
        let Some(word) = parts.next() else {
            return Err("type a command, or `help`".into());
        };
        let row = |arg: Option<&str>| -> Result<usize, String> {
            let arg = arg.ok_or_else(|| format!("`{word}` needs a row number"))?;
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n - 1),
                _ => Err(format!("`{arg}` is not a row number")),
            }
        };

        match word.to_lowercase().as_str() {
            "add" | "a" => Ok(Command::Add),
            "edit" | "e" => row(parts.next()).map(Command::Edit),
            "save" | "s" => Ok(Command::Save),
            "close" | "c" => Ok(Command::Close),
            "delete" | "del" | "d" => row(parts.next()).map(Command::Delete),
            "reload" | "r" => Ok(Command::Reload),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command `{other}`, type `help`")),
        }
    }
}

/// Interactive loop until `quit` or end of input.
pub async fn run<R: BufRead, W: Write>(
    registry: &mut Registry<TerminalSurface<R, W>>,
) -> io::Result<()> {
    registry.start().await;
    registry.surface_mut().say("Type `help` for commands.")?;

    loop {
        let Some(line) = registry.surface_mut().prompt("> ")? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                registry.surface_mut().say(&message)?;
                continue;
            }
        };
        debug!(?command, "console command");

        match command {
            Command::Quit => return Ok(()),
            Command::Help => registry.surface_mut().say(HELP)?,
            Command::Reload => registry.handle(UiEvent::Reload).await,
            Command::Add => {
                if fill_add_form(registry)? {
                    registry.handle(UiEvent::SubmitAdd).await;
                }
            }
            Command::Edit(row) => {
                if registry.table().actions(row).is_none() {
                    registry.surface_mut().say("no such row")?;
                    continue;
                }
                registry.handle(UiEvent::OpenEdit(row)).await;
                if !fill_overlay(registry)? {
                    continue;
                }
                let save = registry
                    .surface_mut()
                    .prompt("Save changes? [Y/n] ")?
                    .map(|answer| !matches!(answer.trim().to_lowercase().as_str(), "n" | "no"))
                    .unwrap_or(false);
                let event = if save {
                    UiEvent::SubmitEdit
                } else {
                    UiEvent::OverlayClick(OverlayClick::CloseControl)
                };
                registry.handle(event).await;
            }
            Command::Save => registry.handle(UiEvent::SubmitEdit).await,
            Command::Close => {
                registry
                    .handle(UiEvent::OverlayClick(OverlayClick::CloseControl))
                    .await
            }
            Command::Delete(row) => {
                if registry.table().actions(row).is_none() {
                    registry.surface_mut().say("no such row")?;
                    continue;
                }
                registry.handle(UiEvent::Delete(row)).await;
            }
        }
    }
}

/// Prompts every add-form input; `false` if input ran out midway.
fn fill_add_form<R: BufRead, W: Write>(
    registry: &mut Registry<TerminalSurface<R, W>>,
) -> io::Result<bool> {
    for field in Field::ALL {
        let current = registry.add_form().get(field).to_string();
        let prompt = if current.is_empty() {
            format!("{}: ", field.label())
        } else {
            format!("{} [{current}]: ", field.label())
        };
        let Some(value) = registry.surface_mut().prompt(&prompt)? else {
            return Ok(false);
        };
        if !value.is_empty() {
            registry.fill_add(field, value);
        }
    }
    Ok(true)
}

/// Prompts the editable overlay inputs; an empty answer keeps the value.
fn fill_overlay<R: BufRead, W: Write>(
    registry: &mut Registry<TerminalSurface<R, W>>,
) -> io::Result<bool> {
    for field in Field::EDITABLE {
        let current = registry.overlay().values().get(field).to_string();
        let prompt = format!("{} [{current}]: ", field.label());
        let Some(value) = registry.surface_mut().prompt(&prompt)? else {
            return Ok(false);
        };
        if !value.is_empty() {
            registry.overlay_mut().set(field, value);
        }
    }
    Ok(true)
}
