//! The read/evaluate/print loop.
//!
//! [`Shell`] is generic over its input and output so the same loop drives a
//! real terminal and in-memory buffers in tests. Coordinates outside the
//! world are reported and the loop continues; only I/O failures and world
//! bugs end it early.

use std::io::{BufRead, Write};

use eventgrid_types::Coordinate;
use eventgrid_world::{World, WorldError};
use tracing::{debug, warn};

use crate::command::{Command, parse_command};
use crate::config::OutputFormat;
use crate::error::ShellError;

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Per-session behaviour of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    /// Maximum results per search.
    pub result_limit: usize,
    /// How results are rendered.
    pub format: OutputFormat,
    /// Wait for Enter and clear the screen after each command.
    pub pause_between_commands: bool,
}

/// Interactive session over a generated world.
pub struct Shell<'w, R, W> {
    world: &'w World,
    input: R,
    output: W,
    options: ShellOptions,
}

impl<'w, R: BufRead, W: Write> Shell<'w, R, W> {
    /// Create a session reading commands from `input` and writing to
    /// `output`.
    pub const fn new(world: &'w World, input: R, output: W, options: ShellOptions) -> Self {
        Self {
            world,
            input,
            output,
            options,
        }
    }

    /// Run until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] if the terminal cannot be read or written,
    /// [`ShellError::Json`] if JSON rendering fails, or
    /// [`ShellError::World`] if the world reports anything other than an
    /// out-of-range coordinate.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            self.prompt()?;
            let Some(line) = self.read_line()? else {
                debug!("input closed");
                break;
            };

            match parse_command(&line) {
                Ok(Command::Exit) => break,
                Ok(Command::Search(at)) => self.search(at)?,
                Ok(Command::Inspect(at)) => self.inspect(at)?,
                Err(e) => {
                    debug!(input = line.trim(), "unparseable command");
                    writeln!(self.output, "{e}")?;
                }
            }

            if !self.pause()? {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<(), ShellError> {
        writeln!(
            self.output,
            "Enter a pair of coordinates (x, y) or type 'exit' to finish."
        )?;
        writeln!(
            self.output,
            "Coordinates can be prefixed with a question mark (? x, y) to query the events at a cell"
        )?;
        write!(self.output, "Enter coordinates: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Wait for Enter and clear the screen. Returns `false` if input ended
    /// while waiting.
    fn pause(&mut self) -> Result<bool, ShellError> {
        if !self.options.pause_between_commands {
            return Ok(true);
        }
        writeln!(self.output)?;
        writeln!(self.output, "Press <Enter> to search again")?;
        self.output.flush()?;
        if self.read_line()?.is_none() {
            return Ok(false);
        }
        write!(self.output, "{CLEAR_SCREEN}")?;
        Ok(true)
    }

    fn search(&mut self, at: Coordinate) -> Result<(), ShellError> {
        let world = self.world;
        let results = match world.search_nearby_events(at.x, at.y, self.options.result_limit) {
            Ok(results) => results,
            Err(e) => return self.report(at, e),
        };
        debug!(centre = %at, results = results.len(), "search served");

        match self.options.format {
            OutputFormat::Text if results.is_empty() => {
                writeln!(self.output, "No events with available tickets found")?;
            }
            OutputFormat::Text => {
                for result in &results {
                    writeln!(self.output, "{result}")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.output, &results)?;
                writeln!(self.output)?;
            }
        }
        Ok(())
    }

    fn inspect(&mut self, at: Coordinate) -> Result<(), ShellError> {
        let world = self.world;
        let cell = match world.locate_cell(at.x, at.y) {
            Ok(cell) => cell,
            Err(e) => return self.report(at, e),
        };

        match self.options.format {
            OutputFormat::Text => write!(self.output, "{cell}")?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.output, cell)?;
                writeln!(self.output)?;
            }
        }
        Ok(())
    }

    /// Print a recoverable world error, or escalate anything else.
    fn report(&mut self, at: Coordinate, error: WorldError) -> Result<(), ShellError> {
        if !error.is_range_error() {
            return Err(error.into());
        }
        warn!(coordinate = %at, error = %error, "coordinate rejected");
        writeln!(self.output, "Error: {error}")?;
        Ok(())
    }
}
