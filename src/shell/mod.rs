/*!
 * Interactive Shell
 *
 * Menu-driven front end over a page allocator. Reads whitespace-separated
 * answers from any buffered reader and writes prompts and results to any
 * writer, so sessions can be scripted in tests.
 */

mod command;
mod input;
pub mod render;

pub use command::{MenuChoice, MENU};
pub use input::TokenReader;

use crate::config::PoolConfig;
use crate::memory::{Allocator, MemoryInfo};
use crate::monitoring::CommandSpan;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use tracing::debug;

/// Interactive session bound to one allocator
pub struct Shell<A, R, W> {
    allocator: A,
    input: TokenReader<R>,
    output: W,
    unit_label: String,
    map_width: usize,
    commands_run: u64,
}

impl<A, R, W> Shell<A, R, W>
where
    A: Allocator + MemoryInfo,
    R: BufRead,
    W: Write,
{
    pub fn new(allocator: A, config: &PoolConfig, input: R, output: W) -> Self {
        Self {
            allocator,
            input: TokenReader::new(input),
            output,
            unit_label: config.unit_label.clone(),
            map_width: config.map_width,
            commands_run: 0,
        }
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Consume the shell, returning the allocator and the output sink
    pub fn into_parts(self) -> (A, W) {
        (self.allocator, self.output)
    }

    /// Run the menu loop until Exit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let policy = self.allocator.stats().policy;
        writeln!(self.output, "Using {} algorithm\n", policy.describe())?;
        writeln!(self.output, "{}", MENU)?;

        loop {
            self.prompt("choice - ")?;
            let Some(token) = self.input.next_token()? else {
                debug!("End of input, leaving menu loop");
                break;
            };

            let flow = match MenuChoice::parse(&token) {
                Some(choice) => self.dispatch(choice)?,
                None => {
                    write!(self.output, "Invalid choice")?;
                    ControlFlow::Continue(())
                }
            };
            write!(self.output, "\n\n")?;

            if flow.is_break() {
                break;
            }
        }
        self.output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<ControlFlow<()>> {
        self.commands_run += 1;
        let span = CommandSpan::new(choice.name(), self.commands_run);

        match choice {
            MenuChoice::AddProgram => self.add_program(&span),
            MenuChoice::KillProgram => self.kill_program(&span),
            MenuChoice::Fragmentation => {
                let count = span.in_scope(|| self.allocator.fragment_count());
                span.record_result(true);
                write!(self.output, "{}", render::fragments(count))?;
                Ok(ControlFlow::Continue(()))
            }
            MenuChoice::PrintMemory => {
                let grid = span.in_scope(|| {
                    render::format_map(&self.allocator.render_map(), self.map_width)
                });
                span.record_result(true);
                write!(self.output, "{}", grid)?;
                Ok(ControlFlow::Continue(()))
            }
            MenuChoice::Exit => {
                span.record_result(true);
                Ok(ControlFlow::Break(()))
            }
        }
    }

    fn add_program(&mut self, span: &CommandSpan) -> io::Result<ControlFlow<()>> {
        self.prompt("Program name - ")?;
        let Some(name) = self.input.next_token()? else {
            return Ok(ControlFlow::Break(()));
        };
        let size_prompt = format!("Program size ({}) - ", self.unit_label);
        self.prompt(&size_prompt)?;
        let Some(size) = self.input.next_token()? else {
            return Ok(ControlFlow::Break(()));
        };

        let line = match size.parse::<i64>() {
            Ok(units) => match span.in_scope(|| self.allocator.allocate(units, &name)) {
                Ok(pages) => {
                    span.record_result(true);
                    render::added(&name, pages)
                }
                Err(err) => {
                    span.record_result(false);
                    render::add_failed(&name, &err)
                }
            },
            Err(_) => {
                span.record_result(false);
                debug!(program = %name, size = %size, "Size is not an integer");
                render::invalid_size(&name)
            }
        };
        write!(self.output, "{}", line)?;
        Ok(ControlFlow::Continue(()))
    }

    fn kill_program(&mut self, span: &CommandSpan) -> io::Result<ControlFlow<()>> {
        self.prompt("Program name - ")?;
        let Some(name) = self.input.next_token()? else {
            return Ok(ControlFlow::Break(()));
        };

        let line = match span.in_scope(|| self.allocator.free(&name)) {
            Ok(pages) => {
                span.record_result(true);
                render::killed(&name, pages)
            }
            Err(err) => {
                span.record_result(false);
                render::kill_failed(&name, &err)
            }
        };
        write!(self.output, "{}", line)?;
        Ok(ControlFlow::Continue(()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }
}
