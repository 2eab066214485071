//! Line sources the menu reads from. The menu only sees [`LineSource`], so a
//! real terminal, piped stdin and scripted test input are interchangeable.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use thiserror::Error;

use super::interrupt;

/// How often the terminal editor wakes up to look for a SIGINT.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Why a prompt did not produce a line.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Ctrl-C, SIGINT, Ctrl-D on an empty line, or the end of input.
    #[error("input interrupted")]
    Interrupted,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Something that yields one line of user input at a time, without the
/// trailing newline.
pub trait LineSource {
    fn read_line(&mut self) -> Result<String, PromptError>;
}

/// Interactive line editor on top of crossterm key events. Raw mode lets us
/// see Ctrl-C as a key press instead of a signal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

/// Keeps the terminal in raw mode for as long as it lives.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// What a single key press does to the line being edited.
#[derive(Debug, PartialEq, Eq)]
enum Edit {
    Insert(char),
    Erase,
    Submit,
    Interrupt,
    Ignore,
}

fn classify(key: &KeyEvent, line_is_empty: bool) -> Edit {
    if key.kind != KeyEventKind::Press {
        return Edit::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Edit::Interrupt,
            KeyCode::Char('d') if line_is_empty => Edit::Interrupt,
            _ => Edit::Ignore,
        };
    }

    match key.code {
        KeyCode::Enter => Edit::Submit,
        KeyCode::Backspace => Edit::Erase,
        KeyCode::Char(ch) if !ch.is_control() => Edit::Insert(ch),
        _ => Edit::Ignore,
    }
}

impl LineSource for TerminalInput {
    fn read_line(&mut self) -> Result<String, PromptError> {
        let _raw = RawModeGuard::enable()?;
        let mut stdout = io::stdout();
        let mut line = String::new();

        loop {
            if interrupt::take_pending() {
                write!(stdout, "\r\n")?;
                stdout.flush()?;
                return Err(PromptError::Interrupted);
            }
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };

            match classify(&key, line.is_empty()) {
                Edit::Insert(ch) => {
                    line.push(ch);
                    write!(stdout, "{ch}")?;
                }
                Edit::Erase => {
                    if line.pop().is_some() {
                        write!(stdout, "\u{8} \u{8}")?;
                    }
                }
                Edit::Submit => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(line);
                }
                Edit::Interrupt => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Err(PromptError::Interrupted);
                }
                Edit::Ignore => {}
            }
            stdout.flush()?;
        }
    }
}

/// Plain buffered reader for piped input. End of input is treated like an
/// interrupt so a script that runs out of lines still exits cleanly.
pub struct StdinInput<R> {
    reader: R,
}

impl StdinInput<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> StdinInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for StdinInput<R> {
    /// Reads up to the next newline. A read cut short by SIGINT surfaces as
    /// `EINTR`, which is where the pending flag gets checked.
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut bytes = Vec::new();
        loop {
            if interrupt::take_pending() {
                return Err(PromptError::Interrupted);
            }

            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };

            if available.is_empty() {
                if bytes.is_empty() {
                    return Err(PromptError::Interrupted);
                }
                break;
            }

            match available.iter().position(|&byte| byte == b'\n') {
                Some(idx) => {
                    bytes.extend_from_slice(&available[..=idx]);
                    self.reader.consume(idx + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    bytes.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        let line = String::from_utf8(bytes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Pre-recorded answers, consumed in order. Running out counts as an
/// interrupt.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self) -> Result<String, PromptError> {
        self.lines.pop_front().ok_or(PromptError::Interrupted)
    }
}
