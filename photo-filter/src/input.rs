use crossbeam::channel::{Receiver, TryRecvError, unbounded};
use filter_session::Command;
use std::{
    collections::VecDeque,
    io::{self, BufRead},
    thread,
};

/// Non-blocking supply of commands, polled once per rendered frame.
pub trait CommandSource {
    fn poll(&mut self) -> Option<Command>;
}

fn parse_token(token: &str) -> Option<Command> {
    match token.parse::<Command>() {
        Ok(command) => Some(command),
        Err(e) => {
            log::warn!("ignored: {e}");
            None
        }
    }
}

/// Fixed list of commands, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    commands: VecDeque<Command>,
}

impl ScriptedCommands {
    /// Unknown tokens are logged and dropped.
    pub fn parse(script: &str) -> Self {
        Self {
            commands: script.split_whitespace().filter_map(parse_token).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandSource for ScriptedCommands {
    fn poll(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }
}

/// Tokens read line by line on a background thread.
pub struct ReaderCommands {
    rx: Receiver<String>,
}

impl ReaderCommands {
    pub fn spawn<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = unbounded();

        thread::spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("read command failed: {e}");
                        break;
                    }
                };

                for token in line.split_whitespace() {
                    if tx.send(token.to_string()).is_err() {
                        return;
                    }
                }
            }

            log::debug!("command reader finished");
        });

        Self { rx }
    }

    pub fn stdin() -> Self {
        Self::spawn(io::BufReader::new(io::stdin()))
    }
}

impl CommandSource for ReaderCommands {
    fn poll(&mut self) -> Option<Command> {
        loop {
            match self.rx.try_recv() {
                Ok(token) => {
                    if let Some(command) = parse_token(&token) {
                        return Some(command);
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommands;

impl CommandSource for NoCommands {
    fn poll(&mut self) -> Option<Command> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_session::FilterKind;
    use std::{
        io::Cursor,
        time::{Duration, Instant},
    };

    #[test]
    fn test_script_skips_invalid_tokens() {
        let mut script = ScriptedCommands::parse("g + zoom ] s\nq");
        assert_eq!(script.len(), 5);

        assert_eq!(script.poll(), Some(Command::Select(FilterKind::GaussianBlur)));
        assert_eq!(script.poll(), Some(Command::KernelInc));
        assert_eq!(script.poll(), Some(Command::SigmaInc));
        assert_eq!(script.poll(), Some(Command::Save));
        assert_eq!(script.poll(), Some(Command::Quit));
        assert_eq!(script.poll(), None);
        assert!(script.is_empty());
    }

    #[test]
    fn test_reader_commands() {
        let mut commands = ReaderCommands::spawn(Cursor::new("sigma-inc bogus\nlegend-toggle\n"));

        let mut received = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while received.len() < 2 && Instant::now() < deadline {
            match commands.poll() {
                Some(command) => received.push(command),
                None => thread::sleep(Duration::from_millis(5)),
            }
        }

        assert_eq!(received, [Command::SigmaInc, Command::ToggleLegend]);
        assert_eq!(commands.poll(), None);
    }

    #[test]
    fn test_no_commands() {
        assert_eq!(NoCommands.poll(), None);
    }
}
