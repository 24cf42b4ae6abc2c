use crate::{SessionError, SessionResult};
use frame_filter::FilterKind;
use std::{fmt, str::FromStr};

const KEY_ESC: u8 = 27;

/// Logical command tokens understood by a [`crate::FilterSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(FilterKind),
    KernelInc,
    KernelDec,
    SigmaInc,
    SigmaDec,
    ToggleLegend,
    Save,
    Quit,
}

/// What the host loop has to do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Save,
    Quit,
}

impl Command {
    pub fn token(&self) -> &'static str {
        match self {
            Command::Select(FilterKind::None) => "select-none",
            Command::Select(FilterKind::SimpleBlur) => "select-simple-blur",
            Command::Select(FilterKind::GaussianBlur) => "select-gaussian",
            Command::Select(FilterKind::BoxBlur) => "select-box-blur",
            Command::Select(FilterKind::Sharpen) => "select-sharpen",
            Command::Select(FilterKind::EdgeDetect) => "select-edge",
            Command::KernelInc => "kernel-inc",
            Command::KernelDec => "kernel-dec",
            Command::SigmaInc => "sigma-inc",
            Command::SigmaDec => "sigma-dec",
            Command::ToggleLegend => "legend-toggle",
            Command::Save => "save",
            Command::Quit => "quit",
        }
    }

    /// Key glyph shown in the legend.
    pub fn key_hint(&self) -> &'static str {
        match self {
            Command::Select(FilterKind::None) => "0",
            Command::Select(FilterKind::SimpleBlur) => "1",
            Command::Select(FilterKind::GaussianBlur) => "G",
            Command::Select(FilterKind::BoxBlur) => "B",
            Command::Select(FilterKind::Sharpen) => "2",
            Command::Select(FilterKind::EdgeDetect) => "3",
            Command::KernelInc => "+",
            Command::KernelDec => "-",
            Command::SigmaInc => "]",
            Command::SigmaDec => "[",
            Command::ToggleLegend => "L",
            Command::Save => "S",
            Command::Quit => "Q",
        }
    }

    /// Map a raw key code to a command.
    pub fn from_key(key: u8) -> SessionResult<Self> {
        let command = match key {
            b'q' | KEY_ESC => Command::Quit,
            b'0' => Command::Select(FilterKind::None),
            b'1' => Command::Select(FilterKind::SimpleBlur),
            b'g' | b'G' => Command::Select(FilterKind::GaussianBlur),
            b'b' | b'B' => Command::Select(FilterKind::BoxBlur),
            b'2' => Command::Select(FilterKind::Sharpen),
            b'3' => Command::Select(FilterKind::EdgeDetect),
            b'+' | b'=' => Command::KernelInc,
            b'-' | b'_' => Command::KernelDec,
            b']' | b'}' => Command::SigmaInc,
            b'[' | b'{' => Command::SigmaDec,
            b'l' | b'L' => Command::ToggleLegend,
            b's' | b'S' => Command::Save,
            _ => {
                return Err(SessionError::InvalidCommand(format!(
                    "unbound key {:?}",
                    key as char
                )));
            }
        };

        Ok(command)
    }

    pub fn vocabulary() -> &'static [Command] {
        &[
            Command::Select(FilterKind::None),
            Command::Select(FilterKind::SimpleBlur),
            Command::Select(FilterKind::GaussianBlur),
            Command::Select(FilterKind::BoxBlur),
            Command::Select(FilterKind::Sharpen),
            Command::Select(FilterKind::EdgeDetect),
            Command::KernelInc,
            Command::KernelDec,
            Command::SigmaInc,
            Command::SigmaDec,
            Command::ToggleLegend,
            Command::Save,
            Command::Quit,
        ]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Accepts a vocabulary token (`kernel-inc`) or a single bound key (`+`).
impl FromStr for Command {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(command) = Command::vocabulary().iter().find(|c| c.token() == s) {
            return Ok(*command);
        }

        match s.as_bytes() {
            [key] => Command::from_key(*key),
            _ if s.eq_ignore_ascii_case("esc") => Ok(Command::Quit),
            _ => Err(SessionError::InvalidCommand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip() {
        for command in Command::vocabulary() {
            assert_eq!(command.token().parse::<Command>().unwrap(), *command);
            assert_eq!(command.to_string(), command.token());
        }
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key(b'q').unwrap(), Command::Quit);
        assert_eq!(Command::from_key(27).unwrap(), Command::Quit);
        assert_eq!(
            Command::from_key(b'G').unwrap(),
            Command::Select(FilterKind::GaussianBlur)
        );
        assert_eq!(Command::from_key(b'=').unwrap(), Command::KernelInc);
        assert_eq!(Command::from_key(b'_').unwrap(), Command::KernelDec);
        assert_eq!(Command::from_key(b'}').unwrap(), Command::SigmaInc);
        assert_eq!(Command::from_key(b'{').unwrap(), Command::SigmaDec);
        assert!(Command::from_key(b'x').is_err());
    }

    #[test]
    fn test_key_hints_are_bound() {
        for command in Command::vocabulary() {
            let hint = command.key_hint().as_bytes()[0].to_ascii_lowercase();
            assert_eq!(Command::from_key(hint).unwrap(), *command);
        }
    }

    #[test]
    fn test_parse_keys_and_invalid_tokens() {
        assert_eq!(" + ".parse::<Command>().unwrap(), Command::KernelInc);
        assert_eq!("ESC".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            "3".parse::<Command>().unwrap(),
            Command::Select(FilterKind::EdgeDetect)
        );
        assert_eq!(
            "zoom-in".parse::<Command>(),
            Err(SessionError::InvalidCommand("zoom-in".to_string()))
        );
        assert!("".parse::<Command>().is_err());
    }
}
