// Wire-level request descriptors.
//
// A `Request` is what one typed command renders to: a single exec line,
// or an ordered list of lines applied inside one configuration session.

use std::fmt;

use serde::Serialize;

/// CLI mode a request must run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Privileged exec mode (`show ...`).
    Exec,
    /// Global configuration mode; the transport frames the lines with
    /// `configure` / `end`.
    Config,
}

/// One rendered command: a mode and the CLI lines that implement it.
///
/// Exec requests always carry a single line. Config requests carry the
/// ordered lines entered after `configure` (for example
/// `interface Management1` then `ip address 10.1.2.90/24`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    mode: Mode,
    lines: Vec<String>,
}

impl Request {
    pub fn exec(line: impl Into<String>) -> Self {
        Self {
            mode: Mode::Exec,
            lines: vec![line.into()],
        }
    }

    pub fn config<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: Mode::Config,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Exec => write!(f, "{}", self.lines.join("; ")),
            Mode::Config => write!(f, "configure: {}", self.lines.join("; ")),
        }
    }
}
