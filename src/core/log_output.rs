//! Output target flags
//!
//! A [`LogOutput`] is a bit set selecting which targets a line is written
//! to. Flags combine with `|`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogOutput(u8);

impl LogOutput {
    pub const NONE: LogOutput = LogOutput(0);
    pub const DEBUG: LogOutput = LogOutput(1);
    pub const CONSOLE: LogOutput = LogOutput(2);
    pub const FILE: LogOutput = LogOutput(4);
    pub const ALL: LogOutput = LogOutput(1 | 2 | 4);

    const NAMED: [(LogOutput, &'static str); 3] = [
        (LogOutput::DEBUG, "DEBUG"),
        (LogOutput::CONSOLE, "CONSOLE"),
        (LogOutput::FILE, "FILE"),
    ];

    /// Build from raw bits, ignoring unknown ones
    pub const fn from_bits_truncate(bits: u8) -> Self {
        LogOutput(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is also set in `self`
    pub const fn contains(self, other: LogOutput) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for LogOutput {
    fn default() -> Self {
        LogOutput::ALL
    }
}

impl BitOr for LogOutput {
    type Output = LogOutput;

    fn bitor(self, rhs: LogOutput) -> LogOutput {
        LogOutput(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogOutput {
    fn bitor_assign(&mut self, rhs: LogOutput) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LogOutput {
    type Output = LogOutput;

    fn bitand(self, rhs: LogOutput) -> LogOutput {
        LogOutput(self.0 & rhs.0)
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(" | "))
    }
}

impl FromStr for LogOutput {
    type Err = String;

    /// Parse `"console | file"`, `"all"` or `"none"` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut output = LogOutput::NONE;
        for part in s.split('|').map(str::trim) {
            output |= match part.to_uppercase().as_str() {
                "DEBUG" => LogOutput::DEBUG,
                "CONSOLE" => LogOutput::CONSOLE,
                "FILE" => LogOutput::FILE,
                "ALL" => LogOutput::ALL,
                "NONE" => LogOutput::NONE,
                _ => return Err(format!("Invalid log output: '{}'", part)),
            };
        }
        Ok(output)
    }
}
