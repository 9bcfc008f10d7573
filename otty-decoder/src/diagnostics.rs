use std::fmt;

use log::debug;

/// Input the decoder consumed without acting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Non-printable code unit at or above 0x20 (DEL, C1 controls).
    UnimplementedControl(char),
    /// Unit following Escape that has no non-CSI meaning.
    UnimplementedEscape(char),
    /// CSI terminated by a letter without a registered command.
    UnimplementedCsi {
        letter: char,
        params: String,
        private: bool,
    },
    /// Escape received while a CSI sequence was still open.
    MalformedSequence { params: String },
    /// Parameter field that is not a decimal `u16`.
    InvalidParameter { letter: char, field: String },
    /// CSI parameter text grew past the configured limit.
    SequenceTooLong { limit: usize },
    /// SM/RM mode the decoder does not implement.
    UnsupportedMode { mode: u16, private: bool },
    /// SGR attribute the decoder does not implement.
    UnsupportedSgr(u16),
    /// Known command called with a selector it does not implement.
    UnsupportedSelector { letter: char, value: u16 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnimplementedControl(unit) => write!(
                f,
                "[unexpected: control_code] 0x{:02X}",
                u32::from(*unit)
            ),
            Self::UnimplementedEscape(unit) => {
                write!(f, "[unexpected: esc] control: {unit:?}")
            },
            Self::UnimplementedCsi {
                letter,
                params,
                private,
            } => {
                let marker = if *private { "?" } else { "" };
                write!(
                    f,
                    "[unexpected: csi] action: {letter:?}, params: {marker}{params:?}"
                )
            },
            Self::MalformedSequence { params } => write!(
                f,
                "[malformed: csi] escape inside sequence, params: {params:?}"
            ),
            Self::InvalidParameter { letter, field } => write!(
                f,
                "[malformed: csi] action: {letter:?}, invalid param: {field:?}"
            ),
            Self::SequenceTooLong { limit } => {
                write!(f, "[malformed: csi] params exceed {limit} bytes")
            },
            Self::UnsupportedMode { mode, private } => {
                let marker = if *private { "?" } else { "" };
                write!(f, "[unexpected: mode] {marker}{mode}")
            },
            Self::UnsupportedSgr(attr) => {
                write!(f, "[unexpected: sgr] attribute: {attr}")
            },
            Self::UnsupportedSelector { letter, value } => write!(
                f,
                "[unexpected: csi] action: {letter:?}, selector: {value}"
            ),
        }
    }
}

/// Sink for [`Diagnostic`]s. Implementations must not block or panic.
pub trait Diagnostics {
    fn record(&mut self, diagnostic: Diagnostic);
}

/// Default sink that forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn record(&mut self, diagnostic: Diagnostic) {
        debug!("{diagnostic}");
    }
}

impl Diagnostics for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
