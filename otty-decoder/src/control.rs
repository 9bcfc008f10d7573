use std::fmt;

/// Control meanings recognized by the decoder outside of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlByte {
    /// (BEL, Caret = ^G, C = \a) Bell, triggers the bell listeners.
    Bell,
    /// (BS, Caret = ^H, C = \b) Backspace, moves the cursor one column left.
    Backspace,
    /// (HT, Caret = ^I, C = \t) Horizontal Tabulation, inserts one space.
    HorizontalTab,
    /// (LF, Caret = ^J, C = \n) Linefeed, moves to column 1 of the next row.
    LineFeed,
    /// (CR, Caret = ^M, C = \r) Carriage Return, moves to column 1.
    CarriageReturn,
    /// (ESC, Caret = ^[) Escape, starts an escape sequence.
    Escape,
    /// (`[`) Control Sequence Introducer when it follows Escape.
    CsiIntroducer,
}

impl ControlByte {
    /// Classify a code unit seen outside of an escape sequence.
    ///
    /// `[` is never reported here because it only introduces a CSI while
    /// an escape is pending; see [`ControlByte::is_csi_introducer`].
    pub fn classify(unit: char) -> Option<Self> {
        use ControlByte::*;
        match unit {
            '\x07' => Some(Bell),
            '\x08' => Some(Backspace),
            '\x09' => Some(HorizontalTab),
            '\x0A' => Some(LineFeed),
            '\x0D' => Some(CarriageReturn),
            '\x1B' => Some(Escape),
            _ => None,
        }
    }

    /// Whether `unit` turns a pending escape into a CSI sequence.
    #[inline]
    pub fn is_csi_introducer(unit: char) -> bool {
        unit == '['
    }
}

impl fmt::Display for ControlByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ControlByte::*;
        let code = match self {
            Bell => "BEL",
            Backspace => "BS",
            HorizontalTab => "HT",
            LineFeed => "LF",
            CarriageReturn => "CR",
            Escape => "ESC",
            CsiIntroducer => "CSI",
        };

        write!(f, "{code}")
    }
}

/// Letter used to echo a C0 control code in caret notation (`0x01` -> `A`).
///
/// Returns `None` for anything outside of the C0 range.
pub fn caret_notation(unit: char) -> Option<char> {
    let code = u32::from(unit);
    if code < 0x20 {
        char::from_u32(code + 0x40)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_test() {
        let cases = vec![
            ('\x07', Some(ControlByte::Bell)),
            ('\x08', Some(ControlByte::Backspace)),
            ('\t', Some(ControlByte::HorizontalTab)),
            ('\n', Some(ControlByte::LineFeed)),
            ('\r', Some(ControlByte::CarriageReturn)),
            ('\x1b', Some(ControlByte::Escape)),
            ('[', None),
            ('\x01', None),
            ('\x0B', None),
            ('\x7F', None),
            ('\u{85}', None),
            ('a', None),
        ];

        for (input, expected) in cases {
            assert_eq!(ControlByte::classify(input), expected, "{input:?}");
        }
    }

    #[test]
    fn csi_introducer_is_only_bracket() {
        assert!(ControlByte::is_csi_introducer('['));
        assert!(!ControlByte::is_csi_introducer(']'));
        assert!(!ControlByte::is_csi_introducer('\x1b'));
    }

    #[test]
    fn caret_notation_covers_c0_only() {
        assert_eq!(caret_notation('\x00'), Some('@'));
        assert_eq!(caret_notation('\x01'), Some('A'));
        assert_eq!(caret_notation('\x1A'), Some('Z'));
        assert_eq!(caret_notation('\x1F'), Some('_'));
        assert_eq!(caret_notation(' '), None);
        assert_eq!(caret_notation('\x7F'), None);
    }

    #[test]
    fn display_uses_mnemonics() {
        assert_eq!(ControlByte::LineFeed.to_string(), "LF");
        assert_eq!(ControlByte::CsiIntroducer.to_string(), "CSI");
    }
}
