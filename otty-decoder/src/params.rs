/// Parameters of a terminated CSI sequence.
///
/// Each `;`-separated field becomes one entry; an empty field is `None`,
/// which tells the command to use its default. The list only exists while a
/// command handler runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<Option<u16>>);

impl Params {
    /// Split `text` on `;` and parse every field.
    ///
    /// Values above `u16::MAX` saturate. Fails with the offending field when
    /// one holds anything but decimal digits.
    pub fn parse(text: &str) -> Result<Self, &str> {
        text.split(';')
            .map(|field| parse_field(field).ok_or(field))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Raw value at `index`, `None` when omitted or absent.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u16> {
        self.0.get(index).copied().flatten()
    }

    /// Value at `index`, or `default` when omitted.
    #[inline]
    pub fn get_or(&self, index: usize, default: u16) -> u16 {
        self.get(index).unwrap_or(default)
    }

    /// Count-like value at `index`: omitted and `0` both mean `default`.
    #[inline]
    pub fn count_or(&self, index: usize, default: u16) -> u16 {
        match self.get(index) {
            Some(0) | None => default,
            Some(value) => value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<u16>> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Option<u16>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Option<u16>>> for Params {
    fn from(values: Vec<Option<u16>>) -> Self {
        Self(values)
    }
}

/// `Some(None)` for an empty field, `None` when the field is invalid.
fn parse_field(field: &str) -> Option<Option<u16>> {
    if field.is_empty() {
        return Some(None);
    }

    field
        .chars()
        .try_fold(0u16, |acc, c| {
            let digit = c.to_digit(10)? as u16;
            Some(acc.saturating_mul(10).saturating_add(digit))
        })
        .map(Some)
}
