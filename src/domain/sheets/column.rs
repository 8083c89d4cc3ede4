use std::fmt::Formatter;

/// 1-based spreadsheet column (`A` is 1).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Column(u32);

impl Column {
    pub const A: Column = Column(1);

    /// Clamps zero to `A`, there is no column before it.
    pub fn new(value: u32) -> Self {
        Column(value.max(1))
    }

    /// Last column of a row that is `width` cells wide, starting at `A`.
    pub fn last_of_width(width: usize) -> Self {
        Column::new(u32::try_from(width).unwrap_or(u32::MAX))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column(u32: {}, letters: {})", self.0, self)
    }
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}
