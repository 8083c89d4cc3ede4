use std::fmt::Formatter;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    /// Returns the row number as a 1-based index, the way spreadsheets show it.
    /// # Examples
    /// ```
    /// use axonaut_sheets::domain::sheets::row::Row;
    /// let row = Row::from_index(0);
    /// assert_eq!(row.number(), 1);
    /// let row = Row::from_index(1222);
    /// assert_eq!(row.number(), 1223);
    /// ```
    pub fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    /// Returns the row index as a zero-based index, as the Sheets batch API expects it.
    /// # Examples
    /// ```
    /// use axonaut_sheets::domain::sheets::row::Row;
    /// let row = Row::from_row(5);
    /// assert_eq!(row.index(), 4);
    /// ```
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.number())
    }
}
