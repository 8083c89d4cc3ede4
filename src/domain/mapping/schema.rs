// For now, column layouts are hardcoded to match the sheet tabs as they are laid out by hand

use crate::domain::sheets::locator::AppendPolicy;
use crate::domain::variant::Variant;

/// Where a column takes its value from inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Field(&'static str),
    /// `parent.child`, one mapping deep.
    Nested(&'static str, &'static str),
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldPath::Field(field) => write!(f, "{}", field),
            FieldPath::Nested(parent, child) => write!(f, "{}.{}", parent, child),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    Source(FieldPath),
    /// Column left empty, filled by hand in the sheet.
    Blank,
}

const fn field(name: &'static str) -> ColumnRule {
    ColumnRule::Source(FieldPath::Field(name))
}

const fn nested(parent: &'static str, child: &'static str) -> ColumnRule {
    ColumnRule::Source(FieldPath::Nested(parent, child))
}

#[derive(Debug, PartialEq, Eq)]
pub struct SheetSchema {
    pub variant: Variant,
    pub columns: &'static [ColumnRule],
    pub append: AppendPolicy,
}

impl SheetSchema {
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

pub mod expense {
    use super::*;

    pub const COLUMNS: &[ColumnRule] = &[
        field("date"),
        field("supplier_name"),
        ColumnRule::Blank,
        ColumnRule::Blank,
        ColumnRule::Blank,
        field("pre_tax_amount"),
        field("total_amount"),
        field("pre_tax_amount"),
    ];
}

pub mod invoice {
    use super::*;

    pub const COLUMNS: &[ColumnRule] = &[
        field("number"),
        field("date"),
        nested("company", "name"),
        ColumnRule::Blank,
        field("pre_tax_amount"),
        field("tax_amount"),
        field("total"),
        field("due_date"),
        field("paid_date"),
    ];
}

pub mod quotation {
    use super::*;

    /// The quotation tab has leftover content further down, so a scan for the first
    /// empty cell lands in the wrong place. New quotations always start here.
    pub const FIRST_APPEND_ROW: u32 = 1223;

    pub const COLUMNS: &[ColumnRule] = &[
        field("number"),
        field("date"),
        nested("company", "name"),
        field("title"),
        field("status"),
        field("pre_tax_amount"),
        field("tax_amount"),
        field("total_amount"),
    ];
}

static EXPENSE_SCHEMA: SheetSchema = SheetSchema {
    variant: Variant::Expense,
    columns: expense::COLUMNS,
    append: AppendPolicy::FirstEmpty,
};

static INVOICE_SCHEMA: SheetSchema = SheetSchema {
    variant: Variant::Invoice,
    columns: invoice::COLUMNS,
    append: AppendPolicy::FirstEmpty,
};

static QUOTATION_SCHEMA: SheetSchema = SheetSchema {
    variant: Variant::Quotation,
    columns: quotation::COLUMNS,
    append: AppendPolicy::FixedRow(quotation::FIRST_APPEND_ROW),
};

pub fn schema_for(variant: Variant) -> &'static SheetSchema {
    match variant {
        Variant::Expense => &EXPENSE_SCHEMA,
        Variant::Invoice => &INVOICE_SCHEMA,
        Variant::Quotation => &QUOTATION_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_widths() {
        assert_eq!(schema_for(Variant::Expense).width(), 8);
        assert_eq!(schema_for(Variant::Invoice).width(), 9);
        assert_eq!(schema_for(Variant::Quotation).width(), 8);
    }

    #[test]
    fn test_only_quotation_uses_a_fixed_row() {
        assert_eq!(schema_for(Variant::Expense).append, AppendPolicy::FirstEmpty);
        assert_eq!(schema_for(Variant::Invoice).append, AppendPolicy::FirstEmpty);
        assert_eq!(
            schema_for(Variant::Quotation).append,
            AppendPolicy::FixedRow(1223)
        );
    }

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::Field("date").to_string(), "date");
        assert_eq!(
            FieldPath::Nested("company", "name").to_string(),
            "company.name"
        );
    }
}
