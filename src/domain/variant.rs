use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::mapping::schema::{self, SheetSchema};

/// The three kinds of accounting records that are synced, each one landing on its own sheet tab.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Variant {
    #[strum(to_string = "expense", serialize = "expenses", serialize = "depenses")]
    Expense,
    #[strum(to_string = "invoice", serialize = "invoices", serialize = "factures")]
    Invoice,
    #[strum(to_string = "quotation", serialize = "quotations", serialize = "devis")]
    Quotation,
}

impl Variant {
    /// Path segment of the accounting API listing endpoint.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Variant::Expense => "expenses",
            Variant::Invoice => "invoices",
            Variant::Quotation => "quotations",
        }
    }

    /// File name of the JSON snapshot written by `fetch`.
    pub fn snapshot_file_name(&self) -> &'static str {
        match self {
            Variant::Expense => "axonaut_depenses.json",
            Variant::Invoice => "axonaut_invoices.json",
            Variant::Quotation => "axonaut_devis.json",
        }
    }

    pub fn schema(&self) -> &'static SheetSchema {
        schema::schema_for(*self)
    }
}
