use crate::domain::variant::Variant;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Path to the service account JSON key.
    pub priv_key: Box<str>,
    pub spreadsheet_id: Box<str>,
    #[serde(default)]
    pub tabs: SheetTabsConfig,
}

impl SpreadsheetConfig {
    pub fn sheet_title(&self, variant: Variant) -> &str {
        self.tabs.title(variant)
    }
}

/// Titles of the destination tabs, one per record kind.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct SheetTabsConfig {
    #[serde(default = "default_expense_tab")]
    pub expense: Box<str>,
    #[serde(default = "default_invoice_tab")]
    pub invoice: Box<str>,
    #[serde(default = "default_quotation_tab")]
    pub quotation: Box<str>,
}

impl SheetTabsConfig {
    pub fn title(&self, variant: Variant) -> &str {
        match variant {
            Variant::Expense => &self.expense,
            Variant::Invoice => &self.invoice,
            Variant::Quotation => &self.quotation,
        }
    }
}

impl Default for SheetTabsConfig {
    fn default() -> Self {
        Self {
            expense: default_expense_tab(),
            invoice: default_invoice_tab(),
            quotation: default_quotation_tab(),
        }
    }
}

fn default_expense_tab() -> Box<str> {
    "TABLEAU DÉPENSES".into()
}

fn default_invoice_tab() -> Box<str> {
    "TABLEAU FACTURES".into()
}

fn default_quotation_tab() -> Box<str> {
    "TABLEAU DEVIS".into()
}
