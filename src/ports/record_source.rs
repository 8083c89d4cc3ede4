use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{record::DomainRecord, variant::Variant};

#[derive(Error, Debug)]
pub enum RecordSourceError {
    #[error("Failed to fetch {0} records")]
    FetchFailed(Variant),
}

/// Optional date bounds applied by the accounting API, both inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        Self { after, before }
    }

    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }
}

#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_records(
        &self,
        variant: Variant,
        window: DateWindow,
    ) -> error_stack::Result<Vec<DomainRecord>, RecordSourceError>;
}
