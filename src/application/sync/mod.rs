pub mod clean_empty_rows;
pub mod sync_routine;
