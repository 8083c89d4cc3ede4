pub mod json_record_store;
