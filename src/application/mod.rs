pub mod service;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;
