//! Helper modules
pub mod test_helper;
