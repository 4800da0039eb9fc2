//! Log assertions shared by the unit tests.
//!
//! **Note**: only compiled for tests. Call `testing_logger::setup()` at the start of the test before using these.
