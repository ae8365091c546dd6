//! Format module tests.

mod literal_tests;
