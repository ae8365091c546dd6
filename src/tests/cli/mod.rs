//! CLI helper tests.
