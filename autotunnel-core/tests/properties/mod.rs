//! Property test modules

mod dialect_tests;
mod naming_tests;
mod policy_tests;
