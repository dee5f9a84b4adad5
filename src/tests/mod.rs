// Test helper utilities shared across test modules
mod test_helpers;

mod title_tests;

mod command_tests;
