//! Integration tests

mod app_tests;
mod launcher_tests;
mod store_tests;
mod support;
