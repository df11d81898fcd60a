pub mod common;
mod fetcher_tests;
mod submitter_tests;
