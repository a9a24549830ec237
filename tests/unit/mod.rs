//! Unit test modules.

mod access_test;
mod aggregator_test;
mod parser_test;
mod spreadsheet_test;
