//! Integration tests for termimage

mod cli_test;
mod pipeline_test;
mod player_test;
