//! Summarization server binary.
//! Run with: cargo run --bin summarizer-server

use std::process::ExitCode;

use convo_summarizer::start_server;

fn main() -> ExitCode {
    start_server::run()
}
