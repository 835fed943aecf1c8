//! spendsearch-parse - Show how search queries are parsed.
//!
//! Prints the recognized ranges and the autocomplete target of each query.

fn main() -> std::process::ExitCode {
    spendsearch::cmd::parse::main()
}
