//! Entry point for the snapshot tests under tests/golden

#[path = "golden/test_golden.rs"]
mod test_golden;
