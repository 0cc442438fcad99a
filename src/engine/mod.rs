pub mod scanner;

pub use scanner::{ScanError, ScanOutcome, Scanner};
