/// Argument Parsing
pub mod args;
/// Main dplc code.
pub mod dplc;
/// Logging setup
pub mod logging;
