/// Exit codes of the linkshelf binary, following the BSD sysexits convention.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error, invalid input or a failed command
pub const USAGE: i32 = 64;
