//! Exit codes for the rackapi binary
//!
//! A run that reached the server exits with 0 even when some calls produced
//! no response; those are reported in the log and by the missing output
//! files. These codes cover failures before or around the run.

/// Exit codes following the BSD sysexits.h conventions
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RackApiExitCode {
    /// Command line usage error (64) - User input error
    UsageError = exitcode::USAGE,

    /// Cannot create output file (73) - Output directory or file not writable
    CantCreate = exitcode::CANTCREAT,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = exitcode::SOFTWARE,

    /// Input/output error (74) - Terminal interaction failed
    IoError = exitcode::IOERR,

    /// Configuration error (78) - Application configuration issue
    ConfigError = exitcode::CONFIG,
}

impl RackApiExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }
}
