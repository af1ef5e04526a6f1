//! Exit codes for the procview CLI.
//!
//! Exit codes communicate operation outcome without requiring output
//! parsing. The values follow the host shell's return-level convention
//! (0 = ok, 5 = warning, 20 = failure) so scripts can branch on severity.

/// Exit codes for procview invocations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Normal completion, a successful search match, or a version query.
    Ok = 0,

    /// Parsed and ran, but the search found no match, or the walk was
    /// interrupted after partial output.
    Warn = 5,

    /// Argument parse error, out-of-range process number, oversized or
    /// uncompilable pattern, or an unrecoverable output error.
    Fail = 20,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Whether this code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        matches!(self, ExitCode::Fail)
    }

    /// The code name as a string constant.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Ok => "OK",
            ExitCode::Warn => "WARN",
            ExitCode::Fail => "FAIL",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
