use core::fmt;

/// Outcome of verifying a proof path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerificationResult {
    path_valid: bool,
    path_included: bool,
}

impl VerificationResult {
    /// Creates a result from its two flags.
    pub const fn new(path_valid: bool, path_included: bool) -> Self {
        Self { path_valid, path_included }
    }

    /// Result of a malformed path: neither valid nor included.
    pub const fn invalid() -> Self {
        Self::new(false, false)
    }

    /// Returns `true` if the path hashes up to the root hash and aggregate it carries.
    pub const fn is_path_valid(&self) -> bool {
        self.path_valid
    }

    /// Returns `true` if the path ends in a leaf stored at exactly the queried path.
    pub const fn is_path_included(&self) -> bool {
        self.path_included
    }

    /// Returns `true` if the path is both valid and included.
    pub const fn is_successful(&self) -> bool {
        self.path_valid && self.path_included
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "valid: {}, included: {}", self.path_valid, self.path_included)
    }
}
