//! Proof paths and their verification.

mod step;
pub use step::{PathStep, PathStepBranch, Sibling};

mod path;
pub use path::Path;

mod result;
pub use result::VerificationResult;

mod rlp;
