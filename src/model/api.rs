use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Result of a boolean authorization query such as a permission or access check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDto {
    pub granted: bool,
}
