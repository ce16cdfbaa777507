//! Optional caller-supplied context for a verification call

use serde::{Deserialize, Serialize};

/// An Indian administrative location (state and district)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// State name
    pub state: String,
    /// District name
    pub district: String,
}

impl Location {
    /// Create a new location
    pub fn new(state: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
        }
    }
}

/// Context accompanying a response
///
/// The crop name drives crop record lookups; the location drives current
/// weather lookups. Both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationContext {
    /// Crop the response talks about (name or alias)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_name: Option<String>,

    /// Location the response talks about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl VerificationContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Context naming a crop
    pub fn with_crop(mut self, crop_name: impl Into<String>) -> Self {
        self.crop_name = Some(crop_name.into());
        self
    }

    /// Context naming a location
    pub fn with_location(mut self, state: impl Into<String>, district: impl Into<String>) -> Self {
        self.location = Some(Location::new(state, district));
        self
    }
}
