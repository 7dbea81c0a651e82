//! Unified error type for Strongroom operations
//!
//! Every fallible predicate in the registry yields one of the categorical kinds
//! below and aborts the whole operation. The numeric codes are part of the
//! observable contract and must stay bit-exact for existing callers.

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Unified error type for all registry operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RegistryError {
    /// Referenced record (or lock entry) does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// What was not found
        message: String,
    },

    /// Entry already present, or a lock already in effect
    #[error("Duplicate entry: {message}")]
    DuplicateEntry {
        /// What collided
        message: String,
    },

    /// Name outside the accepted length bounds
    #[error("Title validation failed: {message}")]
    TitleValidation {
        /// Which bound was violated
        message: String,
    },

    /// Size, duration or text length outside the accepted bounds
    #[error("Size validation failed: {message}")]
    SizeValidation {
        /// Which bound was violated
        message: String,
    },

    /// Caller lacks the authority the operation requires
    #[error("Unauthorized access: {message}")]
    UnauthorizedAccess {
        /// Which authority was missing
        message: String,
    },

    /// Caller is not the recorded owner
    #[error("Owner verification failed: {message}")]
    OwnerVerification {
        /// Error message describing the ownership mismatch
        message: String,
    },

    /// Administrator privileges required, or blocked by emergency lockdown
    #[error("Admin privileges: {message}")]
    AdminPrivileges {
        /// Error message describing the privilege failure
        message: String,
    },

    /// Caller may not view the record
    #[error("View permissions: {message}")]
    ViewPermissions {
        /// Error message describing the view denial
        message: String,
    },

    /// Tag list, phase list or authorization level outside bounds
    #[error("Tag validation failed: {message}")]
    TagValidation {
        /// Which bound was violated
        message: String,
    },

    /// Persistence backend failed; the operation was rolled back
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the backend failure
        message: String,
    },
}

impl RegistryError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a duplicate entry error
    pub fn duplicate_entry(message: impl Into<String>) -> Self {
        Self::DuplicateEntry {
            message: message.into(),
        }
    }

    /// Create a title validation error
    pub fn title_validation(message: impl Into<String>) -> Self {
        Self::TitleValidation {
            message: message.into(),
        }
    }

    /// Create a size validation error
    pub fn size_validation(message: impl Into<String>) -> Self {
        Self::SizeValidation {
            message: message.into(),
        }
    }

    /// Create an unauthorized access error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::UnauthorizedAccess {
            message: message.into(),
        }
    }

    /// Create an owner verification error
    pub fn owner_verification(message: impl Into<String>) -> Self {
        Self::OwnerVerification {
            message: message.into(),
        }
    }

    /// Create an admin privileges error
    pub fn admin_privileges(message: impl Into<String>) -> Self {
        Self::AdminPrivileges {
            message: message.into(),
        }
    }

    /// Create a view permissions error
    pub fn view_permissions(message: impl Into<String>) -> Self {
        Self::ViewPermissions {
            message: message.into(),
        }
    }

    /// Create a tag validation error
    pub fn tag_validation(message: impl Into<String>) -> Self {
        Self::TagValidation {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Numeric code reported to callers
    pub fn code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::DuplicateEntry { .. } => 409,
            Self::TitleValidation { .. } => 422,
            Self::SizeValidation { .. } => 423,
            Self::UnauthorizedAccess { .. } => 403,
            Self::OwnerVerification { .. } => 401,
            Self::AdminPrivileges { .. } => 405,
            Self::ViewPermissions { .. } => 406,
            Self::TagValidation { .. } => 407,
            Self::Storage { .. } => 500,
        }
    }

    /// Short stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not-found",
            Self::DuplicateEntry { .. } => "duplicate-entry",
            Self::TitleValidation { .. } => "title-validation",
            Self::SizeValidation { .. } => "size-validation",
            Self::UnauthorizedAccess { .. } => "unauthorized-access",
            Self::OwnerVerification { .. } => "owner-verification",
            Self::AdminPrivileges { .. } => "admin-privileges",
            Self::ViewPermissions { .. } => "view-permissions",
            Self::TagValidation { .. } => "tag-validation",
            Self::Storage { .. } => "storage",
        }
    }
}

/// Standard Result type for registry operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        Self::storage(err.to_string())
    }
}
