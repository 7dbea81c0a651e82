//! Stateless input validation
//!
//! Bounds count characters, not bytes.

use crate::errors::{RegistryError, RegistryResult};
use crate::identifiers::ActorId;

/// Longest accepted portfolio name
pub const MAX_NAME_LEN: usize = 64;
/// Largest accepted portfolio size
pub const MAX_SIZE: u64 = 1_000_000;
/// Most tags a portfolio may carry
pub const MAX_TAGS: usize = 10;
/// Longest accepted tag
pub const MAX_TAG_LEN: usize = 32;
/// Longest accepted metadata or lock reason
pub const MAX_TEXT_LEN: usize = 128;
/// Longest accepted lock type
pub const MAX_LOCK_TYPE_LEN: usize = 32;
/// Highest locksmith authorization level
pub const MAX_LOCKSMITH_LEVEL: u8 = 5;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Name must be 1 to 64 characters
pub fn validate_name(name: &str) -> RegistryResult<()> {
    let len = char_len(name);
    if len == 0 || len > MAX_NAME_LEN {
        return Err(RegistryError::title_validation(format!(
            "name length {len} outside 1..={MAX_NAME_LEN}"
        )));
    }
    Ok(())
}

/// Size must be 1 to 1,000,000
pub fn validate_size(size: u64) -> RegistryResult<()> {
    if size == 0 || size > MAX_SIZE {
        return Err(RegistryError::size_validation(format!(
            "size {size} outside 1..={MAX_SIZE}"
        )));
    }
    Ok(())
}

/// Tag list must hold 1 to 10 entries of 1 to 32 characters each
pub fn validate_tags(tags: &[String]) -> RegistryResult<()> {
    if tags.is_empty() || tags.len() > MAX_TAGS {
        return Err(RegistryError::tag_validation(format!(
            "{} tags outside 1..={MAX_TAGS}",
            tags.len()
        )));
    }
    if let Some(tag) = tags
        .iter()
        .find(|t| t.is_empty() || char_len(t) > MAX_TAG_LEN)
    {
        return Err(RegistryError::tag_validation(format!(
            "tag {tag:?} outside 1..={MAX_TAG_LEN} characters"
        )));
    }
    Ok(())
}

/// Free text (metadata, lock reason) must be at most 128 characters
pub fn validate_text(field: &str, value: &str) -> RegistryResult<()> {
    if char_len(value) > MAX_TEXT_LEN {
        return Err(RegistryError::size_validation(format!(
            "{field} longer than {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Lock type must be at most 32 characters
pub fn validate_lock_type(lock_type: &str) -> RegistryResult<()> {
    if char_len(lock_type) > MAX_LOCK_TYPE_LEN {
        return Err(RegistryError::size_validation(format!(
            "lock type longer than {MAX_LOCK_TYPE_LEN} characters"
        )));
    }
    Ok(())
}

/// Lock duration must be positive
pub fn validate_duration(duration: u64) -> RegistryResult<()> {
    if duration == 0 {
        return Err(RegistryError::size_validation("lock duration must be positive"));
    }
    Ok(())
}

/// Locksmith level must not exceed 5
pub fn validate_locksmith_level(level: u8) -> RegistryResult<()> {
    if level > MAX_LOCKSMITH_LEVEL {
        return Err(RegistryError::tag_validation(format!(
            "locksmith level {level} above {MAX_LOCKSMITH_LEVEL}"
        )));
    }
    Ok(())
}

/// Whether `actor` is the designated administrator
pub fn is_administrator(actor: &ActorId, administrator: &ActorId) -> bool {
    actor == administrator
}
