//! Well-known test identities
//!
//! `admin` matches the default configured administrator.

use strongroom_core::ActorId;

/// Portfolio owner in most scenarios
pub fn alice() -> ActorId {
    ActorId::new("alice")
}

/// Second user, usually a viewer or delegate
pub fn bob() -> ActorId {
    ActorId::new("bob")
}

/// Third user, usually an outsider
pub fn carol() -> ActorId {
    ActorId::new("carol")
}

/// The default administrator
pub fn admin() -> ActorId {
    ActorId::new("admin")
}
