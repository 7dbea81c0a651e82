//! Property test strategies for registry inputs
//!
//! Valid strategies stay inside every bound; invalid ones break exactly one.

use proptest::prelude::*;

pub use proptest;

use strongroom_core::validation::{MAX_NAME_LEN, MAX_SIZE, MAX_TAGS};
use strongroom_core::ActorId;
use strongroom_registry::NewPortfolio;

/// Actor drawn from a small pool so collisions happen
pub fn arb_actor() -> impl Strategy<Value = ActorId> {
    prop_oneof![
        Just(ActorId::new("alice")),
        Just(ActorId::new("bob")),
        Just(ActorId::new("carol")),
        Just(ActorId::new("admin")),
        "[a-z]{1,12}".prop_map(ActorId::new),
    ]
}

/// Name of 1 to 64 characters
pub fn valid_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,64}"
}

/// Empty or over-long name
pub fn invalid_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        ((MAX_NAME_LEN + 1)..(MAX_NAME_LEN * 2)).prop_map(|len| "n".repeat(len)),
    ]
}

/// Size in `1..=1_000_000`
pub fn valid_size() -> impl Strategy<Value = u64> {
    1..=MAX_SIZE
}

/// Zero or above the maximum
pub fn invalid_size() -> impl Strategy<Value = u64> {
    prop_oneof![Just(0), (MAX_SIZE + 1)..=u64::MAX]
}

/// 1 to 10 tags of 1 to 32 characters
pub fn valid_tags() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,32}", 1..=MAX_TAGS)
}

/// No tags, or more than ten
pub fn invalid_tags() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        Just(Vec::new()),
        prop::collection::vec("[a-z]{1,8}", (MAX_TAGS + 1)..(MAX_TAGS * 2)),
    ]
}

/// Fully valid creation input
pub fn valid_portfolio() -> impl Strategy<Value = NewPortfolio> {
    (valid_name(), valid_size(), valid_tags(), "[a-z ]{0,128}").prop_map(
        |(name, size, tags, metadata)| NewPortfolio {
            name,
            size,
            metadata,
            tags,
        },
    )
}

/// Positive lock duration small enough to never overflow realistic ticks
pub fn valid_duration() -> impl Strategy<Value = u64> {
    1u64..10_000
}
