//! Content safety: the outbound message filter and the forbidden
//! want-category list.

pub mod filter;

pub use filter::{
    find_forbidden_category, ContentSafetyFilter, ContentVerdict, RejectReason,
    FORBIDDEN_WANT_CATEGORIES,
};
