//! Entitlement checks for course assets.
//!
//! Entitlement records are produced by the purchase/payment collaborator
//! and are read-only here. The single rule: admins see everything, users
//! see the courses they own.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CourseId;

/// Identifier of a platform user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role attached to an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// An authenticated caller, as produced by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// A purchase grant: `user_id` owns all assets of `course_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub granted_at: DateTime<Utc>,
}

/// Outcome of an access check. Derived per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: &'static str,
}

impl AccessDecision {
    fn allow(reason: &'static str) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: &'static str) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Read-only lookup of purchase grants.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Checks whether a grant exists for `(user_id, course_id)`.
    async fn has(&self, user_id: UserId, course_id: CourseId) -> bool;
}

/// Decides whether `identity` may access assets of `owner_course_id`.
///
/// Admins short-circuit the store lookup. Anonymous callers never reach
/// this function; missing authentication is rejected earlier with a
/// different status code.
pub async fn authorize(
    store: &dyn EntitlementStore,
    identity: &Identity,
    owner_course_id: CourseId,
) -> AccessDecision {
    if identity.role == Role::Admin {
        return AccessDecision::allow("admin");
    }
    if store.has(identity.user_id, owner_course_id).await {
        AccessDecision::allow("entitled")
    } else {
        AccessDecision::deny("not entitled")
    }
}

/// In-memory grant table keyed by `(user, course)`.
#[derive(Debug, Default)]
pub struct InMemoryEntitlements {
    grants: HashMap<(UserId, CourseId), DateTime<Utc>>,
}

impl InMemoryEntitlements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a grant, keeping the earliest `granted_at` on duplicates.
    pub fn grant(&mut self, entitlement: Entitlement) {
        self.grants
            .entry((entitlement.user_id, entitlement.course_id))
            .and_modify(|at| {
                if entitlement.granted_at < *at {
                    *at = entitlement.granted_at;
                }
            })
            .or_insert(entitlement.granted_at);
    }

    pub fn grant_count(&self) -> usize {
        self.grants.len()
    }
}

#[async_trait]
impl EntitlementStore for InMemoryEntitlements {
    async fn has(&self, user_id: UserId, course_id: CourseId) -> bool {
        self.grants.contains_key(&(user_id, course_id))
    }
}
