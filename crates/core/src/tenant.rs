//! Tenant (gym) identity.
//!
//! Every client and measurement belongs to exactly one gym. The current gym
//! is resolved once per request and handed to every repository and service
//! call as a [`TenantId`] value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Identifier of the gym that scopes a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(DbId);

impl TenantId {
    pub const fn new(gym_id: DbId) -> Self {
        Self(gym_id)
    }

    /// The raw gym id, for binding into queries.
    pub const fn get(self) -> DbId {
        self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DbId> for TenantId {
    fn from(gym_id: DbId) -> Self {
        Self(gym_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_raw_id() {
        let tenant = TenantId::new(42);
        assert_eq!(tenant.get(), 42);
        assert_eq!(tenant.to_string(), "42");
        assert_eq!(TenantId::from(42), tenant);
    }
}
