//! Caller identity, supplied per invocation by an external provider.
//!
//! The ledger never stores roles. It reads the `role` attribute off the
//! caller and treats it as authoritative.

use std::collections::BTreeMap;
use std::fmt;

/// Attribute name that carries the caller's role.
pub const ROLE_ATTRIBUTE: &str = "role";

/// Read-only view of the principal behind the current call.
pub trait IdentityContext {
    fn principal_id(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Roles the access gate knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May read any policy's medical conditions.
    Doctor,
    /// May read only policies they hold.
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }

    /// Exact, case-sensitive match on the two recognized role names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "doctor" => Some(Self::Doctor),
            "patient" => Some(Self::Patient),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-process identity built from an id and a set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    principal_id: String,
    attributes: BTreeMap<String, String>,
}

impl CallerIdentity {
    pub fn new(principal_id: impl Into<String>) -> Self {
        Self {
            principal_id: principal_id.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_role(self, role: impl Into<String>) -> Self {
        self.with_attribute(ROLE_ATTRIBUTE, role)
    }
}

impl IdentityContext for CallerIdentity {
    fn principal_id(&self) -> &str {
        &self.principal_id
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!(Role::parse("doctor"), Some(Role::Doctor));
        assert_eq!(Role::parse("patient"), Some(Role::Patient));
        assert_eq!(Role::parse("Doctor"), None);
        assert_eq!(Role::parse("nurse"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_caller_identity_exposes_role_attribute() {
        let caller = CallerIdentity::new("alice").with_role("patient");
        assert_eq!(caller.principal_id(), "alice");
        assert_eq!(caller.attribute(ROLE_ATTRIBUTE), Some("patient"));
        assert_eq!(caller.attribute("department"), None);
    }
}
