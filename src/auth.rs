// src/auth.rs
// DOCUMENTATION: Roles and their permission records
// PURPOSE: Fixed role enumeration mapped to statically-checked permissions,
// evaluated once at policy-check time

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Moderator,
    Host,
    Guest,
    Banned,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Manager,
        Role::Moderator,
        Role::Host,
        Role::Guest,
        Role::Banned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Moderator => "moderator",
            Role::Host => "host",
            Role::Guest => "guest",
            Role::Banned => "banned",
        }
    }

    /// Permission record for this role
    pub const fn permissions(&self) -> Permissions {
        match self {
            Role::Admin => Permissions {
                manage_hotels: true,
                manage_geography: true,
                manage_users: true,
                moderate_content: true,
                view_admin: true,
            },
            Role::Manager => Permissions {
                manage_hotels: true,
                manage_geography: true,
                manage_users: false,
                moderate_content: true,
                view_admin: true,
            },
            Role::Moderator => Permissions {
                manage_hotels: false,
                manage_geography: false,
                manage_users: false,
                moderate_content: true,
                view_admin: true,
            },
            Role::Host => Permissions {
                manage_hotels: true,
                manage_geography: false,
                manage_users: false,
                moderate_content: false,
                view_admin: false,
            },
            Role::Guest => Permissions {
                manage_hotels: false,
                manage_geography: false,
                manage_users: false,
                moderate_content: false,
                view_admin: false,
            },
            Role::Banned => Permissions::none(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "moderator" => Ok(Role::Moderator),
            "host" => Ok(Role::Host),
            "guest" => Ok(Role::Guest),
            "banned" => Ok(Role::Banned),
            other => Err(format!("Invalid role '{}'", other)),
        }
    }
}

/// Statically-checked permission record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub manage_hotels: bool,
    pub manage_geography: bool,
    pub manage_users: bool,
    pub moderate_content: bool,
    pub view_admin: bool,
}

impl Permissions {
    pub const fn none() -> Self {
        Permissions {
            manage_hotels: false,
            manage_geography: false,
            manage_users: false,
            moderate_content: false,
            view_admin: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn test_admin_has_all_permissions() {
        let p = Role::Admin.permissions();
        assert!(
            p.manage_hotels
                && p.manage_geography
                && p.manage_users
                && p.moderate_content
                && p.view_admin
        );
    }

    #[test]
    fn test_banned_has_no_permissions() {
        assert_eq!(Role::Banned.permissions(), Permissions::none());
    }

    #[test]
    fn test_only_admin_manages_users() {
        for role in Role::ALL {
            let expected = role == Role::Admin;
            assert_eq!(role.permissions().manage_users, expected, "{}", role);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"banned\"").unwrap();
        assert_eq!(role, Role::Banned);
    }
}
