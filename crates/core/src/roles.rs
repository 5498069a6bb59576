//! Institution roles.
//!
//! The string forms must match the `chk_users_role` constraint in
//! `20260301000002_create_users_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_DIRECTOR: &str = "DIRECTOR";
pub const ROLE_TEACHER: &str = "TEACHER";
pub const ROLE_STUDENT: &str = "STUDENT";

/// Role of an identity within its institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Director,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Director => ROLE_DIRECTOR,
            Role::Teacher => ROLE_TEACHER,
            Role::Student => ROLE_STUDENT,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_DIRECTOR => Ok(Role::Director),
            ROLE_TEACHER => Ok(Role::Teacher),
            ROLE_STUDENT => Ok(Role::Student),
            other => Err(CoreError::Internal(format!("Unknown role: {other}"))),
        }
    }
}
