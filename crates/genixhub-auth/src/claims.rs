//! JWT claim structures for authentication tokens.
//!
//! - [`Identity`]: who the token speaks for
//! - [`Claims`]: access token claims
//! - [`RefreshTokenClaims`]: refresh token claims, with a unique `jti`

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::role::Role;

/// The identity shared by both tokens of a pair.
///
/// `school_id` is only present for students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Uuid>,
}

impl Identity {
    pub fn school(id: Uuid) -> Self {
        Self {
            user_id: id,
            role: Role::School,
            school_id: None,
        }
    }

    pub fn student(id: Uuid, school_id: Uuid) -> Self {
        Self {
            user_id: id,
            role: Role::Student,
            school_id: Some(school_id),
        }
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub role: Role,
    /// Owning school, students only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Uuid>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            role: self.role,
            school_id: self.school_id,
        }
    }
}

/// JWT claims for refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenClaims {
    pub user_id: Uuid,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Uuid>,
    pub exp: usize,
    pub iat: usize,
    /// Unique token identifier so two pairs issued in the same second differ
    pub jti: String,
}

impl RefreshTokenClaims {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            role: self.role,
            school_id: self.school_id,
        }
    }
}
