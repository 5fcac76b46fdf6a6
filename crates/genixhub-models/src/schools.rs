//! School domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use genixhub_auth::TokenPair;
use genixhub_core::serde::{deserialize_lowercase, deserialize_trimmed};

use crate::validation::{passwords_match, validate_mobile, validate_pincode, validate_state};

/// A school account as stored.
#[derive(Debug, Clone, FromRow)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub principal_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: String,
    pub password_hash: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub principal_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_register_school", skip_on_field_errors = false))]
pub struct RegisterSchoolDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 100, message = "School name must be between 3 and 100 characters"))]
    #[schema(example = "Delhi Public School")]
    pub name: String,
    #[validate(length(min = 6, max = 50, message = "Password must be between 6 and 50 characters"))]
    #[schema(example = "secret123")]
    pub password: String,
    #[schema(example = "secret123")]
    pub confirm_password: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 5, max = 200, message = "Address must be between 5 and 200 characters"))]
    #[schema(example = "Mathura Road")]
    pub address: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 50, message = "City must be between 2 and 50 characters"))]
    #[schema(example = "New Delhi")]
    pub city: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_state"))]
    #[schema(example = "Delhi")]
    pub state: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_pincode"))]
    #[schema(example = "110003")]
    pub pincode: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "Principal name must be between 2 and 100 characters"))]
    #[schema(example = "Anita Sharma")]
    pub principal_name: String,
    #[serde(deserialize_with = "deserialize_lowercase")]
    #[validate(email(message = "Please enter a valid email address"))]
    #[schema(example = "office@dps.edu.in")]
    pub contact_email: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_mobile"))]
    #[schema(example = "9876543210")]
    pub contact_phone: String,
}

fn validate_register_school(dto: &RegisterSchoolDto) -> Result<(), ValidationError> {
    passwords_match(&dto.password, &dto.confirm_password)
}

impl RegisterSchoolDto {
    /// Builds the insert payload once the password has been hashed.
    pub fn into_new_school(self, password_hash: String) -> NewSchool {
        NewSchool {
            name: self.name,
            password_hash,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            principal_name: self.principal_name,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginSchoolDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "School name is required"))]
    #[schema(example = "Delhi Public School")]
    pub name: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
}

/// School fields returned after register/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolProfile {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub principal_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl From<&School> for SchoolProfile {
    fn from(school: &School) -> Self {
        Self {
            id: school.id,
            name: school.name.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
            principal_name: school.principal_name.clone(),
            contact_email: school.contact_email.clone(),
            contact_phone: school.contact_phone.clone(),
        }
    }
}

/// Public listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSummary {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub principal_name: String,
}

impl From<School> for SchoolSummary {
    fn from(school: School) -> Self {
        Self {
            id: school.id,
            name: school.name,
            city: school.city,
            state: school.state,
            principal_name: school.principal_name,
        }
    }
}

/// School embedded in student responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolBrief {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
}

impl From<&School> for SchoolBrief {
    fn from(school: &School) -> Self {
        Self {
            id: school.id,
            name: school.name.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
        }
    }
}

/// One page of the public school listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolListData {
    pub schools: Vec<SchoolSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchoolAuthData {
    pub school: SchoolProfile,
    pub tokens: TokenPair,
}
