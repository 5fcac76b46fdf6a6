//! Student domain models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use genixhub_auth::TokenPair;
use genixhub_core::serde::{
    deserialize_lowercase, deserialize_optional_trimmed, deserialize_trimmed,
    deserialize_uppercase,
};

use crate::schools::SchoolBrief;
use crate::validation::{passwords_match, validate_gender, validate_mobile, validate_school_id};

/// A student account as stored.
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub class_name: String,
    pub section: String,
    pub gender: String,
    pub roll_no: String,
    pub mobile: String,
    pub father_name: String,
    pub mother_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub school_id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub class_name: String,
    pub section: String,
    pub gender: String,
    pub roll_no: String,
    pub mobile: String,
    pub father_name: String,
    pub mother_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_register_student", skip_on_field_errors = false))]
pub struct RegisterStudentDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    #[schema(example = "Aarav Gupta")]
    pub name: String,
    #[validate(length(min = 6, max = 50, message = "Password must be between 6 and 50 characters"))]
    #[schema(example = "secret123")]
    pub password: String,
    #[schema(example = "secret123")]
    pub confirm_password: String,
    /// Id of an existing school
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "School selection is required"),
        custom(function = "validate_school_id")
    )]
    #[schema(example = "5f0c6a9e-3b1d-4c2e-9a47-2f4d8b1e6c3a")]
    pub school_id: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 20, message = "Class must be between 1 and 20 characters"))]
    #[schema(example = "10")]
    pub class: String,
    #[serde(deserialize_with = "deserialize_uppercase")]
    #[validate(length(min = 1, max = 10, message = "Section must be between 1 and 10 characters"))]
    #[schema(example = "A")]
    pub section: String,
    #[serde(deserialize_with = "deserialize_lowercase")]
    #[validate(custom(function = "validate_gender"))]
    #[schema(example = "male")]
    pub gender: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 20, message = "Roll number must be between 1 and 20 characters"))]
    #[schema(example = "23")]
    pub roll_no: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom(function = "validate_mobile"))]
    #[schema(example = "9876543210")]
    pub mobile: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "Father's name must be between 2 and 100 characters"))]
    pub father_name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 2, max = 100, message = "Mother's name must be between 2 and 100 characters"))]
    pub mother_name: String,
    #[serde(deserialize_with = "deserialize_lowercase")]
    #[validate(email(message = "Please enter a valid email address"))]
    #[schema(example = "aarav@example.com")]
    pub email: String,
    /// `YYYY-MM-DD`
    #[schema(example = "2010-04-15")]
    pub date_of_birth: NaiveDate,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 10, max = 500, message = "Address must be between 10 and 500 characters"))]
    pub address: String,
}

fn validate_register_student(dto: &RegisterStudentDto) -> Result<(), ValidationError> {
    passwords_match(&dto.password, &dto.confirm_password)
}

impl RegisterStudentDto {
    /// Builds the insert payload once the school is resolved and the
    /// password hashed.
    pub fn into_new_student(self, school_id: Uuid, password_hash: String) -> NewStudent {
        NewStudent {
            school_id,
            name: self.name,
            password_hash,
            class_name: self.class,
            section: self.section,
            gender: self.gender,
            roll_no: self.roll_no,
            mobile: self.mobile,
            father_name: self.father_name,
            mother_name: self.mother_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            address: self.address,
        }
    }
}

/// Student names are only unique within a school; `schoolId` narrows the
/// lookup when several schools have a student with the same name.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginStudentDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Aarav Gupta")]
    pub name: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret123")]
    pub password: String,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub school_id: Option<String>,
}

/// Student returned after registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentProfile {
    pub id: Uuid,
    pub name: String,
    pub school: SchoolBrief,
}

/// Student returned after login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentLoginProfile {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub section: String,
    pub gender: String,
    pub roll_no: String,
    pub school: SchoolBrief,
}

impl StudentLoginProfile {
    pub fn new(student: &Student, school: SchoolBrief) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            class_name: student.class_name.clone(),
            section: student.section.clone(),
            gender: student.gender.clone(),
            roll_no: student.roll_no.clone(),
            school,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentRegisterData {
    pub student: StudentProfile,
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentLoginData {
    pub student: StudentLoginProfile,
    pub tokens: TokenPair,
}
