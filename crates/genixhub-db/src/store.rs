//! Account storage trait.

use async_trait::async_trait;
use uuid::Uuid;

use genixhub_auth::Role;
use genixhub_core::AppError;
use genixhub_models::{NewSchool, NewStudent, School, Student};

/// Storage for school and student accounts.
///
/// Implementations enforce the uniqueness rules themselves and report a
/// violation as a `Conflict` carrying [`UniqueField::message`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert_school(&self, school: NewSchool) -> Result<School, AppError>;

    async fn find_school_by_id(&self, id: Uuid) -> Result<Option<School>, AppError>;

    async fn find_school_by_name(&self, name: &str) -> Result<Option<School>, AppError>;

    /// One page of schools ordered by name, plus the total count.
    async fn list_schools(&self, limit: i64, offset: i64) -> Result<(Vec<School>, i64), AppError>;

    async fn insert_student(&self, student: NewStudent) -> Result<Student, AppError>;

    /// Earliest registered student with this name, optionally within one school.
    async fn find_student_by_name(
        &self,
        name: &str,
        school_id: Option<Uuid>,
    ) -> Result<Option<Student>, AppError>;

    /// Existence check used on every authenticated request.
    async fn account_exists(&self, role: Role, id: Uuid) -> Result<bool, AppError>;

    /// Currently stored refresh token, if the account exists and has one.
    async fn refresh_token(&self, role: Role, id: Uuid) -> Result<Option<String>, AppError>;

    /// Overwrites (or clears) the stored refresh token.
    ///
    /// Returns `false` when the account does not exist.
    async fn set_refresh_token(
        &self,
        role: Role,
        id: Uuid,
        token: Option<&str>,
    ) -> Result<bool, AppError>;

    /// Removes an account. A school that still has students cannot be removed.
    async fn delete_account(&self, role: Role, id: Uuid) -> Result<bool, AppError>;
}

/// Uniqueness rules shared by every store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    SchoolName,
    SchoolContactEmail,
    StudentNameInSchool,
    StudentRollNoInClass,
    StudentEmail,
    StudentMobile,
}

impl UniqueField {
    /// Maps a PostgreSQL constraint name from the migrations.
    pub fn from_constraint(name: &str) -> Option<Self> {
        match name {
            "schools_name_key" => Some(Self::SchoolName),
            "schools_contact_email_key" => Some(Self::SchoolContactEmail),
            "students_name_school_key" => Some(Self::StudentNameInSchool),
            "students_roll_no_school_class_key" => Some(Self::StudentRollNoInClass),
            "students_email_key" => Some(Self::StudentEmail),
            "students_mobile_key" => Some(Self::StudentMobile),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::SchoolName | Self::StudentNameInSchool => "Name already exists",
            Self::SchoolContactEmail => "Contact email already exists",
            Self::StudentRollNoInClass => "Roll number already exists",
            Self::StudentEmail => "Email already exists",
            Self::StudentMobile => "Mobile already exists",
        }
    }

    pub fn conflict(self) -> AppError {
        AppError::conflict(self.message())
    }
}

pub(crate) const SCHOOL_HAS_STUDENTS: &str = "School has registered students";
