//! PostgreSQL account store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use genixhub_auth::Role;
use genixhub_core::AppError;
use genixhub_models::{NewSchool, NewStudent, School, Student};

use crate::store::{AccountStore, SCHOOL_HAS_STUDENTS, UniqueField};

const SCHOOL_COLUMNS: &str = "id, name, password_hash, address, city, state, pincode, \
     principal_name, contact_email, contact_phone, refresh_token, created_at, updated_at";

const STUDENT_COLUMNS: &str = "id, school_id, name, password_hash, class_name, section, \
     gender, roll_no, mobile, father_name, mother_name, email, date_of_birth, address, \
     refresh_token, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(role: Role) -> &'static str {
    match role {
        Role::School => "schools",
        Role::Student => "students",
    }
}

/// Unique violations become conflicts keyed by constraint name; foreign key
/// violations are reported through `on_foreign_key`.
fn map_write_error(err: sqlx::Error, on_foreign_key: impl FnOnce() -> AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = db_err.constraint().and_then(UniqueField::from_constraint);
            debug!(constraint = ?db_err.constraint(), "Unique violation");
            return match field {
                Some(field) => field.conflict(),
                None => AppError::conflict(genixhub_core::errors::messages::CONFLICT),
            };
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key();
        }
    }
    AppError::from(err)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    #[instrument(skip(self, school), fields(name = %school.name))]
    async fn insert_school(&self, school: NewSchool) -> Result<School, AppError> {
        let sql = format!(
            "INSERT INTO schools (id, name, password_hash, address, city, state, pincode, \
             principal_name, contact_email, contact_phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {SCHOOL_COLUMNS}"
        );

        sqlx::query_as::<_, School>(&sql)
            .bind(Uuid::new_v4())
            .bind(&school.name)
            .bind(&school.password_hash)
            .bind(&school.address)
            .bind(&school.city)
            .bind(&school.state)
            .bind(&school.pincode)
            .bind(&school.principal_name)
            .bind(&school.contact_email)
            .bind(&school.contact_phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, AppError::not_found))
    }

    async fn find_school_by_id(&self, id: Uuid) -> Result<Option<School>, AppError> {
        let sql = format!("SELECT {SCHOOL_COLUMNS} FROM schools WHERE id = $1");
        let school = sqlx::query_as::<_, School>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(school)
    }

    async fn find_school_by_name(&self, name: &str) -> Result<Option<School>, AppError> {
        let sql = format!("SELECT {SCHOOL_COLUMNS} FROM schools WHERE name = $1");
        let school = sqlx::query_as::<_, School>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(school)
    }

    #[instrument(skip(self))]
    async fn list_schools(&self, limit: i64, offset: i64) -> Result<(Vec<School>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM schools")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2"
        );
        let schools = sqlx::query_as::<_, School>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((schools, total))
    }

    #[instrument(skip(self, student), fields(name = %student.name, school_id = %student.school_id))]
    async fn insert_student(&self, student: NewStudent) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO students (id, school_id, name, password_hash, class_name, section, \
             gender, roll_no, mobile, father_name, mother_name, email, date_of_birth, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {STUDENT_COLUMNS}"
        );

        sqlx::query_as::<_, Student>(&sql)
            .bind(Uuid::new_v4())
            .bind(student.school_id)
            .bind(&student.name)
            .bind(&student.password_hash)
            .bind(&student.class_name)
            .bind(&student.section)
            .bind(&student.gender)
            .bind(&student.roll_no)
            .bind(&student.mobile)
            .bind(&student.father_name)
            .bind(&student.mother_name)
            .bind(&student.email)
            .bind(student.date_of_birth)
            .bind(&student.address)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, AppError::school_not_found))
    }

    async fn find_student_by_name(
        &self,
        name: &str,
        school_id: Option<Uuid>,
    ) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students \
             WHERE name = $1 AND ($2::uuid IS NULL OR school_id = $2) \
             ORDER BY created_at ASC, id ASC LIMIT 1"
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(name)
            .bind(school_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn account_exists(&self, role: Role, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table(role));
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn refresh_token(&self, role: Role, id: Uuid) -> Result<Option<String>, AppError> {
        let sql = format!("SELECT refresh_token FROM {} WHERE id = $1", table(role));
        let token = sqlx::query_scalar::<_, Option<String>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(token.flatten())
    }

    #[instrument(skip(self, token))]
    async fn set_refresh_token(
        &self,
        role: Role,
        id: Uuid,
        token: Option<&str>,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET refresh_token = $2, updated_at = NOW() WHERE id = $1",
            table(role)
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, role: Role, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table(role));
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, || AppError::conflict(SCHOOL_HAS_STUDENTS)))?;
        Ok(result.rows_affected() > 0)
    }
}
