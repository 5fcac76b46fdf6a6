use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use genixhub_auth::{Identity, TokenService};
use genixhub_core::{AppError, Password, password::verify_password_async};
use genixhub_db::AccountStore;
use genixhub_models::{
    LoginStudentDto, RegisterStudentDto, SchoolBrief, StudentLoginData, StudentLoginProfile,
    StudentProfile, StudentRegisterData,
};

use crate::modules::auth::service::AuthService;

pub struct StudentService;

impl StudentService {
    /// Registers a student into an existing school.
    #[instrument(skip(store, tokens, dto), fields(name = %dto.name, school_id = %dto.school_id))]
    pub async fn register(
        store: &dyn AccountStore,
        tokens: &TokenService,
        dto: RegisterStudentDto,
    ) -> Result<StudentRegisterData, AppError> {
        let school_id = Uuid::parse_str(&dto.school_id)
            .map_err(|_| AppError::invalid_field("schoolId", "Invalid school ID format"))?;
        let school = store
            .find_school_by_id(school_id)
            .await?
            .ok_or_else(AppError::school_not_found)?;

        let password_hash = Password::Plaintext(dto.password.clone()).into_hash().await?;
        let student = store
            .insert_student(dto.into_new_student(school.id, password_hash))
            .await?;

        let tokens =
            AuthService::start_session(store, tokens, Identity::student(student.id, school.id))
                .await?;

        info!(student_id = %student.id, school_id = %school.id, "Student registered");
        Ok(StudentRegisterData {
            student: StudentProfile {
                id: student.id,
                name: student.name,
                school: SchoolBrief::from(&school),
            },
            tokens,
        })
    }

    /// Without `schoolId` the earliest registered student with the name is
    /// used.
    #[instrument(skip(store, tokens, dto), fields(name = %dto.name))]
    pub async fn login(
        store: &dyn AccountStore,
        tokens: &TokenService,
        dto: LoginStudentDto,
    ) -> Result<StudentLoginData, AppError> {
        let school_filter = match dto.school_id.as_deref() {
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
                debug!("Malformed schoolId on student login");
                AppError::invalid_credentials()
            })?),
            None => None,
        };

        let student = store
            .find_student_by_name(&dto.name, school_filter)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !verify_password_async(dto.password, student.password_hash.clone()).await? {
            return Err(AppError::invalid_credentials());
        }

        let school = store
            .find_school_by_id(student.school_id)
            .await?
            .ok_or_else(|| {
                error!(student_id = %student.id, school_id = %student.school_id, "Student belongs to a missing school");
                AppError::internal_error("Student references a missing school")
            })?;

        let tokens =
            AuthService::start_session(store, tokens, Identity::student(student.id, school.id))
                .await?;

        info!(student_id = %student.id, "Student logged in");
        Ok(StudentLoginData {
            student: StudentLoginProfile::new(&student, SchoolBrief::from(&school)),
            tokens,
        })
    }
}
