use tracing::{info, instrument};

use genixhub_auth::{Identity, TokenService};
use genixhub_core::{
    AppError, PaginationMeta, PaginationParams, Password, password::verify_password_async,
};
use genixhub_db::AccountStore;
use genixhub_models::{
    LoginSchoolDto, RegisterSchoolDto, SchoolAuthData, SchoolProfile, SchoolSummary,
};

use crate::modules::auth::service::AuthService;

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(store, tokens, dto), fields(name = %dto.name))]
    pub async fn register(
        store: &dyn AccountStore,
        tokens: &TokenService,
        dto: RegisterSchoolDto,
    ) -> Result<SchoolAuthData, AppError> {
        let password_hash = Password::Plaintext(dto.password.clone()).into_hash().await?;
        let school = store.insert_school(dto.into_new_school(password_hash)).await?;

        let tokens = AuthService::start_session(store, tokens, Identity::school(school.id)).await?;

        info!(school_id = %school.id, "School registered");
        Ok(SchoolAuthData {
            school: SchoolProfile::from(&school),
            tokens,
        })
    }

    /// Unknown name and wrong password fail the same way.
    #[instrument(skip(store, tokens, dto), fields(name = %dto.name))]
    pub async fn login(
        store: &dyn AccountStore,
        tokens: &TokenService,
        dto: LoginSchoolDto,
    ) -> Result<SchoolAuthData, AppError> {
        let school = store
            .find_school_by_name(&dto.name)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !verify_password_async(dto.password, school.password_hash.clone()).await? {
            return Err(AppError::invalid_credentials());
        }

        let tokens = AuthService::start_session(store, tokens, Identity::school(school.id)).await?;

        info!(school_id = %school.id, "School logged in");
        Ok(SchoolAuthData {
            school: SchoolProfile::from(&school),
            tokens,
        })
    }

    #[instrument(skip(store))]
    pub async fn list(
        store: &dyn AccountStore,
        params: &PaginationParams,
    ) -> Result<(Vec<SchoolSummary>, PaginationMeta), AppError> {
        let (schools, total) = store.list_schools(params.limit(), params.offset()).await?;
        let meta = PaginationMeta::new(params.page(), params.limit(), total);

        Ok((schools.into_iter().map(SchoolSummary::from).collect(), meta))
    }
}
