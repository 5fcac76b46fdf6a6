use tracing::{debug, info, instrument};

use genixhub_auth::{Identity, TokenPair, TokenService};
use genixhub_core::AppError;
use genixhub_db::AccountStore;
use genixhub_models::RefreshTokenRequest;

use crate::middleware::auth::AuthUser;

pub struct AuthService;

impl AuthService {
    /// Issues a fresh pair and stores its refresh token on the account,
    /// replacing whatever token was stored before.
    #[instrument(skip(store, tokens), fields(user_id = %identity.user_id, role = %identity.role))]
    pub async fn start_session(
        store: &dyn AccountStore,
        tokens: &TokenService,
        identity: Identity,
    ) -> Result<TokenPair, AppError> {
        let pair = tokens.issue(&identity)?;

        let stored = store
            .set_refresh_token(identity.role, identity.user_id, Some(&pair.refresh_token))
            .await?;
        if !stored {
            return Err(AppError::unauthorized());
        }

        Ok(pair)
    }

    /// Rotates a refresh token. Only the most recently issued token of an
    /// account is accepted.
    #[instrument(skip_all)]
    pub async fn refresh(
        store: &dyn AccountStore,
        tokens: &TokenService,
        dto: RefreshTokenRequest,
    ) -> Result<TokenPair, AppError> {
        let claims = tokens.verify_refresh(&dto.refresh_token)?;

        let current = store.refresh_token(claims.role, claims.user_id).await?;
        if current.as_deref() != Some(dto.refresh_token.as_str()) {
            debug!(user_id = %claims.user_id, "Refresh token is not the current one");
            return Err(AppError::invalid_token());
        }

        let pair = Self::start_session(store, tokens, claims.identity()).await?;
        info!(user_id = %claims.user_id, role = %claims.role, "Token refreshed");
        Ok(pair)
    }

    /// Clears the stored refresh token. Repeating it is harmless.
    #[instrument(skip(store), fields(user_id = %user.user_id(), role = %user.role()))]
    pub async fn logout(store: &dyn AccountStore, user: &AuthUser) -> Result<(), AppError> {
        store
            .set_refresh_token(user.role(), user.user_id(), None)
            .await?;
        info!("Logged out");
        Ok(())
    }
}
