// region:    --- Imports
use super::model::{LoginForm, NewUser, User};
use super::password::{hash_password, verify_password};
use super::session::session_cutoff;
use crate::database::DatabaseManager;
use crate::error::{is_unique_violation, AuctionError, AuctionResult};
use crate::query;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
// endregion: --- Imports

/// A logged-in user and the token naming their session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Create an account and log it in.
pub async fn register(db_manager: &DatabaseManager, new_user: NewUser) -> AuctionResult<Session> {
    info!("{:<12} --> Register '{}'", "Auth", new_user.username);

    let password_hash = hash_password(new_user.password).await?;

    let result = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING id, username, email, password_hash, created_at",
    )
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&password_hash)
    .fetch_one(db_manager.pool())
    .await;

    let user = match result {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            warn!(
                "{:<12} --> Username '{}' already taken",
                "Auth", new_user.username
            );
            return Err(AuctionError::DuplicateUsername);
        }
        Err(e) => return Err(e.into()),
    };

    let token = create_session(db_manager, user.id).await?;
    Ok(Session { user, token })
}

/// Check credentials and open a session.
pub async fn login(db_manager: &DatabaseManager, form: LoginForm) -> AuctionResult<Session> {
    // usernames are stored trimmed
    let username = form.username.trim();
    info!("{:<12} --> Login '{}'", "Auth", username);

    let Some(user) = query::handlers::get_user_by_username(db_manager, username).await?
    else {
        return Err(AuctionError::InvalidCredentials);
    };

    if !verify_password(form.password, user.password_hash.clone()).await? {
        warn!("{:<12} --> Wrong password for '{}'", "Auth", user.username);
        return Err(AuctionError::InvalidCredentials);
    }

    let token = create_session(db_manager, user.id).await?;
    Ok(Session { user, token })
}

/// End a session. Unknown tokens are ignored.
pub async fn logout(db_manager: &DatabaseManager, token: &str) -> AuctionResult<()> {
    let deleted = sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(db_manager.pool())
        .await?
        .rows_affected();
    info!("{:<12} --> Logout ({} session(s) closed)", "Auth", deleted);
    Ok(())
}

/// Open a new session, dropping every expired one on the way.
async fn create_session(db_manager: &DatabaseManager, user_id: i64) -> AuctionResult<String> {
    let pruned = sqlx::query("DELETE FROM sessions WHERE created_at <= $1")
        .bind(session_cutoff(Utc::now()))
        .execute(db_manager.pool())
        .await?
        .rows_affected();
    if pruned > 0 {
        info!("{:<12} --> Pruned {} expired session(s)", "Auth", pruned);
    }

    let token = Uuid::new_v4().simple().to_string();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(db_manager.pool())
        .await?;
    Ok(token)
}
