use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};
use uuid::Uuid;

use cinenight_auth_schema::{users, verification_codes};

use crate::domain::repository::{CodeStore, UserDirectory};
use crate::domain::types::{Account, VerificationCode};
use crate::error::AuthServiceError;

/// Write failures are reported as `PersistenceFailed`; read failures stay `Internal`.
fn persistence(context: &'static str) -> impl FnOnce(DbErr) -> AuthServiceError {
    move |e| AuthServiceError::PersistenceFailed(anyhow::Error::new(e).context(context))
}

// ── User directory ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserDirectory {
    pub db: DatabaseConnection,
}

impl UserDirectory for DbUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(account_from_model))
    }

    async fn set_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AuthServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(persistence("set password hash"))?;
        Ok(result.rows_affected > 0)
    }
}

fn account_from_model(model: users::Model) -> Account {
    Account {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
    }
}

// ── Verification code store ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCodeStore {
    pub db: DatabaseConnection,
}

impl CodeStore for DbCodeStore {
    async fn delete_all_unconsumed(&self, subject_email: &str) -> Result<u64, AuthServiceError> {
        let result = verification_codes::Entity::delete_many()
            .filter(verification_codes::Column::SubjectEmail.eq(subject_email))
            .filter(verification_codes::Column::Consumed.eq(false))
            .exec(&self.db)
            .await
            .map_err(persistence("delete unconsumed verification codes"))?;
        Ok(result.rows_affected)
    }

    async fn insert(&self, code: &VerificationCode) -> Result<(), AuthServiceError> {
        verification_codes::ActiveModel {
            id: Set(code.id),
            subject_email: Set(code.subject_email.clone()),
            code_hash: Set(code.code_hash.clone()),
            expires_at: Set(code.expires_at),
            consumed: Set(code.consumed),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(persistence("insert verification code"))?;
        Ok(())
    }

    async fn find_newest_unconsumed(
        &self,
        subject_email: &str,
    ) -> Result<Option<VerificationCode>, AuthServiceError> {
        let model = verification_codes::Entity::find()
            .filter(verification_codes::Column::SubjectEmail.eq(subject_email))
            .filter(verification_codes::Column::Consumed.eq(false))
            .order_by_desc(verification_codes::Column::CreatedAt)
            .order_by_desc(verification_codes::Column::Id)
            .one(&self.db)
            .await
            .context("find newest unconsumed verification code")?;
        Ok(model.map(code_from_model))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AuthServiceError> {
        verification_codes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(persistence("delete verification code"))?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthServiceError> {
        let result = verification_codes::Entity::delete_many()
            .filter(verification_codes::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(persistence("delete expired verification codes"))?;
        Ok(result.rows_affected)
    }
}

fn code_from_model(model: verification_codes::Model) -> VerificationCode {
    VerificationCode {
        id: model.id,
        subject_email: model.subject_email,
        code_hash: model.code_hash,
        expires_at: model.expires_at,
        consumed: model.consumed,
        created_at: model.created_at,
    }
}
