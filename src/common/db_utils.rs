// src/common/db_utils.rs

use sqlx::error::ErrorKind;

use crate::common::error::AppError;

// SQLSTATE do Postgres para violação de EXCLUDE constraint.
const EXCLUSION_VIOLATION: &str = "23P01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique,
    ForeignKey,
    Check,
    Exclusion,
}

/// Identifica qual restrição do banco foi violada, se for o caso.
pub(crate) fn classify(e: &sqlx::Error) -> Option<Violation> {
    let db_err = e.as_database_error()?;

    if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
        return Some(Violation::Exclusion);
    }

    match db_err.kind() {
        ErrorKind::UniqueViolation => Some(Violation::Unique),
        ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey),
        ErrorKind::CheckViolation => Some(Violation::Check),
        _ => None,
    }
}

/// Erros de INSERT/UPDATE: FK quebrada vira 404 da entidade referenciada.
pub(crate) fn map_write_error(e: sqlx::Error, missing_reference: &str) -> AppError {
    match classify(&e) {
        Some(Violation::ForeignKey) => AppError::NotFound(missing_reference.to_string()),
        Some(Violation::Check) => AppError::BadRequest(
            "The submitted values violate a data constraint.".to_string(),
        ),
        Some(Violation::Unique) => AppError::Conflict("Record already exists.".to_string()),
        _ => e.into(),
    }
}

/// Erros de DELETE: registro ainda referenciado por outro.
pub(crate) fn map_delete_error(e: sqlx::Error, entity: &str) -> AppError {
    match classify(&e) {
        Some(Violation::ForeignKey) => {
            AppError::Conflict(format!("{} is still referenced by other records.", entity))
        }
        _ => e.into(),
    }
}

/// Erro de banco com SQLSTATE arbitrário, para testar o mapeamento sem Postgres.
#[cfg(test)]
pub(crate) mod fake {
    use std::borrow::Cow;
    use std::error::Error as StdError;

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    pub(crate) struct FakeDbError {
        pub(crate) code: &'static str,
        pub(crate) message: String,
    }

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            &self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        // mesmo mapeamento SQLSTATE -> ErrorKind do driver Postgres
        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                "23502" => ErrorKind::NotNullViolation,
                "23514" => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    pub(crate) fn pg_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError {
            code,
            message: format!("SQLSTATE {code}"),
        }))
    }
}
