use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::users::{NewUser, User},
};

/// Creates a new user. Email uniqueness is enforced by the database
/// constraint rather than a pre-insert lookup.
pub async fn create_user(conn: &mut DbConn, new_user: NewUser) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, phone)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, email, password_hash, phone, created_at, status
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.phone)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e, "users_email_key") {
            Error::Conflict("User with this email already exists".to_string())
        } else {
            Error::Sqlx(e)
        }
    })?;

    Ok(user)
}

/// Gets a single user by their email address. The user may not exist.
pub async fn get_user_by_email(conn: &mut DbConn, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, phone, created_at, status
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

fn is_unique_violation(e: &sqlx::Error, constraint: &str) -> bool {
    match e {
        sqlx::Error::Database(db_err) => {
            db_err.constraint() == Some(constraint)
                || db_err.code().as_deref() == Some("23505")
        }
        _ => false,
    }
}
