// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User directory queries.

use diesel::prelude::*;
use task_track_domain::{UserProfile, UserRole};

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
    role: String,
}

fn row_to_profile(row: UserRow) -> Result<UserProfile, PersistenceError> {
    let role: UserRole = UserRole::parse(&row.role)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    Ok(UserProfile::new(row.user_id, row.name, row.email, role))
}

/// Retrieves a user profile by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user id to retrieve
///
/// # Errors
///
/// Returns `PersistenceError::UserNotFound` if no such user exists.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<UserProfile, PersistenceError> {
    let result = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first::<UserRow>(conn);

    let row: UserRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::UserNotFound(user_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_profile(row)
}

/// Retrieves all user profiles, ordered by id.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<UserProfile>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load::<UserRow>(conn)?;

    rows.into_iter().map(row_to_profile).collect()
}
