// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User directory mutations.

use diesel::prelude::*;
use task_track_domain::UserRole;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Inserts a new directory user and returns the assigned user id.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `name` - The user's display name
/// * `email` - The user's email address (unique)
/// * `role` - The user's role
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate email).
pub fn insert_user(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    role: UserRole,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::name.eq(name),
            users::email.eq(email),
            users::role.eq(role.as_str()),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
