use async_trait::async_trait;
use diesel::prelude::*;

use wc_core::ports::{RepositoryError, UserRepositoryPort};
use wc_core::{NewUser, User, UserId, Username};

use super::map_storage_err;
use crate::db::models::{NewUserRow, UserRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::users;

pub struct DieselUserRepository<E, IM, RM> {
    executor: E,
    insert_mapper: IM,
    row_mapper: RM,
}

impl<E, IM, RM> DieselUserRepository<E, IM, RM> {
    pub fn new(executor: E, insert_mapper: IM, row_mapper: RM) -> Self {
        Self {
            executor,
            insert_mapper,
            row_mapper,
        }
    }
}

#[async_trait]
impl<E, IM, RM> UserRepositoryPort for DieselUserRepository<E, IM, RM>
where
    E: DbExecutor,
    IM: InsertMapper<NewUser, NewUserRow>,
    RM: RowMapper<UserRow, User>,
{
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        self.executor
            .run(|conn| {
                let new_row = self.insert_mapper.to_row(&user)?;
                let row: UserRow = diesel::insert_into(users::table)
                    .values(&new_row)
                    .returning(UserRow::as_returning())
                    .get_result(conn)?;
                self.row_mapper.to_domain(&row)
            })
            .map_err(map_storage_err)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, RepositoryError> {
        self.executor
            .run(|conn| {
                let row: Option<UserRow> = users::table
                    .filter(users::username.eq(username.as_str()))
                    .select(UserRow::as_select())
                    .first(conn)
                    .optional()?;
                row.map(|r| self.row_mapper.to_domain(&r)).transpose()
            })
            .map_err(map_storage_err)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.executor
            .run(|conn| {
                let row: Option<UserRow> = users::table
                    .find(id.get())
                    .select(UserRow::as_select())
                    .first(conn)
                    .optional()?;
                row.map(|r| self.row_mapper.to_domain(&r)).transpose()
            })
            .map_err(map_storage_err)
    }
}
