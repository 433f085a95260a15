use async_trait::async_trait;
use diesel::prelude::*;

use wc_core::ports::{ClipboardItemRepositoryPort, RepositoryError};
use wc_core::{ClipboardItem, ItemId, UserId};

use super::map_storage_err;
use crate::db::models::ClipboardItemRow;
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::clipboard_items;

pub struct DieselClipboardItemRepository<E, IM, RM> {
    executor: E,
    insert_mapper: IM,
    row_mapper: RM,
}

impl<E, IM, RM> DieselClipboardItemRepository<E, IM, RM> {
    pub fn new(executor: E, insert_mapper: IM, row_mapper: RM) -> Self {
        Self {
            executor,
            insert_mapper,
            row_mapper,
        }
    }
}

#[async_trait]
impl<E, IM, RM> ClipboardItemRepositoryPort for DieselClipboardItemRepository<E, IM, RM>
where
    E: DbExecutor,
    IM: InsertMapper<ClipboardItem, ClipboardItemRow>,
    RM: RowMapper<ClipboardItemRow, ClipboardItem>,
{
    async fn insert(&self, item: &ClipboardItem) -> Result<(), RepositoryError> {
        self.executor
            .run(|conn| {
                let row = self.insert_mapper.to_row(item)?;
                diesel::insert_into(clipboard_items::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(())
            })
            .map_err(map_storage_err)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<ClipboardItem>, RepositoryError> {
        self.executor
            .run(|conn| {
                let rows: Vec<ClipboardItemRow> = clipboard_items::table
                    .filter(clipboard_items::user_id.eq(owner.get()))
                    .order((
                        clipboard_items::created_at_ms.desc(),
                        clipboard_items::id.desc(),
                    ))
                    .select(ClipboardItemRow::as_select())
                    .load(conn)?;

                rows.iter()
                    .map(|row| self.row_mapper.to_domain(row))
                    .collect()
            })
            .map_err(map_storage_err)
    }

    async fn latest_by_owner(&self, owner: UserId) -> Result<Option<ClipboardItem>, RepositoryError> {
        self.executor
            .run(|conn| {
                let row: Option<ClipboardItemRow> = clipboard_items::table
                    .filter(clipboard_items::user_id.eq(owner.get()))
                    .order((
                        clipboard_items::created_at_ms.desc(),
                        clipboard_items::id.desc(),
                    ))
                    .select(ClipboardItemRow::as_select())
                    .first(conn)
                    .optional()?;

                row.map(|r| self.row_mapper.to_domain(&r)).transpose()
            })
            .map_err(map_storage_err)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<ClipboardItem>, RepositoryError> {
        self.executor
            .run(|conn| {
                let row: Option<ClipboardItemRow> = clipboard_items::table
                    .find(id.as_str())
                    .select(ClipboardItemRow::as_select())
                    .first(conn)
                    .optional()?;

                row.map(|r| self.row_mapper.to_domain(&r)).transpose()
            })
            .map_err(map_storage_err)
    }

    async fn delete_owned(&self, id: &ItemId, owner: UserId) -> Result<bool, RepositoryError> {
        self.executor
            .run(|conn| {
                let affected = diesel::delete(
                    clipboard_items::table
                        .filter(clipboard_items::id.eq(id.as_str()))
                        .filter(clipboard_items::user_id.eq(owner.get())),
                )
                .execute(conn)?;
                Ok(affected > 0)
            })
            .map_err(map_storage_err)
    }
}
