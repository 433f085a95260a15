use anyhow::{anyhow, Result};
use wc_core::{
    BlobKind, ClipboardItem, ClipboardPayload, ItemId, ItemType, StorageLocator, UserId,
};

use crate::db::models::ClipboardItemRow;
use crate::db::ports::{InsertMapper, RowMapper};

pub struct ClipboardItemRowMapper;

impl InsertMapper<ClipboardItem, ClipboardItemRow> for ClipboardItemRowMapper {
    fn to_row(&self, domain: &ClipboardItem) -> Result<ClipboardItemRow> {
        let (content, filename, storage_path) = match &domain.payload {
            ClipboardPayload::Text { content } => (Some(content.clone()), None, None),
            ClipboardPayload::Blob {
                filename, locator, ..
            } => (None, Some(filename.clone()), Some(locator.as_str().to_string())),
        };

        Ok(ClipboardItemRow {
            id: domain.id.as_str().to_string(),
            user_id: domain.owner.get(),
            item_type: domain.payload.item_type().as_str().to_string(),
            content,
            filename,
            storage_path,
            created_at_ms: domain.created_at_ms,
            updated_at_ms: domain.updated_at_ms,
        })
    }
}

impl RowMapper<ClipboardItemRow, ClipboardItem> for ClipboardItemRowMapper {
    fn to_domain(&self, row: &ClipboardItemRow) -> Result<ClipboardItem> {
        let item_type: ItemType = row.item_type.parse()?;
        let payload = match item_type {
            ItemType::Text => {
                let content = row
                    .content
                    .clone()
                    .ok_or_else(|| anyhow!("text item {} has no content", row.id))?;
                ClipboardPayload::Text { content }
            }
            ItemType::File | ItemType::Image => {
                let (Some(filename), Some(path)) = (&row.filename, &row.storage_path) else {
                    return Err(anyhow!("{item_type} item {} is missing its blob reference", row.id));
                };
                let kind = BlobKind::from_is_image(item_type == ItemType::Image);
                ClipboardPayload::blob(filename.clone(), StorageLocator::new(path.clone()), kind)
            }
        };

        Ok(ClipboardItem {
            id: ItemId::from(row.id.clone()),
            owner: UserId::new(row.user_id),
            payload,
            created_at_ms: row.created_at_ms,
            updated_at_ms: row.updated_at_ms,
        })
    }
}
