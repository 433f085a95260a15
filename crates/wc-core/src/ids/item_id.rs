use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of a clipboard item.
///
/// Assigned once at creation (UUID v4) and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl_id!(ItemId);
