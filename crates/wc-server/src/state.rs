use wc_app::App;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub app: App,
    /// Upper bound for one uploaded blob, in bytes.
    pub max_upload_bytes: u64,
}

impl AppState {
    pub fn new(app: App, max_upload_bytes: u64) -> Self {
        Self {
            app,
            max_upload_bytes,
        }
    }
}
