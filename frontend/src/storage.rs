use soniy_admin_shared::session::TokenStorage;
use web_sys::Storage;

use crate::config::TOKEN_KEY;

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Session token slot in `localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl TokenStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        local_storage().and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
    }

    fn store(&self, token: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(TOKEN_KEY, token).is_err() {
                web_sys::console::error_1(&"Failed to persist session token".into());
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}
