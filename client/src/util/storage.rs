//! Bearer token persistence in browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token written after code verification is read back by every API
//! client built in the browser. SSR builds have no storage and no-op.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the stored token. Blank values count as absent.
pub fn load_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(TOKEN_KEY).ok().flatten()?;
        normalize_token(&raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub fn save_token(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        if storage.set_item(TOKEN_KEY, token).is_err() {
            log::warn!("failed to persist auth token");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

pub fn clear_token() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// Trim surrounding whitespace and drop empty tokens.
pub fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_owned())
}
