use crate::user::User;

pub const USER_KEY: &str = "user";
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// String key/value storage that outlives a page, i.e. `localStorage` in the
/// browser. Everything kept here is a disposable cache.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn cached_user(&self) -> Option<User> {
        let raw = self.get(USER_KEY)?;
        // A stale or hand edited entry is just a cache miss
        serde_json::from_str(&raw).ok()
    }

    fn cache_user(&self, user: &User) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.set(USER_KEY, &raw);
        }
    }

    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY).filter(|token| !token.is_empty())
    }

    fn store_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        self.set(ACCESS_TOKEN_KEY, access_token);
        if let Some(refresh_token) = refresh_token {
            self.set(REFRESH_TOKEN_KEY, refresh_token);
        }
    }

    fn clear_session(&self) {
        self.remove(USER_KEY);
        self.remove(ACCESS_TOKEN_KEY);
        self.remove(REFRESH_TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{user_json, MemoryStore};

    #[test]
    fn corrupt_user_cache_is_a_miss() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "{not json");
        assert_eq!(store.cached_user(), None);

        store.set(USER_KEY, user_json());
        assert_eq!(store.cached_user().unwrap().username, "ana");
    }

    #[test]
    fn clear_removes_everything() {
        let store = MemoryStore::new();
        store.set(USER_KEY, user_json());
        store.store_tokens("access", Some("refresh"));
        assert_eq!(store.access_token().as_deref(), Some("access"));

        store.clear_session();
        assert!(store.is_empty());
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "");
        assert_eq!(store.access_token(), None);
    }
}
