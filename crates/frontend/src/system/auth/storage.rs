use web_sys::window;

const TOKEN_KEY: &str = "vinops_token";
const USER_KEY: &str = "vinops_user";
const LANG_KEY: &str = "vinops_lang";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn get(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

fn set(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage: could not write {}", key);
        }
    }
}

fn remove(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// Raw bearer token
pub fn get_token() -> Option<String> {
    get(TOKEN_KEY)
}

pub fn save_token(token: &str) {
    set(TOKEN_KEY, token);
}

/// JSON user/tenant descriptor, exactly as stored
pub fn get_user_json() -> Option<String> {
    get(USER_KEY)
}

pub fn save_user_json(json: &str) {
    set(USER_KEY, json);
}

/// Clear token and user descriptor. The language flag survives logout.
pub fn clear_session() {
    remove(TOKEN_KEY);
    remove(USER_KEY);
}

pub fn get_lang() -> Option<String> {
    get(LANG_KEY)
}

pub fn save_lang(lang: &str) {
    set(LANG_KEY, lang);
}
