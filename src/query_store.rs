use std::fs;
use std::path::{Path, PathBuf};

/// Narrow persistence interface for the current page. The pager writes
/// through it on every successful transition and never reads it back;
/// embedding apps may restore from it at startup.
pub trait PageStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, page: u32);
}

/// Page store backed by an URL-encoded query string (`page=7&tab=2`),
/// optionally persisted to a text file so a relaunch can deep-link back to
/// the stored page.
#[derive(Debug)]
pub struct QueryStringStore {
    query: String,
    file_path: Option<PathBuf>,
}

impl QueryStringStore {
    pub fn ephemeral() -> Self {
        Self {
            query: String::new(),
            file_path: None,
        }
    }

    pub fn with_file(file_path: &Path) -> Self {
        Self {
            query: String::new(),
            file_path: Some(file_path.to_path_buf()),
        }
    }

    pub fn load_or_ephemeral(file_path: Option<&Path>) -> Self {
        match file_path {
            Some(path) => Self::load_from_file(path).unwrap_or_else(|e| {
                log::error!("Failed to load query store from {}: {}", path.display(), e);
                Self::with_file(path)
            }),
            None => Self::ephemeral(),
        }
    }

    pub fn load_from_file(file_path: &Path) -> anyhow::Result<Self> {
        if file_path.exists() {
            let query = fs::read_to_string(file_path)?.trim().to_string();
            Ok(Self {
                query,
                file_path: Some(file_path.to_path_buf()),
            })
        } else {
            Ok(Self::with_file(file_path))
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = &self.file_path {
            fs::write(path, &self.query)?;
        }
        Ok(())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the value of `key` in place if present, append `key=value`
    /// otherwise. Existing pairs keep their order.
    fn set_pair(&mut self, key: &str, value: &str) {
        let encoded_key = encode_component(key);
        let encoded_value = encode_component(value);

        let mut replaced = false;
        let pairs: Vec<String> = self
            .query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let name = pair.split('=').next().unwrap_or(pair);
                if name == encoded_key {
                    replaced = true;
                    format!("{encoded_key}={encoded_value}")
                } else {
                    pair.to_string()
                }
            })
            .collect();

        self.query = pairs.join("&");
        if !replaced {
            if !self.query.is_empty() {
                self.query.push('&');
            }
            self.query.push_str(&encoded_key);
            self.query.push('=');
            self.query.push_str(&encoded_value);
        }
    }

    fn value_of(&self, key: &str) -> Option<String> {
        let encoded_key = encode_component(key);
        self.query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .find_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                (name == encoded_key).then(|| decode_component(value))
            })
    }
}

impl PageStore for QueryStringStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.value_of(key)?.parse().ok()
    }

    fn set(&mut self, key: &str, page: u32) {
        self.set_pair(key, &page.to_string());
        if let Err(e) = self.save() {
            log::error!("Failed to save query store: {e}");
        }
    }
}

/// Percent-encode a query-string component. Unreserved characters pass
/// through, everything else is emitted as `%XX` per UTF-8 byte.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Decode `%XX` escapes; malformed escapes are kept verbatim.
fn decode_component(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
