//! 会话持久化存储
//! 固定键名的键值存储，对应浏览器 localStorage 的角色

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::error::{ClientError, Result};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_ID_KEY: &str = "userId";
pub const DISPLAY_NAME_KEY: &str = "displayName";
pub const VERIFIED_STATUS_KEY: &str = "verifiedStatus";

/// 会话使用的全部键
pub const SESSION_KEYS: [&str; 5] = [
    ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
    USER_ID_KEY,
    DISPLAY_NAME_KEY,
    VERIFIED_STATUS_KEY,
];

/// 键值存储
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// 批量写入；`None` 表示删除该键
    fn write(&self, entries: &[(&str, Option<String>)]) -> Result<()>;

    /// 清空所有键
    fn clear(&self) -> Result<()>;
}

/// 内存存储（默认，进程退出即丢失）
#[derive(Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write(&self, entries: &[(&str, Option<String>)]) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        apply_entries(&mut values, entries);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

/// JSON 文件存储
///
/// 每次写入都重写整个文件；缓存一份内存副本供读取。
pub struct FileStorage {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// 打开（或准备创建）存储文件
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut cache: HashMap<String, String> = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    ClientError::storage(&format!("Corrupt session file {}: {}", path.display(), e))
                })?
            }
        } else {
            HashMap::new()
        };

        // 只认固定键名
        cache.retain(|key, _| SESSION_KEYS.contains(&key.as_str()));

        debug!(path = %path.display(), keys = cache.len(), "Session storage opened");
        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(values)?;
        // 先写临时文件再替换，避免留下写了一半的文件
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write(&self, entries: &[(&str, Option<String>)]) -> Result<()> {
        let mut values = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        apply_entries(&mut values, entries);
        self.persist(&values)
    }

    fn clear(&self) -> Result<()> {
        let mut values = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        values.clear();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

fn apply_entries(values: &mut HashMap<String, String>, entries: &[(&str, Option<String>)]) {
    for (key, value) in entries {
        match value {
            Some(v) => {
                values.insert((*key).to_string(), v.clone());
            }
            None => {
                values.remove(*key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_write_and_remove() {
        let storage = MemoryStorage::new();
        storage
            .write(&[
                (ACCESS_TOKEN_KEY, Some("a".to_string())),
                (REFRESH_TOKEN_KEY, Some("r".to_string())),
            ])
            .unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("a"));

        storage.write(&[(ACCESS_TOKEN_KEY, None)]).unwrap();
        assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r"));

        storage.clear().unwrap();
        assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let path = std::env::temp_dir().join(format!("incident-session-{}.json", uuid::Uuid::new_v4()));

        let storage = FileStorage::open(&path).unwrap();
        storage
            .write(&[(USER_ID_KEY, Some("42".to_string()))])
            .unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(USER_ID_KEY).as_deref(), Some("42"));

        reopened.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let path = std::env::temp_dir().join(format!("incident-session-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "{not json").unwrap();

        let result = FileStorage::open(&path);
        assert!(matches!(result, Err(ClientError::Storage(_))));

        std::fs::remove_file(&path).unwrap();
    }
}
