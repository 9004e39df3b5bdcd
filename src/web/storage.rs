//! 本地存储封装模块
//!
//! 定义与浏览器解耦的 `StorageAdapter` 抽象：浏览器实现基于
//! `gloo-storage` (LocalStorage)，单元测试使用内存 Mock。
//! 所有持久化值统一采用 serde_json 编码；键不存在即"无先前值"。

use serde::{Serialize, de::DeserializeOwned};

/// 抽象存储接口：负责键值数据的持久化
pub trait StorageAdapter {
    /// 读取并反序列化存储值；键不存在或解码失败返回 `None`
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>;
    /// 序列化并写入存储值；返回是否成功
    fn put<T: Serialize>(&self, key: &str, value: &T) -> bool;
    /// 删除键值对；返回是否成功
    fn delete(&self, key: &str) -> bool;
}

// =========================================================
// 实现层: 浏览器 LocalStorage
// =========================================================

/// 基于 `gloo-storage` 的浏览器 LocalStorage 适配器
#[derive(Clone)]
pub struct BrowserStorage;

impl StorageAdapter for BrowserStorage {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::get(key).ok()
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> bool {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::set(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::delete(key);
        true
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================
