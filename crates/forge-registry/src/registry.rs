//! 泛型键值注册表
//!
//! 角色注册表与类型注册表的契约形态相同（注册、查找、缺失报未知键），
//! 因此实现为一个泛型类型按需实例化，而非各写一份

use forge_common::{RegistryError, RegistryResult};
use std::collections::BTreeMap;

/// 泛型键值注册表
///
/// 字符串键到任意值的确定性有序映射。`register` 拒绝重复键，
/// `replace` 确定性覆盖，`lookup` 在键缺失时报 [`RegistryError::UnknownKey`]。
#[derive(Debug, Clone)]
pub struct Registry<V> {
    entries: BTreeMap<String, V>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Registry<V> {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// 注册键值，键已存在时报 [`RegistryError::DuplicateKey`]
    pub fn register(&mut self, key: impl Into<String>, value: V) -> RegistryResult<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(RegistryError::duplicate(key));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// 注册键值，键已存在时确定性覆盖并返回旧值
    pub fn replace(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// 按键查找，缺失时报 [`RegistryError::UnknownKey`]
    pub fn lookup(&self, key: &str) -> RegistryResult<&V> {
        self.entries
            .get(key)
            .ok_or_else(|| RegistryError::unknown(key))
    }

    /// 按键查找可变引用
    pub fn lookup_mut(&mut self, key: &str) -> RegistryResult<&mut V> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| RegistryError::unknown(key))
    }

    /// 检查键是否存在
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 所有已注册的键（确定性顺序）
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// 迭代所有键值对（确定性顺序）
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空所有条目
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
