//! 分层配置参数
//!
//! 提供覆盖层优先、缺省层兜底的字符串参数集合

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 配置参数集合
///
/// 有序的字符串键值映射。容器持有两份：嵌入方传入的覆盖层与容器内建的
/// 缺省层，查询顺序为覆盖值、缺省值、缺失。组件读取后即视为不可变，
/// 每个组件收到自己独立的快照克隆。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// 参数数据（BTreeMap 保证确定性迭代顺序）
    entries: BTreeMap<String, String>,
}

impl Parameters {
    /// 创建空参数集合
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// 设置参数值
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// 获取参数值
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 获取参数值，缺失时返回给定缺省值
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// 检查参数键是否存在
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 获取所有参数键
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// 参数数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 迭代所有键值对
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 以本集合为覆盖层、给定集合为缺省层，合并出一份新快照
    ///
    /// 缺省层的每个键都会出现在结果中，除非被本集合覆盖。
    pub fn merged_over(&self, defaults: &Parameters) -> Parameters {
        let mut merged = defaults.clone();
        for (key, value) in self.iter() {
            merged.set(key, value);
        }
        merged
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
