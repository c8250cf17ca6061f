//! 类型库清单
//!
//! 可部署工件是一个 JSON 清单，声明零或多条 (角色短名, 类型短名,
//! 实现引用) 三元组。工件被扫描发现后打开、提取声明、登记注册，
//! 随后句柄即被丢弃，发现之后不再修改

use forge_common::{DeployResult, DeploymentError};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// 类型库清单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLibraryManifest {
    /// 类型库名称
    pub library: String,
    /// 类型声明列表（允许为空）
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

/// 单条类型声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// 角色短名（经角色管理器翻译为角色全名）
    pub role: String,
    /// 类型短名（构建脚本中引用的名字）
    pub name: String,
    /// 实现引用
    pub implementation: String,
}

impl TypeLibraryManifest {
    /// 从字符串解析清单，`artifact` 用于错误中的工件标识
    pub fn parse_str(artifact: &str, data: &str) -> DeployResult<Self> {
        serde_json::from_str(data).map_err(|source| DeploymentError::MalformedManifest {
            artifact: artifact.to_string(),
            source,
        })
    }

    /// 从读取器解析清单，`artifact` 用于错误中的工件标识
    pub fn from_reader(artifact: &str, reader: impl Read) -> DeployResult<Self> {
        serde_json::from_reader(reader).map_err(|source| DeploymentError::MalformedManifest {
            artifact: artifact.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let data = r#"{
            "library": "core-tasks",
            "types": [
                { "role": "task", "name": "echo", "implementation": "forge.tasks.echo" }
            ]
        }"#;
        let manifest = TypeLibraryManifest::parse_str("core-tasks.ftl", data).unwrap();
        assert_eq!(manifest.library, "core-tasks");
        assert_eq!(manifest.types.len(), 1);
        assert_eq!(manifest.types[0].name, "echo");
    }

    #[test]
    fn test_parse_manifest_without_types() {
        let manifest =
            TypeLibraryManifest::parse_str("empty.ftl", r#"{ "library": "empty" }"#).unwrap();
        assert!(manifest.types.is_empty());
    }

    #[test]
    fn test_malformed_manifest_names_artifact() {
        let err = TypeLibraryManifest::parse_str("broken.ftl", "not json").unwrap_err();
        assert!(matches!(err, DeploymentError::MalformedManifest { .. }));
        assert_eq!(err.artifact(), "broken.ftl");
    }
}
