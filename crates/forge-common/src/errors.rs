//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 配置错误类型
///
/// 必需参数或目录缺失、无效。初始化阶段遇到即致命，容器中止启动。
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("容器尚未配置参数，必须先调用 configure")]
    NotConfigured,

    #[error("容器尚未完成初始化，不能进入该生命周期阶段")]
    NotInitialized,

    #[error("必需参数缺失: {key}")]
    MissingParameter { key: String },

    #[error("目录不存在: {name} ({path})")]
    DirectoryNotFound { name: String, path: PathBuf },

    #[error("路径不是目录: {name} ({path})")]
    NotADirectory { name: String, path: PathBuf },
}

impl ConfigurationError {
    /// 创建必需参数缺失错误
    pub fn missing_parameter(key: impl Into<String>) -> Self {
        Self::MissingParameter { key: key.into() }
    }
}

/// 注册表错误类型
///
/// 泛型键值注册表的两种失败：重复注册与查找缺失（即角色未知）。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("键已注册: {key}")]
    DuplicateKey { key: String },

    #[error("未知键: {key}")]
    UnknownKey { key: String },
}

impl RegistryError {
    /// 创建重复键错误
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// 创建未知键错误
    pub fn unknown(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }
}

/// 角色解析错误类型
///
/// 配置的实现标识不存在、声明角色不符或服务句柄不满足角色契约。
/// 初始化阶段遇到即致命。
#[derive(Error, Debug)]
pub enum RoleResolutionError {
    #[error("未知实现: 角色 {role} 配置的实现 {implementation} 未在工厂注册表中注册")]
    UnknownImplementation { role: String, implementation: String },

    #[error("实现与角色不符: {implementation} 提供的是 {provides}, 期望 {role}")]
    RoleMismatch {
        role: String,
        implementation: String,
        provides: String,
    },

    #[error("服务句柄不满足角色契约: {role} (实现 {implementation})")]
    ServiceContract { role: String, implementation: String },
}

/// 组件生命周期错误类型
///
/// 装配或处置阶段的失败，携带所属角色。
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件组合阶段失败: {role}, 原因: {message}")]
    ComposeFailed { role: String, message: String },

    #[error("组件参数化阶段失败: {role}, 原因: {message}")]
    ParameterizeFailed { role: String, message: String },

    #[error("组件初始化失败: {role}, 原因: {message}")]
    InitializeFailed { role: String, message: String },

    #[error("组件处置失败: {role}, 原因: {message}")]
    DisposeFailed { role: String, message: String },

    #[error("服务未满足角色契约: {role}")]
    ServiceContract { role: String },
}

impl ComponentError {
    /// 创建组合阶段错误
    pub fn compose_failed(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ComposeFailed {
            role: role.into(),
            message: message.into(),
        }
    }

    /// 创建参数化阶段错误
    pub fn parameterize_failed(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParameterizeFailed {
            role: role.into(),
            message: message.into(),
        }
    }

    /// 创建初始化错误
    pub fn initialize_failed(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InitializeFailed {
            role: role.into(),
            message: message.into(),
        }
    }

    /// 创建处置错误
    pub fn dispose_failed(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DisposeFailed {
            role: role.into(),
            message: message.into(),
        }
    }
}

/// 部署错误类型
///
/// 单个部署来源（上下文或文件）打开失败或声明格式错误，始终携带
/// 工件标识。目录扫描期间按工件隔离，不中止其余工件的部署。
#[derive(Error, Debug)]
pub enum DeploymentError {
    #[error("无法打开部署工件: {artifact}, 原因: {source}")]
    OpenFailed {
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    #[error("部署工件清单格式错误: {artifact}, 原因: {source}")]
    MalformedManifest {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("部署工件声明了未知类型角色: {artifact}, 角色: {role}")]
    UnknownTypeRole { artifact: String, role: String },

    #[error("类型注册失败: {artifact}, 原因: {source}")]
    RegistrationFailed {
        artifact: String,
        #[source]
        source: RegistryError,
    },

    #[error("部署器尚未完成组合装配: {artifact}")]
    NotComposed { artifact: String },
}

impl DeploymentError {
    /// 错误所涉及的工件标识
    pub fn artifact(&self) -> &str {
        match self {
            Self::OpenFailed { artifact, .. }
            | Self::MalformedManifest { artifact, .. }
            | Self::UnknownTypeRole { artifact, .. }
            | Self::RegistrationFailed { artifact, .. }
            | Self::NotComposed { artifact } => artifact,
        }
    }
}

/// 容器错误类型
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("配置错误: {source}")]
    Configuration {
        #[from]
        source: ConfigurationError,
    },

    #[error("角色解析错误: {source}")]
    RoleResolution {
        #[from]
        source: RoleResolutionError,
    },

    #[error("注册表错误: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },

    #[error("组件生命周期错误: {source}")]
    Component {
        #[from]
        source: ComponentError,
    },

    #[error("部署错误: {source}")]
    Deployment {
        #[from]
        source: DeploymentError,
    },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigurationError>;
pub type RegistryResult<T> = Result<T, RegistryError>;
pub type RoleResult<T> = Result<T, RoleResolutionError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
pub type DeployResult<T> = Result<T, DeploymentError>;
pub type ContainerResult<T> = Result<T, ContainerError>;
