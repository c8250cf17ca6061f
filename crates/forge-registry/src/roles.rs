//! 角色管理器
//!
//! 类型库清单用短名（如 `task`）声明角色，引擎内部用角色全名
//! （如 `forge.role.task`）索引。角色管理器维护这张翻译表

use crate::registry::Registry;
use forge_common::{
    Component, ComponentError, ComponentLogger, ComponentResult, Initializable, LogEnabled,
    RegistryResult,
};
use parking_lot::RwLock;
use std::any::Any;

/// 内建角色短名表：(短名, 角色全名)
const BUILTIN_ROLES: &[(&str, &str)] = &[
    ("task", "forge.role.task"),
    ("converter", "forge.role.converter"),
    ("data-type", "forge.role.data-type"),
    ("aspect", "forge.role.aspect"),
];

/// 角色管理器 trait
///
/// 部署器在登记类型前经此把清单短名翻译为角色全名。
pub trait RoleManager: Send + Sync {
    /// 注册短名到角色全名的映射，重复短名被拒绝
    fn register_role(&self, shorthand: &str, role_id: &str) -> RegistryResult<()>;

    /// 按短名查角色全名，缺失时报未知键
    fn role_for_name(&self, shorthand: &str) -> RegistryResult<String>;

    /// 检查短名是否已注册
    fn has_role(&self, shorthand: &str) -> bool;
}

/// 默认角色管理器
///
/// 初始化阶段预注册内建短名，之后只读使用。
#[derive(Debug, Default)]
pub struct DefaultRoleManager {
    roles: RwLock<Registry<String>>,
    logger: RwLock<Option<ComponentLogger>>,
}

impl DefaultRoleManager {
    /// 创建空角色管理器
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleManager for DefaultRoleManager {
    fn register_role(&self, shorthand: &str, role_id: &str) -> RegistryResult<()> {
        self.roles.write().register(shorthand, role_id.to_string())
    }

    fn role_for_name(&self, shorthand: &str) -> RegistryResult<String> {
        self.roles.read().lookup(shorthand).cloned()
    }

    fn has_role(&self, shorthand: &str) -> bool {
        self.roles.read().contains(shorthand)
    }
}

impl Component for DefaultRoleManager {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_log_enabled(&self) -> Option<&dyn LogEnabled> {
        Some(self)
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }
}

impl LogEnabled for DefaultRoleManager {
    fn enable_logging(&self, logger: ComponentLogger) {
        *self.logger.write() = Some(logger);
    }
}

impl Initializable for DefaultRoleManager {
    fn initialize(&self) -> ComponentResult<()> {
        for (shorthand, role_id) in BUILTIN_ROLES {
            self.register_role(shorthand, role_id).map_err(|e| {
                ComponentError::initialize_failed(
                    forge_common::roles::ROLE_MANAGER,
                    format!("内建角色短名注册失败: {e}"),
                )
            })?;
        }
        if let Some(logger) = self.logger.read().as_ref() {
            logger.debug("内建角色短名注册完成");
        }
        Ok(())
    }
}
