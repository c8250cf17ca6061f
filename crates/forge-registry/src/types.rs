//! 类型管理器
//!
//! 部署产生的类型注册表：(角色, 短名) → 实现引用。下游引擎按此解析
//! 构建脚本中引用的任务/类型实现，仅有只读访问

use crate::registry::Registry;
use forge_common::{Component, ComponentLogger, LogEnabled, RegistryError, RegistryResult};
use parking_lot::RwLock;
use std::any::Any;

/// 实现引用
///
/// 指向某个具体实现的不透明标识，部署时原样登记、查找时原样取回，
/// 由下游的工厂注册表负责真正的按名构造。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImplementationRef(String);

impl ImplementationRef {
    /// 创建实现引用
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 实现标识字符串
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImplementationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 类型注册条目
///
/// (角色, 短名, 实现引用) 三元组，部署期间写入类型注册表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistration {
    /// 角色全名
    pub role: String,
    /// 类型短名（构建脚本中引用的名字）
    pub name: String,
    /// 实现引用
    pub implementation: ImplementationRef,
}

/// 类型管理器 trait
///
/// 部署器写入、下游引擎只读查询的类型注册表服务契约。
pub trait TypeManager: Send + Sync {
    /// 登记一条类型注册
    ///
    /// 重复的 (角色, 短名) 由后注册者确定性覆盖，覆盖会被记录。
    fn register_type(&self, registration: TypeRegistration) -> RegistryResult<()>;

    /// 按 (角色, 短名) 查找类型注册，缺失时报 [`RegistryError::UnknownKey`]
    fn lookup_type(&self, role: &str, name: &str) -> RegistryResult<TypeRegistration>;

    /// 指定角色下已注册的类型短名（确定性顺序）
    fn names_for_role(&self, role: &str) -> Vec<String>;

    /// 已登记的类型注册总数
    fn registered_count(&self) -> usize;
}

/// 默认类型管理器
///
/// 角色 → (短名 → 注册条目) 的嵌套注册表，内部锁保证 `&self` 服务形态；
/// 写入只发生在容器 `start()` 的单写者阶段。
#[derive(Debug, Default)]
pub struct DefaultTypeManager {
    types: RwLock<Registry<Registry<TypeRegistration>>>,
    logger: RwLock<Option<ComponentLogger>>,
}

impl DefaultTypeManager {
    /// 创建空类型管理器
    pub fn new() -> Self {
        Self::default()
    }
}

impl TypeManager for DefaultTypeManager {
    fn register_type(&self, registration: TypeRegistration) -> RegistryResult<()> {
        let mut types = self.types.write();
        if !types.contains(&registration.role) {
            // lookup_mut 之前先建好该角色的子表
            types.register(registration.role.clone(), Registry::new())?;
        }
        let table = types.lookup_mut(&registration.role)?;
        if let Some(previous) = table.replace(registration.name.clone(), registration.clone()) {
            tracing::warn!(
                role = %registration.role,
                name = %registration.name,
                old = %previous.implementation,
                new = %registration.implementation,
                "类型注册被覆盖"
            );
        } else if let Some(logger) = self.logger.read().as_ref() {
            logger.debug(&format!(
                "登记类型注册: {}/{} -> {}",
                registration.role, registration.name, registration.implementation
            ));
        }
        Ok(())
    }

    fn lookup_type(&self, role: &str, name: &str) -> RegistryResult<TypeRegistration> {
        let types = self.types.read();
        let table = types
            .lookup(role)
            .map_err(|_| RegistryError::unknown(format!("{role}/{name}")))?;
        table
            .lookup(name)
            .cloned()
            .map_err(|_| RegistryError::unknown(format!("{role}/{name}")))
    }

    fn names_for_role(&self, role: &str) -> Vec<String> {
        let types = self.types.read();
        match types.lookup(role) {
            Ok(table) => table.names().into_iter().map(String::from).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn registered_count(&self) -> usize {
        let types = self.types.read();
        types.iter().map(|(_, table)| table.len()).sum()
    }
}

impl Component for DefaultTypeManager {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_log_enabled(&self) -> Option<&dyn LogEnabled> {
        Some(self)
    }
}

impl LogEnabled for DefaultTypeManager {
    fn enable_logging(&self, logger: ComponentLogger) {
        *self.logger.write() = Some(logger);
    }
}
