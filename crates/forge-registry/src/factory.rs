//! 组件工厂注册表
//!
//! 按名构造替代反射：实现标识映射到零参构造闭包，表在进程启动时静态
//! 填充（内建表 + 嵌入方扩展），构造失败因此是领域错误而非反射异常

use forge_common::{Component, RoleResolutionError, RoleResult, ServiceHandle};
use crate::registry::Registry;
use std::sync::Arc;

/// 构造结果
///
/// 一次构造同时产出两个视图：容器持有的生命周期视图（装配、处置用）
/// 与注册进角色注册表的服务视图（角色契约形态的 `Arc<dyn Trait>`）。
pub struct CreatedComponent {
    /// 生命周期视图
    pub component: Arc<dyn Component>,
    /// 服务视图
    pub service: ServiceHandle,
}

impl std::fmt::Debug for CreatedComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedComponent")
            .field("component", &"<component>")
            .field("service", &self.service)
            .finish()
    }
}

impl CreatedComponent {
    /// 打包一次构造的两个视图
    pub fn new(component: Arc<dyn Component>, service: ServiceHandle) -> Self {
        Self { component, service }
    }
}

/// 零参构造闭包类型
pub type ComponentConstructor = Arc<dyn Fn() -> CreatedComponent + Send + Sync>;

/// 工厂条目：声明满足的角色 + 构造闭包
#[derive(Clone)]
pub struct FactoryEntry {
    role: String,
    constructor: ComponentConstructor,
}

impl std::fmt::Debug for FactoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryEntry")
            .field("role", &self.role)
            .field("constructor", &"<function>")
            .finish()
    }
}

/// 组件工厂注册表
///
/// 实现标识到工厂条目的映射。`create` 同时完成存在性检查与角色契约
/// 检查：配置把某实现指派给它不提供的角色时在此报错，而不是等到
/// 运行期句柄解析失败。
#[derive(Debug, Default)]
pub struct FactoryRegistry {
    factories: Registry<FactoryEntry>,
}

impl FactoryRegistry {
    /// 创建空工厂注册表
    pub fn new() -> Self {
        Self {
            factories: Registry::new(),
        }
    }

    /// 注册一个实现
    ///
    /// `implementation` 是配置中引用的实现标识，`role` 是该实现声明
    /// 满足的角色，`constructor` 为零参构造闭包。重复标识确定性覆盖，
    /// 嵌入方可借此替换内建实现。
    pub fn register<F>(&mut self, implementation: impl Into<String>, role: impl Into<String>, constructor: F)
    where
        F: Fn() -> CreatedComponent + Send + Sync + 'static,
    {
        let implementation = implementation.into();
        let entry = FactoryEntry {
            role: role.into(),
            constructor: Arc::new(constructor),
        };
        if self.factories.replace(implementation.clone(), entry).is_some() {
            tracing::debug!(implementation = %implementation, "工厂条目被覆盖");
        }
    }

    /// 按 (角色, 实现标识) 构造组件
    ///
    /// 标识缺失时报 [`RoleResolutionError::UnknownImplementation`]，
    /// 条目声明的角色与请求角色不符时报 [`RoleResolutionError::RoleMismatch`]。
    pub fn create(&self, role: &str, implementation: &str) -> RoleResult<CreatedComponent> {
        let entry = self.factories.lookup(implementation).map_err(|_| {
            RoleResolutionError::UnknownImplementation {
                role: role.to_string(),
                implementation: implementation.to_string(),
            }
        })?;

        if entry.role != role {
            return Err(RoleResolutionError::RoleMismatch {
                role: role.to_string(),
                implementation: implementation.to_string(),
                provides: entry.role.clone(),
            });
        }

        Ok((entry.constructor)())
    }

    /// 检查实现标识是否已注册
    pub fn contains(&self, implementation: &str) -> bool {
        self.factories.contains(implementation)
    }

    /// 已注册的实现标识（确定性顺序）
    pub fn implementations(&self) -> Vec<&str> {
        self.factories.names()
    }
}
