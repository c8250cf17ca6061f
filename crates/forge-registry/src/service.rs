//! 角色注册表（服务句柄映射）
//!
//! 引擎内部组件按角色 id 注册与解析的注册表，装配阶段以
//! [`ServiceResolver`] 视图借给组件使用

use crate::registry::Registry;
use forge_common::{RegistryError, RegistryResult, ServiceHandle, ServiceResolver};

/// 角色注册表
///
/// 角色 id 到类型擦除服务句柄的映射。每个角色至多一个活动实现，
/// 重复注册同一角色被拒绝。
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: Registry<ServiceHandle>,
}

impl ServiceRegistry {
    /// 创建空角色注册表
    pub fn new() -> Self {
        Self {
            services: Registry::new(),
        }
    }

    /// 注册角色的服务句柄
    pub fn register(&mut self, role: impl Into<String>, handle: ServiceHandle) -> RegistryResult<()> {
        self.services.register(role, handle)
    }

    /// 按角色解析强类型服务句柄（`T` 通常是 `Arc<dyn Trait>`）
    ///
    /// 角色缺失时报 [`RegistryError::UnknownKey`]；句柄存在但类型不符
    /// 视为未注册同等处理，同样报未知键。
    pub fn resolve<T: Clone + 'static>(&self, role: &str) -> RegistryResult<T> {
        let handle = self.services.lookup(role)?;
        handle
            .resolve::<T>()
            .ok_or_else(|| RegistryError::unknown(role))
    }

    /// 已注册的角色列表（确定性顺序）
    pub fn roles(&self) -> Vec<&str> {
        self.services.names()
    }

    /// 已注册角色数量
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// 清空注册表
    pub fn clear(&mut self) {
        self.services.clear();
    }
}

impl ServiceResolver for ServiceRegistry {
    fn lookup_handle(&self, role: &str) -> Result<ServiceHandle, RegistryError> {
        self.services.lookup(role).cloned()
    }

    fn has_role(&self, role: &str) -> bool {
        self.services.contains(role)
    }
}
