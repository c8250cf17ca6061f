//! 组件基础接口定义
//!
//! 提供组件能力门控生命周期的基础 trait：组件通过可查询的能力访问器
//! 声明自己支持哪些装配阶段，未声明的阶段被装配器直接跳过

use crate::errors::{ComponentError, RegistryError};
use crate::parameters::Parameters;
use std::any::Any;
use std::sync::Arc;

/// 组件基础 trait
///
/// 容器创建并独占持有的长生命周期对象都必须实现此 trait。每个能力
/// 访问器默认返回 `None`，组件按需覆盖以声明对应的装配阶段。
pub trait Component: Send + Sync + 'static {
    /// 以 `Any` 形态访问组件（用于测试与诊断中的具体类型检查）
    fn as_any(&self) -> &dyn Any;

    /// 日志能力：装配第一阶段，附着角色命名的日志句柄
    fn as_log_enabled(&self) -> Option<&dyn LogEnabled> {
        None
    }

    /// 组合能力：装配第二阶段，获得解析其他角色的句柄
    fn as_composable(&self) -> Option<&dyn Composable> {
        None
    }

    /// 参数化能力：装配第三阶段，获得自己的参数快照
    fn as_parameterizable(&self) -> Option<&dyn Parameterizable> {
        None
    }

    /// 初始化能力：装配第四阶段，一次性可失败的准备工作
    fn as_initializable(&self) -> Option<&dyn Initializable> {
        None
    }

    /// 处置能力：关闭阶段的镜像能力，仅在容器停机时调用
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

/// 日志能力 trait
pub trait LogEnabled: Send + Sync {
    /// 附着日志句柄
    fn enable_logging(&self, logger: ComponentLogger);
}

/// 组合能力 trait
///
/// 组件经此获得角色注册表的非持有引用，用于解析其他角色的服务句柄。
/// 组件可以保留解析到的句柄，但绝不拥有容器本身。
pub trait Composable: Send + Sync {
    /// 解析并保留所依赖角色的服务句柄
    fn compose(&self, services: &dyn ServiceResolver) -> Result<(), ComponentError>;
}

/// 参数化能力 trait
pub trait Parameterizable: Send + Sync {
    /// 接收参数快照（读取后即视为不可变）
    fn parameterize(&self, parameters: Parameters) -> Result<(), ComponentError>;
}

/// 初始化能力 trait
pub trait Initializable: Send + Sync {
    /// 一次性初始化，失败会中止该组件的后续装配并上抛
    fn initialize(&self) -> Result<(), ComponentError>;
}

/// 处置能力 trait
pub trait Disposable: Send + Sync {
    /// 释放组件资源，失败被记录上报但不阻断其他组件的处置
    fn dispose(&self) -> Result<(), ComponentError>;
}

/// 组件日志句柄
///
/// 以所属角色命名、可廉价克隆的日志出口，事件经 tracing 发出。
#[derive(Debug, Clone)]
pub struct ComponentLogger {
    role: Arc<str>,
}

impl ComponentLogger {
    /// 创建以指定角色命名的日志句柄
    pub fn for_role(role: impl AsRef<str>) -> Self {
        Self {
            role: Arc::from(role.as_ref()),
        }
    }

    /// 所属角色
    pub fn role(&self) -> &str {
        &self.role
    }

    /// 记录 info 级事件
    pub fn info(&self, message: &str) {
        tracing::info!(role = %self.role, "{}", message);
    }

    /// 记录 debug 级事件
    pub fn debug(&self, message: &str) {
        tracing::debug!(role = %self.role, "{}", message);
    }

    /// 记录 warn 级事件
    pub fn warn(&self, message: &str) {
        tracing::warn!(role = %self.role, "{}", message);
    }

    /// 记录 error 级事件
    pub fn error(&self, message: &str) {
        tracing::error!(role = %self.role, "{}", message);
    }
}

/// 类型擦除的服务句柄
///
/// 包装一个 `Arc<dyn Trait>` 形态的角色服务，供注册表统一存放；
/// 使用方以 `resolve::<Arc<dyn Trait>>()` 取回强类型句柄。
#[derive(Clone)]
pub struct ServiceHandle {
    service: Arc<dyn Any + Send + Sync>,
}

impl ServiceHandle {
    /// 包装一个服务句柄（`T` 通常是 `Arc<dyn Trait>`）
    pub fn new<T: Send + Sync + 'static>(service: T) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// 取回强类型句柄，类型不符时返回 `None`
    pub fn resolve<T: Clone + 'static>(&self) -> Option<T> {
        self.service.downcast_ref::<T>().cloned()
    }

    /// 检查句柄是否为指定类型
    pub fn is<T: 'static>(&self) -> bool {
        self.service.is::<T>()
    }
}

impl std::fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("service", &"<erased>")
            .finish()
    }
}

/// 角色到服务句柄的解析边界
///
/// 组合阶段交给组件的非持有视图，背后是容器的角色注册表。
pub trait ServiceResolver: Send + Sync {
    /// 按角色查找服务句柄，缺失时报 [`RegistryError::UnknownKey`]
    fn lookup_handle(&self, role: &str) -> Result<ServiceHandle, RegistryError>;

    /// 检查角色是否已注册
    fn has_role(&self, role: &str) -> bool;
}

/// [`ServiceResolver`] 的强类型扩展
pub trait ServiceResolverExt: ServiceResolver {
    /// 按角色解析强类型服务句柄
    ///
    /// 角色缺失或句柄类型与角色契约不符时报 [`ComponentError::ServiceContract`]。
    fn resolve_service<T: Clone + 'static>(&self, role: &str) -> Result<T, ComponentError> {
        let handle = self
            .lookup_handle(role)
            .map_err(|_| ComponentError::ServiceContract {
                role: role.to_string(),
            })?;
        handle
            .resolve::<T>()
            .ok_or_else(|| ComponentError::ServiceContract {
                role: role.to_string(),
            })
    }
}

impl<R: ServiceResolver + ?Sized> ServiceResolverExt for R {}
