//! 外部协作者占位组件
//!
//! 配置器与执行器属于引擎的外部协作子系统，本内核只在接口边界创建
//! 并装配它们。这里的 trait 仅作边界占位，操作细节由各自的子系统
//! 定义；默认实现覆盖完整能力谱，供容器缺省组件集演练装配与处置

use forge_common::{
    roles, Component, ComponentError, ComponentLogger, ComponentResult, Composable, Disposable,
    Initializable, LogEnabled, Parameterizable, Parameters, ServiceResolver, ServiceResolverExt,
};
use forge_registry::TypeManager;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

/// 配置器角色契约（边界占位，操作由构建脚本子系统定义）
pub trait Configurer: Send + Sync {}

/// 执行器角色契约（边界占位，操作由任务执行子系统定义）
pub trait Executor: Send + Sync {}

/// 默认配置器
///
/// 组合阶段解析类型管理器句柄（配置器按类型注册表解析构建脚本中的
/// 引用）。
#[derive(Default)]
pub struct DefaultConfigurer {
    type_manager: RwLock<Option<Arc<dyn TypeManager>>>,
    logger: RwLock<Option<ComponentLogger>>,
}

impl DefaultConfigurer {
    /// 创建默认配置器
    pub fn new() -> Self {
        Self::default()
    }

    /// 组合阶段解析到的类型管理器句柄
    pub fn type_manager(&self) -> Option<Arc<dyn TypeManager>> {
        self.type_manager.read().clone()
    }
}

impl Configurer for DefaultConfigurer {}

impl Component for DefaultConfigurer {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_log_enabled(&self) -> Option<&dyn LogEnabled> {
        Some(self)
    }

    fn as_composable(&self) -> Option<&dyn Composable> {
        Some(self)
    }
}

impl LogEnabled for DefaultConfigurer {
    fn enable_logging(&self, logger: ComponentLogger) {
        *self.logger.write() = Some(logger);
    }
}

impl Composable for DefaultConfigurer {
    fn compose(&self, services: &dyn ServiceResolver) -> ComponentResult<()> {
        *self.type_manager.write() = Some(services.resolve_service(roles::TYPE_MANAGER)?);
        if let Some(logger) = self.logger.read().as_ref() {
            logger.debug("配置器协作者解析完成");
        }
        Ok(())
    }
}

/// 默认执行器
///
/// 覆盖参数化、初始化与处置能力；初始化只允许发生一次。
#[derive(Default)]
pub struct DefaultExecutor {
    parameters: RwLock<Option<Parameters>>,
    initialized: RwLock<bool>,
    logger: RwLock<Option<ComponentLogger>>,
}

impl DefaultExecutor {
    /// 创建默认执行器
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否已完成初始化
    pub fn is_initialized(&self) -> bool {
        *self.initialized.read()
    }

    /// 参数化阶段收到的参数快照
    pub fn parameters(&self) -> Option<Parameters> {
        self.parameters.read().clone()
    }
}

impl Executor for DefaultExecutor {}

impl Component for DefaultExecutor {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_log_enabled(&self) -> Option<&dyn LogEnabled> {
        Some(self)
    }

    fn as_parameterizable(&self) -> Option<&dyn Parameterizable> {
        Some(self)
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl LogEnabled for DefaultExecutor {
    fn enable_logging(&self, logger: ComponentLogger) {
        *self.logger.write() = Some(logger);
    }
}

impl Parameterizable for DefaultExecutor {
    fn parameterize(&self, parameters: Parameters) -> ComponentResult<()> {
        *self.parameters.write() = Some(parameters);
        Ok(())
    }
}

impl Initializable for DefaultExecutor {
    fn initialize(&self) -> ComponentResult<()> {
        let mut initialized = self.initialized.write();
        if *initialized {
            return Err(ComponentError::initialize_failed(
                roles::EXECUTOR,
                "执行器不允许重复初始化",
            ));
        }
        *initialized = true;
        Ok(())
    }
}

impl Disposable for DefaultExecutor {
    fn dispose(&self) -> ComponentResult<()> {
        *self.initialized.write() = false;
        *self.parameters.write() = None;
        if let Some(logger) = self.logger.read().as_ref() {
            logger.debug("执行器已释放");
        }
        Ok(())
    }
}
