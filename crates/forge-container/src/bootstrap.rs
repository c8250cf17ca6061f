//! 引擎引导表
//!
//! 按名构造的静态表：在进程启动时填充实现标识到构造闭包的映射，
//! 以及当前执行上下文可见的类型库。内建表覆盖六个引擎角色的默认
//! 实现，嵌入方可注册替代实现或追加上下文库

use crate::collaborators::{Configurer, DefaultConfigurer, DefaultExecutor, Executor};
use forge_common::{roles, ServiceHandle};
use forge_deployer::{
    DefaultDeployer, DefaultLibraryLoader, Deployer, LibraryLoader, TypeLibraryManifest,
};
use forge_registry::{
    CreatedComponent, DefaultRoleManager, DefaultTypeManager, FactoryRegistry, RoleManager,
    TypeManager,
};
use std::sync::Arc;

/// 内建默认实现的标识
pub mod implementations {
    /// 默认类型管理器
    pub const TYPE_MANAGER: &str = "default-type-manager";
    /// 默认角色管理器
    pub const ROLE_MANAGER: &str = "default-role-manager";
    /// 默认部署器
    pub const DEPLOYER: &str = "default-deployer";
    /// 默认库加载器
    pub const LIBRARY_LOADER: &str = "default-library-loader";
    /// 默认配置器
    pub const CONFIGURER: &str = "default-configurer";
    /// 默认执行器
    pub const EXECUTOR: &str = "default-executor";
}

/// 引擎引导表
///
/// 容器构造时一次性交付，之后归容器独占。
pub struct EngineBootstrap {
    factories: FactoryRegistry,
    context_libraries: Vec<TypeLibraryManifest>,
}

impl EngineBootstrap {
    /// 创建空引导表（测试用，正常嵌入从 [`EngineBootstrap::builtin`] 出发）
    pub fn empty() -> Self {
        Self {
            factories: FactoryRegistry::new(),
            context_libraries: Vec::new(),
        }
    }

    /// 创建带全部内建默认实现的引导表
    pub fn builtin() -> Self {
        let mut bootstrap = Self::empty();

        bootstrap.factories.register(
            implementations::TYPE_MANAGER,
            roles::TYPE_MANAGER,
            || {
                let manager = Arc::new(DefaultTypeManager::new());
                CreatedComponent::new(
                    manager.clone(),
                    ServiceHandle::new(manager as Arc<dyn TypeManager>),
                )
            },
        );

        bootstrap.factories.register(
            implementations::ROLE_MANAGER,
            roles::ROLE_MANAGER,
            || {
                let manager = Arc::new(DefaultRoleManager::new());
                CreatedComponent::new(
                    manager.clone(),
                    ServiceHandle::new(manager as Arc<dyn RoleManager>),
                )
            },
        );

        bootstrap
            .factories
            .register(implementations::DEPLOYER, roles::DEPLOYER, || {
                let deployer = Arc::new(DefaultDeployer::new());
                CreatedComponent::new(
                    deployer.clone(),
                    ServiceHandle::new(deployer as Arc<dyn Deployer>),
                )
            });

        bootstrap.factories.register(
            implementations::LIBRARY_LOADER,
            roles::LIBRARY_LOADER,
            || {
                let loader = Arc::new(DefaultLibraryLoader::new());
                CreatedComponent::new(
                    loader.clone(),
                    ServiceHandle::new(loader as Arc<dyn LibraryLoader>),
                )
            },
        );

        bootstrap
            .factories
            .register(implementations::CONFIGURER, roles::CONFIGURER, || {
                let configurer = Arc::new(DefaultConfigurer::new());
                CreatedComponent::new(
                    configurer.clone(),
                    ServiceHandle::new(configurer as Arc<dyn Configurer>),
                )
            });

        bootstrap
            .factories
            .register(implementations::EXECUTOR, roles::EXECUTOR, || {
                let executor = Arc::new(DefaultExecutor::new());
                CreatedComponent::new(
                    executor.clone(),
                    ServiceHandle::new(executor as Arc<dyn Executor>),
                )
            });

        bootstrap
    }

    /// 注册一个实现（重复标识覆盖，可替换内建实现）
    pub fn with_factory<F>(
        mut self,
        implementation: impl Into<String>,
        role: impl Into<String>,
        constructor: F,
    ) -> Self
    where
        F: Fn() -> CreatedComponent + Send + Sync + 'static,
    {
        self.factories.register(implementation, role, constructor);
        self
    }

    /// 追加一个执行上下文可见的类型库
    pub fn with_context_library(mut self, manifest: TypeLibraryManifest) -> Self {
        self.context_libraries.push(manifest);
        self
    }

    /// 拆出工厂注册表与上下文库（容器构造时调用）
    pub(crate) fn into_parts(self) -> (FactoryRegistry, Vec<TypeLibraryManifest>) {
        (self.factories, self.context_libraries)
    }
}

impl Default for EngineBootstrap {
    fn default() -> Self {
        Self::builtin()
    }
}
