//! 引擎容器
//!
//! 从配置实例化角色绑定的引擎组件、按创建顺序装配、触发类型部署并
//! 独占持有全部组件直至处置。容器自身不支持并发生命周期调用，
//! 嵌入方须在外部串行化生命周期转换

use crate::bootstrap::{implementations, EngineBootstrap};
use crate::stager::{dispose_component, stage_component, DisposalReport};
use forge_common::{
    roles, Component, ConfigurationError, ContainerResult, Parameters, RoleResolutionError,
};
use forge_deployer::{
    deploy_from_directory, DeploymentReport, Deployer, LibraryLoader, TypeLibraryManifest,
    LIBRARY_SUFFIX,
};
use forge_registry::{FactoryRegistry, ServiceRegistry, TypeManager};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// 主目录参数键（必需，须指向已存在的目录）
pub const HOME_PATH: &str = "forge.home";

/// 库目录参数键（相对路径以主目录为基准解析）
pub const LIB_PATH: &str = "forge.lib.path";

/// 可执行目录参数键
pub const BIN_PATH: &str = "forge.bin.path";

/// 引擎角色的固定创建顺序
const ENGINE_ROLES: &[(&str, &str)] = &[
    (roles::TYPE_MANAGER, implementations::TYPE_MANAGER),
    (roles::ROLE_MANAGER, implementations::ROLE_MANAGER),
    (roles::CONFIGURER, implementations::CONFIGURER),
    (roles::LIBRARY_LOADER, implementations::LIBRARY_LOADER),
    (roles::DEPLOYER, implementations::DEPLOYER),
    (roles::EXECUTOR, implementations::EXECUTOR),
];

/// 一个已创建组件的登记项
struct CreatedEntry {
    role: String,
    implementation: String,
    component: Arc<dyn Component>,
}

/// 引擎容器
///
/// 嵌入方实例化此类型以在其他应用中内嵌构建引擎。多个容器实例相互
/// 独立，注册表均归各自实例所有。
pub struct EngineContainer {
    instance_id: Uuid,
    factories: FactoryRegistry,
    context_libraries: Vec<TypeLibraryManifest>,
    parameters: Option<Parameters>,
    defaults: Parameters,
    services: ServiceRegistry,
    components: Vec<CreatedEntry>,
    deployer: Option<Arc<dyn Deployer>>,
    type_manager: Option<Arc<dyn TypeManager>>,
    home_dir: Option<PathBuf>,
    library_dir: Option<PathBuf>,
    initialized: bool,
}

impl EngineContainer {
    /// 以给定引导表创建容器
    pub fn new(bootstrap: EngineBootstrap) -> Self {
        let (factories, context_libraries) = bootstrap.into_parts();
        Self {
            instance_id: Uuid::new_v4(),
            factories,
            context_libraries,
            parameters: None,
            defaults: Parameters::new(),
            services: ServiceRegistry::new(),
            components: Vec::new(),
            deployer: None,
            type_manager: None,
            home_dir: None,
            library_dir: None,
            initialized: false,
        }
    }

    /// 存入覆盖参数层，必须先于 `initialize` 调用
    pub fn configure(&mut self, parameters: Parameters) {
        tracing::debug!(container = %self.instance_id, "存入覆盖参数层");
        self.parameters = Some(parameters);
    }

    /// 初始化容器
    ///
    /// 构建缺省参数表 → 按固定顺序解析并构造各角色组件 → 按创建顺序
    /// 装配 → 提取部署器与类型管理器直接句柄 → 安装上下文类型库 →
    /// 校验并解析主目录与库目录。任何失败都对容器致命，调用方此后
    /// 不得调用 `start`。
    pub fn initialize(&mut self) -> ContainerResult<()> {
        if self.parameters.is_none() {
            return Err(ConfigurationError::NotConfigured.into());
        }
        tracing::info!(container = %self.instance_id, "容器初始化开始");

        self.defaults = Self::default_parameters();
        self.create_components()?;
        self.setup_components()?;

        self.deployer = Some(self.resolve_retained(roles::DEPLOYER)?);
        self.type_manager = Some(self.resolve_retained(roles::TYPE_MANAGER)?);

        let loader: Arc<dyn LibraryLoader> = self.resolve_retained(roles::LIBRARY_LOADER)?;
        loader.install_context_libraries(std::mem::take(&mut self.context_libraries));

        self.setup_directories()?;

        self.initialized = true;
        tracing::info!(
            container = %self.instance_id,
            components = self.components.len(),
            "容器初始化完成"
        );
        Ok(())
    }

    /// 启动容器：触发类型部署
    ///
    /// 先对当前执行上下文整体部署（此来源损坏对启动致命），再对库
    /// 目录做逐工件扫描（按工件隔离失败，聚合进返回的报告）。
    pub fn start(&mut self) -> ContainerResult<DeploymentReport> {
        if !self.initialized {
            return Err(ConfigurationError::NotInitialized.into());
        }
        let deployer = self
            .deployer
            .as_ref()
            .ok_or(ConfigurationError::NotInitialized)?;
        tracing::info!(container = %self.instance_id, "容器启动：开始类型部署");

        let mut report = DeploymentReport::new();

        // 上下文是单一逻辑来源，首个失败即上抛
        let registered = deployer.deployer_for_context()?.deploy_all()?;
        report.record_deployed("<context>", registered);

        if let Some(library_dir) = self.library_dir.as_deref() {
            let scan_report =
                deploy_from_directory(deployer.as_ref(), library_dir, LIBRARY_SUFFIX);
            report.merge(scan_report);
        }

        tracing::info!(
            container = %self.instance_id,
            registered = report.registered_total(),
            failures = report.failures.len(),
            "容器启动完成"
        );
        Ok(report)
    }

    /// 停止容器
    ///
    /// 预留给撤销部署的反向操作，目前为显式空操作。
    pub fn stop(&mut self) {
        tracing::debug!(container = %self.instance_id, "stop 为显式空操作");
    }

    /// 处置容器
    ///
    /// 按组件隔离失败地处置所有声明了处置能力的组件，然后清空容器
    /// 全部状态使其不可复用。幂等：再次调用为无害空操作。
    pub fn dispose(&mut self) -> DisposalReport {
        let mut report = DisposalReport::new();
        for entry in self.components.drain(..) {
            if let Some(error) = dispose_component(&entry.role, entry.component.as_ref()) {
                report.record(&entry.role, error);
            }
        }

        self.services.clear();
        self.deployer = None;
        self.type_manager = None;
        self.parameters = None;
        self.defaults = Parameters::new();
        self.home_dir = None;
        self.library_dir = None;
        self.initialized = false;

        tracing::info!(
            container = %self.instance_id,
            failures = report.failures.len(),
            "容器已处置"
        );
        report
    }

    /// 类型管理器句柄（下游引擎只读消费类型注册表）
    pub fn type_manager(&self) -> Option<Arc<dyn TypeManager>> {
        self.type_manager.clone()
    }

    /// 已解析的主目录
    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    /// 已解析的库目录
    pub fn library_dir(&self) -> Option<&Path> {
        self.library_dir.as_deref()
    }

    /// 容器是否已完成初始化
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 缺省参数表：目录缺省值与各角色的默认实现标识
    fn default_parameters() -> Parameters {
        let mut defaults = Parameters::new();
        defaults.set(BIN_PATH, "bin");
        defaults.set(LIB_PATH, "lib");
        for (role, implementation) in ENGINE_ROLES {
            defaults.set(*role, *implementation);
        }
        defaults
    }

    /// 覆盖优先、缺省兜底的参数查询
    fn parameter(&self, key: &str) -> Option<String> {
        self.parameters
            .as_ref()
            .and_then(|p| p.get(key))
            .or_else(|| self.defaults.get(key))
            .map(String::from)
    }

    /// 按固定顺序解析实现标识并构造全部引擎组件
    fn create_components(&mut self) -> ContainerResult<()> {
        for (role, _) in ENGINE_ROLES {
            let implementation = self
                .parameter(role)
                .ok_or_else(|| ConfigurationError::missing_parameter(*role))?;
            let created = self.factories.create(role, &implementation)?;
            self.services.register(*role, created.service.clone())?;
            tracing::debug!(role = %role, implementation = %implementation, "组件创建完成");
            self.components.push(CreatedEntry {
                role: role.to_string(),
                implementation,
                component: created.component,
            });
        }
        Ok(())
    }

    /// 按创建顺序装配全部组件
    fn setup_components(&mut self) -> ContainerResult<()> {
        let overrides = self
            .parameters
            .as_ref()
            .ok_or(ConfigurationError::NotConfigured)?;
        let snapshot = overrides.merged_over(&self.defaults);
        for entry in &self.components {
            stage_component(&entry.role, entry.component.as_ref(), &self.services, &snapshot)?;
        }
        Ok(())
    }

    /// 解析容器自身保留的直接句柄
    fn resolve_retained<T: Clone + 'static>(&self, role: &str) -> ContainerResult<T> {
        let implementation = self
            .components
            .iter()
            .find(|entry| entry.role == role)
            .map(|entry| entry.implementation.clone())
            .unwrap_or_default();
        self.services.resolve::<T>(role).map_err(|_| {
            RoleResolutionError::ServiceContract {
                role: role.to_string(),
                implementation,
            }
            .into()
        })
    }

    /// 校验并解析主目录与库目录
    ///
    /// 主目录必须存在且是目录；库目录以主目录为基准解析相对路径，
    /// 允许不存在（扫描按零工件处理），但存在时必须是目录。
    fn setup_directories(&mut self) -> ContainerResult<()> {
        let home = self
            .parameter(HOME_PATH)
            .ok_or_else(|| ConfigurationError::missing_parameter(HOME_PATH))?;
        let home_dir = PathBuf::from(home);
        check_directory(&home_dir, "home")?;

        let lib = self
            .parameter(LIB_PATH)
            .ok_or_else(|| ConfigurationError::missing_parameter(LIB_PATH))?;
        let library_dir = resolve_directory(&home_dir, Path::new(&lib));
        if library_dir.exists() {
            check_directory(&library_dir, "task-lib-dir")?;
        }

        tracing::debug!(
            home = %home_dir.display(),
            library = %library_dir.display(),
            "目录解析完成"
        );
        self.home_dir = Some(home_dir);
        self.library_dir = Some(library_dir);
        Ok(())
    }
}

/// 相对路径以基准目录解析，绝对路径原样使用
fn resolve_directory(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// 校验路径存在且是目录
fn check_directory(path: &Path, name: &str) -> Result<(), ConfigurationError> {
    if !path.exists() {
        return Err(ConfigurationError::DirectoryNotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigurationError::NotADirectory {
            name: name.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_cover_all_roles() {
        let defaults = EngineContainer::default_parameters();
        for (role, implementation) in ENGINE_ROLES {
            assert_eq!(defaults.get(role), Some(*implementation));
        }
        assert_eq!(defaults.get(LIB_PATH), Some("lib"));
        assert_eq!(defaults.get(BIN_PATH), Some("bin"));
    }

    #[test]
    fn test_initialize_requires_configure() {
        let mut container = EngineContainer::new(EngineBootstrap::builtin());
        let err = container.initialize().unwrap_err();
        assert!(matches!(
            err,
            forge_common::ContainerError::Configuration {
                source: ConfigurationError::NotConfigured
            }
        ));
    }

    #[test]
    fn test_start_requires_initialize() {
        let mut container = EngineContainer::new(EngineBootstrap::builtin());
        container.configure(Parameters::new());
        let err = container.start().unwrap_err();
        assert!(matches!(
            err,
            forge_common::ContainerError::Configuration {
                source: ConfigurationError::NotInitialized
            }
        ));
    }

    #[test]
    fn test_resolve_directory() {
        assert_eq!(
            resolve_directory(Path::new("/opt/forge"), Path::new("lib")),
            PathBuf::from("/opt/forge/lib")
        );
        assert_eq!(
            resolve_directory(Path::new("/opt/forge"), Path::new("/var/lib")),
            PathBuf::from("/var/lib")
        );
    }
}
