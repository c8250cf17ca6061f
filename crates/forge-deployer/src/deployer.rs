//! 类型部署器
//!
//! 单一部署来源（执行上下文或单个文件）的打开 → 枚举声明 → 登记注册
//! 序列。部署器角色按来源创建一次性 [`TypeDeployer`]，部署完成后即丢弃

use crate::loader::LibraryLoader;
use crate::manifest::TypeLibraryManifest;
use forge_common::{
    roles, Component, ComponentLogger, ComponentResult, Composable, DeployResult,
    DeploymentError, LogEnabled, ServiceResolver, ServiceResolverExt,
};
use forge_registry::{ImplementationRef, RoleManager, TypeManager, TypeRegistration};
use parking_lot::RwLock;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 绑定到单一来源的部署器契约
pub trait TypeDeployer {
    /// 执行打开 → 枚举 → 登记序列，返回登记的类型数
    fn deploy_all(&self) -> DeployResult<usize>;
}

impl std::fmt::Debug for dyn TypeDeployer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TypeDeployer")
    }
}

/// 部署器角色契约
///
/// 按来源创建 [`TypeDeployer`]：上下文整体是一个逻辑来源，目录中的
/// 每个工件文件各是一个来源，两者共享同一份按来源部署契约。
pub trait Deployer: Send + Sync {
    /// 为单个工件文件创建部署器
    fn deployer_for_file(&self, path: &Path) -> DeployResult<Box<dyn TypeDeployer>>;

    /// 为当前执行上下文创建部署器
    fn deployer_for_context(&self) -> DeployResult<Box<dyn TypeDeployer>>;
}

/// 部署器的协作者句柄（组合阶段解析）
#[derive(Clone)]
struct DeployerWiring {
    type_manager: Arc<dyn TypeManager>,
    role_manager: Arc<dyn RoleManager>,
    loader: Arc<dyn LibraryLoader>,
}

impl DeployerWiring {
    /// 把一份清单的全部声明登记进类型注册表
    fn register_manifest(
        &self,
        artifact: &str,
        manifest: &TypeLibraryManifest,
    ) -> DeployResult<usize> {
        let mut registered = 0;
        for declaration in &manifest.types {
            let role_id = self
                .role_manager
                .role_for_name(&declaration.role)
                .map_err(|_| DeploymentError::UnknownTypeRole {
                    artifact: artifact.to_string(),
                    role: declaration.role.clone(),
                })?;
            self.type_manager
                .register_type(TypeRegistration {
                    role: role_id,
                    name: declaration.name.clone(),
                    implementation: ImplementationRef::new(&declaration.implementation),
                })
                .map_err(|source| DeploymentError::RegistrationFailed {
                    artifact: artifact.to_string(),
                    source,
                })?;
            registered += 1;
        }
        Ok(registered)
    }
}

/// 默认部署器组件
///
/// 组合阶段从角色注册表解析类型管理器、角色管理器与库加载器。
#[derive(Default)]
pub struct DefaultDeployer {
    wiring: RwLock<Option<DeployerWiring>>,
    logger: RwLock<Option<ComponentLogger>>,
}

impl DefaultDeployer {
    /// 创建未组合的部署器
    pub fn new() -> Self {
        Self::default()
    }

    fn wiring(&self, artifact: &str) -> DeployResult<DeployerWiring> {
        self.wiring
            .read()
            .clone()
            .ok_or_else(|| DeploymentError::NotComposed {
                artifact: artifact.to_string(),
            })
    }
}

impl Deployer for DefaultDeployer {
    fn deployer_for_file(&self, path: &Path) -> DeployResult<Box<dyn TypeDeployer>> {
        let wiring = self.wiring(&path.display().to_string())?;
        Ok(Box::new(FileTypeDeployer {
            path: path.to_path_buf(),
            wiring,
        }))
    }

    fn deployer_for_context(&self) -> DeployResult<Box<dyn TypeDeployer>> {
        let wiring = self.wiring("<context>")?;
        Ok(Box::new(ContextTypeDeployer { wiring }))
    }
}

impl Component for DefaultDeployer {
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

impl LogEnabled for DefaultDeployer {
    fn enable_logging(&self, logger: ComponentLogger) {
        *self.logger.write() = Some(logger);
    }
}

impl Composable for DefaultDeployer {
    fn compose(&self, services: &dyn ServiceResolver) -> ComponentResult<()> {
        let wiring = DeployerWiring {
            type_manager: services.resolve_service(roles::TYPE_MANAGER)?,
            role_manager: services.resolve_service(roles::ROLE_MANAGER)?,
            loader: services.resolve_service(roles::LIBRARY_LOADER)?,
        };
        *self.wiring.write() = Some(wiring);
        if let Some(logger) = self.logger.read().as_ref() {
            logger.debug("部署器协作者解析完成");
        }
        Ok(())
    }
}

/// 绑定到单个工件文件的部署器
struct FileTypeDeployer {
    path: PathBuf,
    wiring: DeployerWiring,
}

impl TypeDeployer for FileTypeDeployer {
    fn deploy_all(&self) -> DeployResult<usize> {
        let artifact = self.path.display().to_string();
        let manifest = self.wiring.loader.open_artifact(&self.path)?;
        let registered = self.wiring.register_manifest(&artifact, &manifest)?;
        tracing::info!(
            artifact = %artifact,
            library = %manifest.library,
            registered,
            "类型库部署完成"
        );
        Ok(registered)
    }
}

/// 绑定到当前执行上下文的部署器
///
/// 上下文可见的全部库构成一个逻辑来源，首个失败即中止并上抛。
struct ContextTypeDeployer {
    wiring: DeployerWiring,
}

impl TypeDeployer for ContextTypeDeployer {
    fn deploy_all(&self) -> DeployResult<usize> {
        let mut registered = 0;
        for manifest in self.wiring.loader.context_libraries() {
            let artifact = format!("<context>/{}", manifest.library);
            registered += self.wiring.register_manifest(&artifact, &manifest)?;
        }
        tracing::info!(registered, "执行上下文类型库部署完成");
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DefaultLibraryLoader;
    use crate::manifest::TypeDeclaration;
    use forge_common::{Initializable, ServiceHandle};
    use forge_registry::{DefaultRoleManager, DefaultTypeManager, ServiceRegistry};

    fn composed_deployer() -> (DefaultDeployer, Arc<DefaultTypeManager>, Arc<DefaultLibraryLoader>)
    {
        let type_manager = Arc::new(DefaultTypeManager::new());
        let role_manager = Arc::new(DefaultRoleManager::new());
        role_manager.initialize().unwrap();
        let loader = Arc::new(DefaultLibraryLoader::new());

        let mut services = ServiceRegistry::new();
        services
            .register(
                roles::TYPE_MANAGER,
                ServiceHandle::new(type_manager.clone() as Arc<dyn TypeManager>),
            )
            .unwrap();
        services
            .register(
                roles::ROLE_MANAGER,
                ServiceHandle::new(role_manager as Arc<dyn RoleManager>),
            )
            .unwrap();
        services
            .register(
                roles::LIBRARY_LOADER,
                ServiceHandle::new(loader.clone() as Arc<dyn LibraryLoader>),
            )
            .unwrap();

        let deployer = DefaultDeployer::new();
        deployer.compose(&services).unwrap();
        (deployer, type_manager, loader)
    }

    fn manifest(library: &str, name: &str) -> TypeLibraryManifest {
        TypeLibraryManifest {
            library: library.to_string(),
            types: vec![TypeDeclaration {
                role: "task".to_string(),
                name: name.to_string(),
                implementation: format!("forge.tasks.{name}"),
            }],
        }
    }

    #[test]
    fn test_context_deployment_registers_types() {
        let (deployer, type_manager, loader) = composed_deployer();
        loader.install_context_libraries(vec![manifest("builtin", "echo")]);

        let registered = deployer.deployer_for_context().unwrap().deploy_all().unwrap();
        assert_eq!(registered, 1);
        assert!(type_manager.lookup_type("forge.role.task", "echo").is_ok());
    }

    #[test]
    fn test_unknown_role_shorthand_fails_with_artifact() {
        let (deployer, _type_manager, loader) = composed_deployer();
        let mut bad = manifest("bad", "echo");
        bad.types[0].role = "no-such-role".to_string();
        loader.install_context_libraries(vec![bad]);

        let err = deployer
            .deployer_for_context()
            .unwrap()
            .deploy_all()
            .unwrap_err();
        assert!(matches!(err, DeploymentError::UnknownTypeRole { .. }));
        assert_eq!(err.artifact(), "<context>/bad");
    }

    #[test]
    fn test_uncomposed_deployer_reports_not_composed() {
        let deployer = DefaultDeployer::new();
        let err = deployer.deployer_for_context().unwrap_err();
        assert!(matches!(err, DeploymentError::NotComposed { .. }));
    }
}
