//! 库加载器
//!
//! 类加载子系统的接口边界：提供"当前执行上下文可见的类型库"（进程内
//! 静态链入内容的类比）与打开单个工件文件的能力。容器在装配完成后把
//! 引导表中的上下文库一次性安装进来

use crate::manifest::TypeLibraryManifest;
use forge_common::{Component, ComponentLogger, DeployResult, DeploymentError, LogEnabled};
use parking_lot::RwLock;
use std::any::Any;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 库加载器 trait
pub trait LibraryLoader: Send + Sync {
    /// 当前执行上下文可见的类型库
    fn context_libraries(&self) -> Vec<TypeLibraryManifest>;

    /// 安装上下文类型库（容器初始化尾声调用一次）
    fn install_context_libraries(&self, libraries: Vec<TypeLibraryManifest>);

    /// 打开一个工件文件并解析其清单
    fn open_artifact(&self, path: &Path) -> DeployResult<TypeLibraryManifest>;
}

/// 默认库加载器
#[derive(Debug, Default)]
pub struct DefaultLibraryLoader {
    context: RwLock<Vec<TypeLibraryManifest>>,
    logger: RwLock<Option<ComponentLogger>>,
}

impl DefaultLibraryLoader {
    /// 创建空库加载器
    pub fn new() -> Self {
        Self::default()
    }
}

impl LibraryLoader for DefaultLibraryLoader {
    fn context_libraries(&self) -> Vec<TypeLibraryManifest> {
        self.context.read().clone()
    }

    fn install_context_libraries(&self, libraries: Vec<TypeLibraryManifest>) {
        if let Some(logger) = self.logger.read().as_ref() {
            logger.debug(&format!("安装 {} 个上下文类型库", libraries.len()));
        }
        self.context.write().extend(libraries);
    }

    fn open_artifact(&self, path: &Path) -> DeployResult<TypeLibraryManifest> {
        let artifact = path.display().to_string();
        let file = File::open(path).map_err(|source| DeploymentError::OpenFailed {
            artifact: artifact.clone(),
            source,
        })?;
        TypeLibraryManifest::from_reader(&artifact, BufReader::new(file))
    }
}

impl Component for DefaultLibraryLoader {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_log_enabled(&self) -> Option<&dyn LogEnabled> {
        Some(self)
    }
}

impl LogEnabled for DefaultLibraryLoader {
    fn enable_logging(&self, logger: ComponentLogger) {
        *self.logger.write() = Some(logger);
    }
}
