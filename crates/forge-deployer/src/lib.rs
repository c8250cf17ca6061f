//! # Forge Deployer
//!
//! 这个 crate 提供 Forge 构建引擎的类型部署子系统：
//!
//! - [`TypeLibraryManifest`] - 可部署工件（`.ftl` 类型库清单）的数据模型
//! - [`LibraryLoader`] - 类加载子系统的接口边界（上下文可见库 + 打开工件）
//! - [`TypeDeployer`] / [`Deployer`] - 单一来源的部署契约与按来源创建部署器
//! - [`deploy_from_directory`] - 目录扫描辅助，按工件隔离失败并聚合上报
//!
//! "部署一个来源"与"扫描一个目录"分离，使上下文整体部署与目录逐文件
//! 部署共享同一份按来源契约，失败隔离因此保持一致。

pub mod deployer;
pub mod loader;
pub mod manifest;
pub mod scan;

pub use deployer::*;
pub use loader::*;
pub use manifest::*;
pub use scan::*;

/// 可部署工件的固定识别后缀
pub const LIBRARY_SUFFIX: &str = ".ftl";
