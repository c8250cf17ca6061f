//! # Forge Registry
//!
//! 这个 crate 提供 Forge 构建引擎的注册表族：
//!
//! - [`Registry`] - 泛型键值注册表，角色注册表与类型注册表共用一个契约形态
//! - [`ServiceRegistry`] - 角色 id 到服务句柄的映射（引擎内部组件装配用）
//! - [`TypeManager`] - 部署产生的类型注册表（role + 短名 → 实现引用）
//! - [`RoleManager`] - 清单短名到角色全名的翻译表
//! - [`FactoryRegistry`] - 实现标识到零参构造闭包的映射（按名构造替代反射）
//!
//! 所有注册表都归一个容器实例所有，在 `initialize()`/`start()` 期间单写者
//! 填充，引擎就绪后只读使用。

pub mod factory;
pub mod registry;
pub mod roles;
pub mod service;
pub mod types;

pub use factory::*;
pub use registry::*;
pub use roles::*;
pub use service::*;
pub use types::*;
