//! # Forge Common
//!
//! 这个 crate 提供 Forge 构建引擎引导内核的公共 traits 和工具。
//!
//! ## 核心组件
//!
//! - [`Component`] - 组件基础 trait（能力门控生命周期）
//! - [`Parameters`] - 分层配置参数（覆盖层优先、缺省层兜底）
//! - [`ServiceResolver`] - 角色到服务句柄的解析边界
//! - [`roles`] - 引擎内建角色标识
//!
//! ## 设计原则
//!
//! - 能力门控替代 instance-of 检查：组件以可查询的能力访问器声明自己
//!   支持哪些装配阶段
//! - 注册表归单个容器实例所有，严禁进程级全局状态
//! - 全程单线程同步执行，组件内部用锁实现 `&self` 形态的服务接口

pub mod component;
pub mod errors;
pub mod parameters;
pub mod roles;

pub use component::*;
pub use errors::*;
pub use parameters::*;
