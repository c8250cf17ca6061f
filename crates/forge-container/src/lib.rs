//! # Forge Container
//!
//! 这个 crate 提供 Forge 构建引擎的组件容器：从配置实例化角色绑定的
//! 引擎组件、驱动固定顺序的装配阶段、触发类型部署并持有组件至容器
//! 生命周期结束。
//!
//! ## 生命周期
//!
//! ```text
//! configure → initialize → start → (引擎运行) → stop → dispose
//! ```
//!
//! - `initialize` 失败对容器致命，此后不得调用 `start`
//! - `start` 的按工件部署失败被隔离聚合，随报告一次性上报
//! - `dispose` 幂等，组件处置失败只上报、不中断其余组件的处置

pub mod bootstrap;
pub mod collaborators;
pub mod container;
pub mod stager;

pub use bootstrap::*;
pub use collaborators::*;
pub use container::*;
pub use stager::*;
