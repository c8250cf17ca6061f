//! 引擎内建角色标识
//!
//! 角色是命名服务契约的不透明标识，约定采用全限定能力名。每个容器
//! 实例中一个角色至多绑定一个活动实现。角色 id 同时充当配置覆盖键：
//! 参数集合中以角色 id 为键的值即该角色的实现标识覆盖。

/// 类型管理器角色：持有部署产生的类型注册表
pub const TYPE_MANAGER: &str = "forge.role.type-manager";

/// 角色管理器角色：清单短名到角色全名的翻译表
pub const ROLE_MANAGER: &str = "forge.role.role-manager";

/// 部署器角色：按单一来源部署类型库
pub const DEPLOYER: &str = "forge.role.deployer";

/// 库加载器角色：提供执行上下文可见的类型库与工件打开能力
pub const LIBRARY_LOADER: &str = "forge.role.library-loader";

/// 配置器角色：外部协作者，仅按接口边界占位
pub const CONFIGURER: &str = "forge.role.configurer";

/// 执行器角色：外部协作者，仅按接口边界占位
pub const EXECUTOR: &str = "forge.role.executor";
