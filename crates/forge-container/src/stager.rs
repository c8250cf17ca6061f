//! 生命周期装配器
//!
//! 把任意组件按固定顺序跑过可选的装配阶段：日志附着 → 组合 →
//! 参数化 → 初始化。组件未声明的能力直接跳过（不替代、不兜底）；
//! 任一阶段失败即中止该组件的剩余阶段并上抛，半装配对象不再复用。
//! 处置是镜像能力，仅在容器停机时尽力而为地调用，按组件隔离失败

use forge_common::{
    Component, ComponentError, ComponentLogger, ComponentResult, Parameters, ServiceResolver,
};

/// 按固定顺序装配一个组件
///
/// `parameters` 是该组件自己的快照视图，装配器会克隆一份交给声明了
/// 参数化能力的组件。
pub fn stage_component(
    role: &str,
    component: &dyn Component,
    services: &dyn ServiceResolver,
    parameters: &Parameters,
) -> ComponentResult<()> {
    if let Some(log_enabled) = component.as_log_enabled() {
        log_enabled.enable_logging(ComponentLogger::for_role(role));
        tracing::debug!(role = %role, "日志附着完成");
    }

    if let Some(composable) = component.as_composable() {
        composable.compose(services)?;
        tracing::debug!(role = %role, "组合阶段完成");
    }

    if let Some(parameterizable) = component.as_parameterizable() {
        parameterizable.parameterize(parameters.clone())?;
        tracing::debug!(role = %role, "参数化阶段完成");
    }

    if let Some(initializable) = component.as_initializable() {
        initializable.initialize()?;
        tracing::debug!(role = %role, "初始化阶段完成");
    }

    Ok(())
}

/// 尽力而为地处置一个组件
///
/// 组件未声明处置能力时为空操作；失败被记录并返回，绝不上抛，
/// 以免阻断其余组件的处置。
pub fn dispose_component(role: &str, component: &dyn Component) -> Option<ComponentError> {
    let disposable = component.as_disposable()?;
    match disposable.dispose() {
        Ok(()) => {
            tracing::debug!(role = %role, "组件处置完成");
            None
        }
        Err(error) => {
            tracing::error!(role = %role, error = %error, "组件处置失败，继续处置其余组件");
            Some(error)
        }
    }
}

/// 处置失败记录
#[derive(Debug)]
pub struct DisposalFailure {
    /// 失败组件所属角色
    pub role: String,
    /// 失败原因
    pub error: ComponentError,
}

/// 处置报告
///
/// 停机阶段的聚合结果：只上报、从不作为错误抛出。
#[derive(Debug, Default)]
pub struct DisposalReport {
    /// 处置失败的组件
    pub failures: Vec<DisposalFailure>,
}

impl DisposalReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否没有任何失败
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// 记录一个处置失败
    pub fn record(&mut self, role: impl Into<String>, error: ComponentError) {
        self.failures.push(DisposalFailure {
            role: role.into(),
            error,
        });
    }
}
