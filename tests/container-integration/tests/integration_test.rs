//! 容器生命周期与类型部署的集中集成测试

use container_integration::EngineLayout;
use forge_common::{
    roles, Component, ComponentError, ComponentResult, ConfigurationError, ContainerError,
    Disposable, Initializable, Parameters, ServiceHandle,
};
use forge_container::{implementations, EngineBootstrap, EngineContainer, HOME_PATH};
use forge_deployer::{TypeDeclaration, TypeLibraryManifest};
use forge_registry::{CreatedComponent, ImplementationRef};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可观测构造与装配的探针组件（充当执行器角色的替代实现）
struct ProbeExecutor {
    stages: Arc<Mutex<Vec<&'static str>>>,
    fail_initialize: bool,
    fail_dispose: bool,
}

impl forge_container::Executor for ProbeExecutor {}

impl Component for ProbeExecutor {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl Initializable for ProbeExecutor {
    fn initialize(&self) -> ComponentResult<()> {
        if self.fail_initialize {
            return Err(ComponentError::initialize_failed(roles::EXECUTOR, "探针故意失败"));
        }
        self.stages.lock().push("initialize");
        Ok(())
    }
}

impl Disposable for ProbeExecutor {
    fn dispose(&self) -> ComponentResult<()> {
        if self.fail_dispose {
            return Err(ComponentError::dispose_failed(roles::EXECUTOR, "探针处置失败"));
        }
        self.stages.lock().push("dispose");
        Ok(())
    }
}

/// 注册探针执行器工厂的引导表
fn bootstrap_with_probe(
    constructed: Arc<AtomicBool>,
    stages: Arc<Mutex<Vec<&'static str>>>,
    fail_initialize: bool,
    fail_dispose: bool,
) -> EngineBootstrap {
    EngineBootstrap::builtin().with_factory("probe-executor", roles::EXECUTOR, move || {
        constructed.store(true, Ordering::SeqCst);
        let probe = Arc::new(ProbeExecutor {
            stages: stages.clone(),
            fail_initialize,
            fail_dispose,
        });
        CreatedComponent::new(probe.clone(), ServiceHandle::new(probe))
    })
}

#[test]
fn test_override_wins_over_default() {
    let layout = EngineLayout::new();
    let constructed = Arc::new(AtomicBool::new(false));
    let stages = Arc::new(Mutex::new(Vec::new()));
    let bootstrap = bootstrap_with_probe(constructed.clone(), stages.clone(), false, false);

    let mut parameters = layout.parameters();
    parameters.set(roles::EXECUTOR, "probe-executor");

    let mut container = EngineContainer::new(bootstrap);
    container.configure(parameters);
    container.initialize().unwrap();

    assert!(constructed.load(Ordering::SeqCst), "覆盖实现应被实例化");
    assert_eq!(*stages.lock(), vec!["initialize"]);
}

#[test]
fn test_default_used_without_override() {
    let layout = EngineLayout::new();
    let constructed = Arc::new(AtomicBool::new(false));
    let stages = Arc::new(Mutex::new(Vec::new()));
    let bootstrap = bootstrap_with_probe(constructed.clone(), stages, false, false);

    let mut container = EngineContainer::new(bootstrap);
    container.configure(layout.parameters());
    container.initialize().unwrap();

    assert!(
        !constructed.load(Ordering::SeqCst),
        "无覆盖时不应实例化替代实现"
    );
    assert!(container.is_initialized());
}

#[test]
fn test_only_declared_stages_run() {
    // 探针只声明初始化与处置能力，装配应恰好执行初始化一个阶段
    let layout = EngineLayout::new();
    let stages = Arc::new(Mutex::new(Vec::new()));
    let bootstrap = bootstrap_with_probe(
        Arc::new(AtomicBool::new(false)),
        stages.clone(),
        false,
        false,
    );

    let mut parameters = layout.parameters();
    parameters.set(roles::EXECUTOR, "probe-executor");

    let mut container = EngineContainer::new(bootstrap);
    container.configure(parameters);
    container.initialize().unwrap();
    assert_eq!(*stages.lock(), vec!["initialize"]);
}

#[test]
fn test_stage_failure_aborts_initialize() {
    let layout = EngineLayout::new();
    let bootstrap = bootstrap_with_probe(
        Arc::new(AtomicBool::new(false)),
        Arc::new(Mutex::new(Vec::new())),
        true,
        false,
    );

    let mut parameters = layout.parameters();
    parameters.set(roles::EXECUTOR, "probe-executor");

    let mut container = EngineContainer::new(bootstrap);
    container.configure(parameters);
    let err = container.initialize().unwrap_err();
    assert!(matches!(err, ContainerError::Component { .. }));
    assert!(!container.is_initialized());

    // 初始化失败后容器不可启动
    assert!(container.start().is_err());
}

#[test]
fn test_unknown_implementation_is_fatal() {
    let layout = EngineLayout::new();
    let mut parameters = layout.parameters();
    parameters.set(roles::EXECUTOR, "no-such-implementation");

    let mut container = EngineContainer::new(EngineBootstrap::builtin());
    container.configure(parameters);
    let err = container.initialize().unwrap_err();
    assert!(matches!(err, ContainerError::RoleResolution { .. }));
}

#[test]
fn test_home_directory_must_exist() {
    let mut parameters = Parameters::new();
    parameters.set(HOME_PATH, "/nonexistent/forge-home");

    let mut container = EngineContainer::new(EngineBootstrap::builtin());
    container.configure(parameters);
    let err = container.initialize().unwrap_err();
    assert!(matches!(
        err,
        ContainerError::Configuration {
            source: ConfigurationError::DirectoryNotFound { .. }
        }
    ));
}

#[test]
fn test_home_directory_must_be_directory() {
    let layout = EngineLayout::new();
    let file_path = layout.home().join("not-a-dir");
    std::fs::write(&file_path, b"plain file").unwrap();

    let mut parameters = Parameters::new();
    parameters.set(HOME_PATH, file_path.display().to_string());

    let mut container = EngineContainer::new(EngineBootstrap::builtin());
    container.configure(parameters);
    let err = container.initialize().unwrap_err();
    assert!(matches!(
        err,
        ContainerError::Configuration {
            source: ConfigurationError::NotADirectory { .. }
        }
    ));
}

#[test]
fn test_directory_deployment_isolates_malformed_artifact() {
    let layout = EngineLayout::new();
    layout.write_library(
        "alpha.ftl",
        "alpha",
        &[("task", "echo", "forge.tasks.echo")],
    );
    layout.write_malformed("broken.ftl");
    layout.write_library(
        "zeta.ftl",
        "zeta",
        &[("task", "copy", "forge.tasks.copy")],
    );

    let mut container = EngineContainer::new(EngineBootstrap::builtin());
    container.configure(layout.parameters());
    container.initialize().unwrap();

    let report = container.start().unwrap();
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].artifact.contains("broken.ftl"));
    assert_eq!(report.registered_total(), 2);

    let type_manager = container.type_manager().unwrap();
    assert!(type_manager.lookup_type("forge.role.task", "echo").is_ok());
    assert!(type_manager.lookup_type("forge.role.task", "copy").is_ok());
}

#[test]
fn test_missing_library_directory_is_not_an_error() {
    let layout = EngineLayout::new();
    let mut parameters = layout.parameters();
    parameters.set(forge_container::LIB_PATH, "no-such-dir");

    let mut container = EngineContainer::new(EngineBootstrap::builtin());
    container.configure(parameters);
    container.initialize().unwrap();

    let report = container.start().unwrap();
    assert!(report.is_clean());
    assert_eq!(report.registered_total(), 0);
}

#[test]
fn test_context_libraries_deploy_before_directory() {
    let layout = EngineLayout::new();
    let bootstrap = EngineBootstrap::builtin().with_context_library(TypeLibraryManifest {
        library: "builtin-tasks".to_string(),
        types: vec![TypeDeclaration {
            role: "task".to_string(),
            name: "noop".to_string(),
            implementation: "forge.tasks.noop".to_string(),
        }],
    });

    let mut container = EngineContainer::new(bootstrap);
    container.configure(layout.parameters());
    container.initialize().unwrap();

    let report = container.start().unwrap();
    assert_eq!(report.registered_total(), 1);

    let type_manager = container.type_manager().unwrap();
    let registration = type_manager.lookup_type("forge.role.task", "noop").unwrap();
    assert_eq!(
        registration.implementation,
        ImplementationRef::new("forge.tasks.noop")
    );
}

#[test]
fn test_malformed_context_library_is_fatal_to_start() {
    let layout = EngineLayout::new();
    let bootstrap = EngineBootstrap::builtin().with_context_library(TypeLibraryManifest {
        library: "bad-context".to_string(),
        types: vec![TypeDeclaration {
            role: "no-such-shorthand".to_string(),
            name: "x".to_string(),
            implementation: "y".to_string(),
        }],
    });

    let mut container = EngineContainer::new(bootstrap);
    container.configure(layout.parameters());
    container.initialize().unwrap();

    let err = container.start().unwrap_err();
    assert!(matches!(err, ContainerError::Deployment { .. }));
}

#[test]
fn test_type_registration_roundtrip() {
    let layout = EngineLayout::new();
    layout.write_library(
        "exact.ftl",
        "exact",
        &[("converter", "string-to-path", "forge.convert.string_to_path")],
    );

    let mut container = EngineContainer::new(EngineBootstrap::builtin());
    container.configure(layout.parameters());
    container.initialize().unwrap();
    container.start().unwrap();

    let type_manager = container.type_manager().unwrap();
    let registration = type_manager
        .lookup_type("forge.role.converter", "string-to-path")
        .unwrap();
    assert_eq!(
        registration.implementation,
        ImplementationRef::new("forge.convert.string_to_path")
    );
}

#[test]
fn test_dispose_is_idempotent_and_never_raises() {
    let layout = EngineLayout::new();
    let bootstrap = bootstrap_with_probe(
        Arc::new(AtomicBool::new(false)),
        Arc::new(Mutex::new(Vec::new())),
        false,
        true,
    );

    let mut parameters = layout.parameters();
    parameters.set(roles::EXECUTOR, "probe-executor");

    let mut container = EngineContainer::new(bootstrap);
    container.configure(parameters);
    container.initialize().unwrap();

    let first = container.dispose();
    assert_eq!(first.failures.len(), 1, "探针的处置失败应被上报");
    assert_eq!(first.failures[0].role, roles::EXECUTOR);
    assert!(!container.is_initialized());
    assert!(container.type_manager().is_none());

    let second = container.dispose();
    assert!(second.is_clean(), "第二次处置应为无害空操作");
}

#[test]
fn test_implementations_table_matches_defaults() {
    // 内建实现标识保持稳定，配置覆盖以此为参照
    assert_eq!(implementations::TYPE_MANAGER, "default-type-manager");
    assert_eq!(implementations::DEPLOYER, "default-deployer");
}
