//! 最小嵌入示例
//!
//! 搭一个临时的 home/lib 目录布局，跑一遍完整的容器生命周期：
//! configure → initialize → start → stop → dispose

use forge_common::Parameters;
use forge_container::{EngineBootstrap, EngineContainer, HOME_PATH, LIB_PATH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 临时引擎布局：home 下一个 lib 目录，内含一个类型库清单
    let home = tempfile::tempdir()?;
    let lib_dir = home.path().join("lib");
    std::fs::create_dir(&lib_dir)?;
    std::fs::write(
        lib_dir.join("core-tasks.ftl"),
        serde_json::json!({
            "library": "core-tasks",
            "types": [
                { "role": "task", "name": "echo", "implementation": "forge.tasks.echo" },
                { "role": "task", "name": "copy", "implementation": "forge.tasks.copy" }
            ]
        })
        .to_string(),
    )?;

    let mut parameters = Parameters::new();
    parameters.set(HOME_PATH, home.path().display().to_string());
    parameters.set(LIB_PATH, "lib");

    let mut container = EngineContainer::new(EngineBootstrap::builtin());
    container.configure(parameters);
    container.initialize()?;

    let report = container.start()?;
    println!(
        "部署完成: {} 个类型, {} 个失败工件",
        report.registered_total(),
        report.failures.len()
    );

    if let Some(type_manager) = container.type_manager() {
        let registration = type_manager.lookup_type("forge.role.task", "echo")?;
        println!("echo 任务由 {} 提供", registration.implementation);
    }

    container.stop();
    let disposal = container.dispose();
    println!("处置完成, 失败 {} 个组件", disposal.failures.len());
    Ok(())
}
