//! 容器集成测试的共享夹具
//!
//! 提供临时 home/lib 目录布局与类型库清单写盘工具

use forge_common::Parameters;
use forge_container::{HOME_PATH, LIB_PATH};
use std::path::Path;
use tempfile::TempDir;

/// 临时引擎目录布局：home 下一个 lib 子目录
pub struct EngineLayout {
    home: TempDir,
}

impl EngineLayout {
    /// 创建带空 lib 目录的布局
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("创建临时 home 目录");
        std::fs::create_dir(home.path().join("lib")).expect("创建 lib 目录");
        Self { home }
    }

    /// home 目录路径
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// 写入一个类型库清单工件
    pub fn write_library(&self, file_name: &str, library: &str, types: &[(&str, &str, &str)]) {
        let declarations: Vec<_> = types
            .iter()
            .map(|(role, name, implementation)| {
                serde_json::json!({
                    "role": role,
                    "name": name,
                    "implementation": implementation,
                })
            })
            .collect();
        let manifest = serde_json::json!({ "library": library, "types": declarations });
        std::fs::write(
            self.home.path().join("lib").join(file_name),
            manifest.to_string(),
        )
        .expect("写入类型库清单");
    }

    /// 写入一个格式损坏的工件
    pub fn write_malformed(&self, file_name: &str) {
        std::fs::write(self.home.path().join("lib").join(file_name), b"not json at all")
            .expect("写入损坏工件");
    }

    /// 指向该布局的覆盖参数
    pub fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        parameters.set(HOME_PATH, self.home.path().display().to_string());
        parameters.set(LIB_PATH, "lib");
        parameters
    }
}

impl Default for EngineLayout {
    fn default() -> Self {
        Self::new()
    }
}
