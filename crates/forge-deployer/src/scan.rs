//! 目录扫描部署
//!
//! 非递归列出目录中带识别后缀的工件，逐个绑定部署器并执行部署。
//! 单个工件失败被记录后继续扫描其余工件，聚合结果在扫描结束后一次
//! 性上报；目录不存在或不可列出按零工件处理，不算错误

use crate::deployer::Deployer;
use chrono::{DateTime, Utc};
use forge_common::DeploymentError;
use std::path::{Path, PathBuf};

/// 部署成功的工件
#[derive(Debug, Clone)]
pub struct DeployedArtifact {
    /// 工件标识
    pub artifact: String,
    /// 该工件登记的类型数
    pub registered: usize,
}

/// 部署失败的工件
#[derive(Debug)]
pub struct DeploymentFailure {
    /// 工件标识
    pub artifact: String,
    /// 失败原因（保留底层错误链）
    pub error: DeploymentError,
}

/// 部署报告
///
/// 一次 `start()` 的聚合结果：成功工件、失败工件与扫描开始时间。
#[derive(Debug)]
pub struct DeploymentReport {
    /// 扫描开始时间
    pub started_at: DateTime<Utc>,
    /// 部署成功的工件
    pub deployed: Vec<DeployedArtifact>,
    /// 部署失败的工件
    pub failures: Vec<DeploymentFailure>,
}

impl DeploymentReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            deployed: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// 是否没有任何失败
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// 登记的类型总数
    pub fn registered_total(&self) -> usize {
        self.deployed.iter().map(|d| d.registered).sum()
    }

    /// 记录一个成功工件
    pub fn record_deployed(&mut self, artifact: impl Into<String>, registered: usize) {
        self.deployed.push(DeployedArtifact {
            artifact: artifact.into(),
            registered,
        });
    }

    /// 记录一个失败工件
    pub fn record_failure(&mut self, artifact: impl Into<String>, error: DeploymentError) {
        self.failures.push(DeploymentFailure {
            artifact: artifact.into(),
            error,
        });
    }

    /// 并入另一份报告的结果
    pub fn merge(&mut self, other: DeploymentReport) {
        self.deployed.extend(other.deployed);
        self.failures.extend(other.failures);
    }
}

impl Default for DeploymentReport {
    fn default() -> Self {
        Self::new()
    }
}

/// 列出目录中带识别后缀的工件（非递归，按文件名排序保证确定性）
fn matching_artifacts(directory: &Path, suffix: &str) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(_) => {
            tracing::debug!(directory = %directory.display(), "库目录不存在或不可列出，按零工件处理");
            return Vec::new();
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(suffix))
        })
        .collect();
    matches.sort();
    matches
}

/// 部署目录中的全部匹配工件
///
/// 每个匹配项解析规范路径、绑定部署器并执行 `deploy_all`；失败的
/// 工件记入报告后继续处理其余工件。
pub fn deploy_from_directory(
    deployer: &dyn Deployer,
    directory: &Path,
    suffix: &str,
) -> DeploymentReport {
    let mut report = DeploymentReport::new();

    for path in matching_artifacts(directory, suffix) {
        // canonicalize 失败与打开失败同类，算作该工件的部署失败
        let canonical = match path.canonicalize() {
            Ok(canonical) => canonical,
            Err(source) => {
                let artifact = path.display().to_string();
                tracing::warn!(artifact = %artifact, "工件规范路径解析失败");
                report.record_failure(
                    artifact.clone(),
                    DeploymentError::OpenFailed { artifact, source },
                );
                continue;
            }
        };

        let artifact = canonical.display().to_string();
        let outcome = deployer
            .deployer_for_file(&canonical)
            .and_then(|type_deployer| type_deployer.deploy_all());
        match outcome {
            Ok(registered) => report.record_deployed(&artifact, registered),
            Err(error) => {
                tracing::warn!(artifact = %artifact, error = %error, "工件部署失败，继续扫描其余工件");
                report.record_failure(&artifact, error);
            }
        }
    }

    tracing::info!(
        directory = %directory.display(),
        deployed = report.deployed.len(),
        failed = report.failures.len(),
        "目录部署扫描完成"
    );
    report
}
