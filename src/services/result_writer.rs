//! 结果写入服务 - 业务能力层
//!
//! 只负责"把校验结果写成 JSON 文件"，不关心流程

use crate::error::{AppError, AppResult};
use crate::models::FieldSet;
use serde::Serialize;
use tracing::debug;

/// 输出文件的内容
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    pub generated_at: String,
    pub total: usize,
    pub attempted: usize,
    pub with_data: usize,
    pub with_error: usize,
    pub session_unhealthy: bool,
    pub results: &'a [FieldSet],
}

impl<'a> ValidationReport<'a> {
    pub fn new(results: &'a [FieldSet], total: usize, session_unhealthy: bool) -> Self {
        let with_data = results.iter().filter(|r| r.has_data()).count();
        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total,
            attempted: results.len(),
            with_data,
            with_error: results.len() - with_data,
            session_unhealthy,
            results,
        }
    }
}

/// 结果写入服务
pub struct ResultWriter {
    output_path: String,
}

impl ResultWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.output_path
    }

    /// 覆盖写入整份报告
    pub async fn write(&self, report: &ValidationReport<'_>) -> AppResult<()> {
        debug!(
            "写入结果: {} 条记录 -> {}",
            report.results.len(),
            self.output_path
        );

        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&self.output_path, json)
            .await
            .map_err(|e| AppError::file_write_failed(&self.output_path, e))?;

        Ok(())
    }
}
