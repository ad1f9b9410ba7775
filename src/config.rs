use crate::error::{PlantAiError, Result};
use plant_ai_common::{AnalysisMode, Language};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "PLANT_AI_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub language: Language,
    pub mode: AnalysisMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            language: Language::default(),
            mode: AnalysisMode::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（ファイルがなければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlantAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("plant-ai").join("config.json"))
    }

    /// 使用するエンドポイント
    ///
    /// 優先順位: コマンドライン引数 > 環境変数 > 設定ファイル
    pub fn resolve_endpoint(&self, cli_override: Option<&str>) -> String {
        let env = std::env::var(ENDPOINT_ENV).ok();
        pick_endpoint(cli_override, env.as_deref(), &self.endpoint)
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        let endpoint = endpoint.trim().to_string();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(PlantAiError::Config(format!(
                "エンドポイントは http:// または https:// で始めてください: {}",
                endpoint
            )));
        }
        self.endpoint = endpoint;
        Ok(())
    }
}

fn pick_endpoint(cli: Option<&str>, env: Option<&str>, stored: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(stored)
        .to_string()
}
