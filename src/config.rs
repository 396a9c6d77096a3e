use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub report_format: ReportFormat,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://marcenaria.db".to_string());
        let report_format = match env::var("REPORT_FORMAT") {
            Ok(value) => parse_report_format(&value)?,
            Err(_) => ReportFormat::Text,
        };
        Ok(Self {
            database_url,
            report_format,
        })
    }
}

fn parse_report_format(value: &str) -> anyhow::Result<ReportFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "text" => Ok(ReportFormat::Text),
        "json" => Ok(ReportFormat::Json),
        other => anyhow::bail!("REPORT_FORMAT must be `text` or `json`, got {other:?}"),
    }
}
