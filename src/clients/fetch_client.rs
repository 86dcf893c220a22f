/// 答题卡抓取客户端
///
/// 封装对第三方门户的 HTTP 访问，把传输层失败映射为
/// 面向用户的类别（超时 / 不可达 / 403 / 404 / 其他）
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppResult, FetchError};

/// 答题卡抓取客户端
pub struct FetchClient {
    client: reqwest::Client,
}

impl FetchClient {
    /// 创建新的抓取客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::RequestFailed {
                url: String::new(),
                source: Box::new(e),
            })?;

        Ok(Self { client })
    }

    /// 抓取一张答题卡页面
    ///
    /// # 参数
    /// - `url`: 答题卡页面地址
    ///
    /// # 返回
    /// 返回页面的完整标记文本
    pub async fn fetch_sheet(&self, url: &str) -> Result<String, FetchError> {
        debug!("正在抓取: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            Err(FetchError::Forbidden {
                url: url.to_string(),
            })
        } else if status == StatusCode::NOT_FOUND {
            Err(FetchError::NotFound {
                url: url.to_string(),
            })
        } else if !status.is_success() {
            Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            })
        } else {
            response.text().await.map_err(|e| FetchError::BodyReadFailed {
                url: url.to_string(),
                source: Box::new(e),
            })
        }
    }
}

/// 把 reqwest 的传输错误映射为抓取错误类别
fn classify_transport_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_connect() {
        FetchError::Unreachable {
            url: url.to_string(),
        }
    } else {
        FetchError::RequestFailed {
            url: url.to_string(),
            source: Box::new(err),
        }
    }
}
