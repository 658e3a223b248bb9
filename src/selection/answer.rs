use std::collections::VecDeque;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::presenter::SelectionIndexMap;

pub const RETRY_MESSAGE: &str = "Try again";

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("输入已结束")]
    Closed,

    #[error("读取输入失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 从用户输入中逐个读取空白分隔的 token
///
/// 一行里多余的 token 会保留给下一次提问。
pub struct AnswerReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: AsyncBufRead + Unpin> AnswerReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    async fn next_token(&mut self) -> Result<String, AnswerError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                return Err(AnswerError::Closed);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    /// 阻塞直到拿到一个落在映射范围内的编号，返回对应的原始下标
    pub async fn read_choice<W>(
        &mut self,
        map: &SelectionIndexMap,
        out: &mut W,
    ) -> Result<usize, AnswerError>
    where
        W: AsyncWrite + Unpin,
    {
        loop {
            let token = self.next_token().await?;
            let choice = match token.parse::<i64>() {
                Ok(choice) => choice,
                Err(_) => {
                    debug!("无效输入: {:?}", token);
                    out.write_all(format!("{}\n", RETRY_MESSAGE).as_bytes())
                        .await?;
                    out.flush().await?;
                    continue;
                }
            };

            match map.resolve(choice) {
                Some(index) => return Ok(index),
                None => {
                    debug!("编号越界: {}", choice);
                    let message = format!(
                        "No title numbered {}, pick one between 1 and {}\n",
                        choice,
                        map.len()
                    );
                    out.write_all(message.as_bytes()).await?;
                    out.flush().await?;
                }
            }
        }
    }
}
