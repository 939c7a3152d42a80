use std::collections::HashMap;

use log::{debug, error, info};
use reqwest::{Response, StatusCode, Url};
use tokio::task::JoinHandle;

use crate::{
    api::models::{Message, RecordScore, RegisterNickname},
    store::{rank, LeaderboardEntry},
    Error,
    Result,
};

/// Talks to the nickname and score endpoints.
#[derive(Clone, Debug)]
pub struct ScoreClient {
    http: reqwest::Client,
    base: Url,
}

impl ScoreClient {
    #[must_use]
    pub fn new(mut base: Url) -> Self {
        // endpoints join relative to the base, so it must end in a slash to
        // keep any path prefix
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("bad server url: {e}")))
    }

    /// # Errors
    ///
    /// [`Error::Conflict`] carrying the server's suggestion if the name is
    /// taken, [`Error::Validation`] for a rejected name, and
    /// [`Error::Transport`] if the server can't be reached.
    pub async fn register(&self, nickname: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("api/register-nickname")?)
            .json(&RegisterNickname {
                nickname: Some(nickname.to_owned()),
            })
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            let body: Message = response.json().await?;
            return Err(Error::Conflict {
                nickname:   nickname.to_owned(),
                suggestion: body.suggestion.unwrap_or_default(),
            });
        }

        expect_success(response).await?;
        info!("registered as {}", nickname);
        Ok(())
    }

    /// # Errors
    ///
    /// [`Error::Validation`] if the server rejects the submission and
    /// [`Error::Transport`] if it can't be reached.
    pub async fn record_score(&self, nickname: &str, score: i64) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("api/record-score")?)
            .json(&RecordScore {
                nickname: Some(nickname.to_owned()),
                score:    Some(score),
            })
            .send()
            .await?;

        expect_success(response).await?;
        debug!("recorded {} for {}", score, nickname);
        Ok(())
    }

    /// Submits a score in the background. Failures are logged and otherwise
    /// ignored so they never hold up a game.
    pub fn submit_score(&self, nickname: String, score: i64) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.record_score(&nickname, score).await {
                error!("failed to record score for {}: {}", nickname, e);
            }
        })
    }

    /// Every nickname with its best score, unsorted.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if the server can't be reached.
    pub async fn scores(&self) -> Result<HashMap<String, i64>> {
        let response = self
            .http
            .get(self.endpoint("api/record-score")?)
            .send()
            .await?;

        Ok(response.error_for_status()?.json().await?)
    }

    /// The top `limit` scores, best first.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if the server can't be reached.
    pub async fn leaderboard(
        &self,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>> {
        Ok(rank(self.scores().await?, limit))
    }
}

async fn expect_success(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let message = response
        .json::<Message>()
        .await
        .map_or_else(|_| status.to_string(), |body| body.message);

    if status == StatusCode::BAD_REQUEST {
        Err(Error::Validation(message))
    } else {
        Err(Error::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base: &str) -> String {
        ScoreClient::new(Url::parse(base).unwrap())
            .endpoint("api/record-score")
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_endpoints_keep_path_prefix() {
        assert_eq!(
            endpoint("http://localhost:6502"),
            "http://localhost:6502/api/record-score"
        );
        assert_eq!(
            endpoint("http://snake.example/games/snake"),
            "http://snake.example/games/snake/api/record-score"
        );
        assert_eq!(
            endpoint("http://snake.example/games/snake/"),
            "http://snake.example/games/snake/api/record-score"
        );
    }
}
