use std::{convert::Infallible, sync::Arc};

use log::{error, info};
use warp::{
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{MethodNotAllowed, UnsupportedMediaType},
    Filter,
    Rejection,
    Reply,
};

use super::models::{Message, RecordScore, RegisterNickname, Status};
use crate::{
    store::{NicknameRegistry, ScoreStore},
    Error,
};

/// The stores behind the endpoints, shared by every request.
pub struct Services {
    pub nicknames: NicknameRegistry,
    pub scores:    ScoreStore,
}

impl Services {
    #[must_use]
    pub const fn new(nicknames: NicknameRegistry, scores: ScoreStore) -> Self {
        Self { nicknames, scores }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(NicknameRegistry::in_memory(), ScoreStore::in_memory())
    }
}

fn with_services(
    services: Arc<Services>,
) -> impl Filter<Extract = (Arc<Services>,), Error = Infallible> + Clone {
    warp::any().map(move || services.clone())
}

/// Every endpoint, with rejections already turned into JSON responses.
pub fn api(
    services: Arc<Services>,
    status: Status,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let healthz = warp::path!("healthz")
        .and(warp::get())
        .map(move || warp::reply::json(&status));

    let register = warp::path!("api" / "register-nickname")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_services(services.clone()))
        .and_then(register_nickname);

    let record = warp::path!("api" / "record-score")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_services(services.clone()))
        .and_then(record_score);

    let scores = warp::path!("api" / "record-score")
        .and(warp::get())
        .and(with_services(services))
        .map(|services: Arc<Services>| {
            warp::reply::json(&services.scores.all())
        });

    healthz
        .or(register)
        .or(record)
        .or(scores)
        .recover(handle_rejection)
}

async fn register_nickname(
    body: RegisterNickname,
    services: Arc<Services>,
) -> Result<impl Reply, Rejection> {
    let nickname = body.nickname.unwrap_or_default();
    services
        .nicknames
        .register(&nickname)
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&Message::new(
        "Nickname registered successfully",
    )))
}

async fn record_score(
    body: RecordScore,
    services: Arc<Services>,
) -> Result<impl Reply, Rejection> {
    let (Some(nickname), Some(score)) = (body.nickname, body.score) else {
        return Err(warp::reject::custom(Error::Validation(
            "Nickname and score are required".to_owned(),
        )));
    };

    let best = services
        .scores
        .record(&nickname, score)
        .map_err(warp::reject::custom)?;
    info!("{} submitted {} (best {})", nickname, score, best);

    Ok(warp::reply::json(&Message::new("Score recorded successfully")))
}

async fn handle_rejection(
    rejection: Rejection,
) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(error) = rejection.find::<Error>() {
        match error {
            Error::Validation(message) => {
                (StatusCode::BAD_REQUEST, Message::new(message.clone()))
            }
            Error::Conflict { suggestion, .. } => (
                StatusCode::CONFLICT,
                Message::with_suggestion(
                    "Nickname already taken",
                    suggestion.clone(),
                ),
            ),
            other => {
                error!("request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Message::new("Internal server error"),
                )
            }
        }
    } else if let Some(e) = rejection.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, Message::new(format!("Invalid body: {e}")))
    } else if rejection.find::<UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Message::new("Expected a JSON body"),
        )
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            Message::new("Method not allowed"),
        )
    } else if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, Message::new("Not found"))
    } else {
        error!("unhandled rejection: {:?}", rejection);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Message::new("Internal server error"),
        )
    };

    Ok(warp::reply::with_status(warp::reply::json(&message), status))
}
