use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;
use warp::Reply;
use warp::http::StatusCode;
use warp::reply::Response;

use crate::PadelServices;
use padel_types::{MatchId, PadelError, PlayerId};

/// Group name taken from a URL path segment, percent-decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName(String);

impl FromStr for GroupName {
    type Err = std::str::Utf8Error;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        let decoded = percent_decode_str(segment).decode_utf8()?;
        Ok(GroupName(decoded.into_owned()))
    }
}

impl Deref for GroupName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attachment name safe for a header value; anything outside [A-Za-z0-9_-] becomes '_'
pub fn export_filename(group_name: &str) -> String {
    let stem: String = group_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}-matches.csv", stem)
}

#[derive(Debug, Deserialize)]
pub struct PasswordQuery {
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListMatchesQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub recent: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub player_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchesRequest {
    pub matches: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResultsRequest {
    pub score_team1: i32,
    pub score_team2: i32,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: String,
}

pub fn status_for(err: &PadelError) -> StatusCode {
    match err {
        PadelError::InvalidInput { .. } | PadelError::InvalidScore { .. } => {
            StatusCode::BAD_REQUEST
        }
        PadelError::InvalidPassword => StatusCode::UNAUTHORIZED,
        PadelError::GroupNotFound { .. } => StatusCode::NOT_FOUND,
        PadelError::DuplicateGroup { .. }
        | PadelError::DuplicatePlayer { .. }
        | PadelError::NotFoundOrAlreadyResolved { .. }
        | PadelError::AlreadyResolved { .. } => StatusCode::CONFLICT,
        PadelError::StoreUnavailable { .. } | PadelError::Timeout { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        PadelError::CorruptRecord { .. } | PadelError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn json_reply<T: Serialize>(status: StatusCode, body: &T) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

fn error_reply(err: &PadelError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    json_reply(
        status,
        &serde_json::json!({
            "error": err.to_string()
        }),
    )
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, PadelError>) -> Response {
    match result {
        Ok(body) => json_reply(status, &body),
        Err(err) => error_reply(&err),
    }
}

fn parse_id(raw: &str) -> Result<Uuid, PadelError> {
    Uuid::parse_str(raw).map_err(|_| PadelError::invalid_input(format!("invalid id: {}", raw)))
}

fn parse_ids(raw: &[String]) -> Result<Vec<PlayerId>, PadelError> {
    raw.iter().map(|id| parse_id(id)).collect()
}

pub async fn list_groups(services: PadelServices) -> Result<Response, warp::Rejection> {
    Ok(respond(StatusCode::OK, services.groups.list_groups().await))
}

pub async fn create_group(
    body: CreateGroupRequest,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = services
        .groups
        .create_group(&body.name, &body.password)
        .await
        .map(|group| padel_types::GroupDetails::from(&group));

    Ok(respond(StatusCode::CREATED, result))
}

pub async fn get_group(
    name: GroupName,
    query: PasswordQuery,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = services
        .groups
        .access(&name, query.password.as_deref())
        .await;

    Ok(respond(StatusCode::OK, result))
}

pub async fn authenticate(
    name: GroupName,
    body: AuthenticateRequest,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = services
        .groups
        .access(&name, Some(&body.password))
        .await
        .and_then(|access| {
            if access.is_authenticated {
                Ok(access)
            } else {
                Err(PadelError::InvalidPassword)
            }
        });

    Ok(respond(StatusCode::OK, result))
}

pub async fn list_players(
    name: GroupName,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    Ok(respond(
        StatusCode::OK,
        services.players.list_players(&name).await,
    ))
}

pub async fn add_player(
    name: GroupName,
    query: PasswordQuery,
    body: AddPlayerRequest,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = async {
        services
            .groups
            .authenticate(&name, query.password.as_deref())
            .await?;
        services.players.add_player(&name, &body.name).await
    }
    .await;

    Ok(respond(StatusCode::CREATED, result))
}

pub async fn list_matches(
    name: GroupName,
    query: ListMatchesQuery,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    if query.recent.unwrap_or(false) {
        return Ok(respond(
            StatusCode::OK,
            services.matches.get_recent_matches(&name, None).await,
        ));
    }

    let result = services
        .matches
        .list_matches(&name, query.page.unwrap_or(1), query.page_size.unwrap_or(0))
        .await;

    Ok(respond(StatusCode::OK, result))
}

pub async fn create_match(
    name: GroupName,
    query: PasswordQuery,
    body: CreateMatchRequest,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = async {
        services
            .groups
            .authenticate(&name, query.password.as_deref())
            .await?;
        let player_ids = parse_ids(&body.player_ids)?;
        services.matches.create_match(&name, &player_ids).await
    }
    .await;

    Ok(respond(StatusCode::CREATED, result))
}

pub async fn create_matches(
    name: GroupName,
    query: PasswordQuery,
    body: CreateMatchesRequest,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = async {
        services
            .groups
            .authenticate(&name, query.password.as_deref())
            .await?;
        let lineups = body
            .matches
            .iter()
            .map(|ids| parse_ids(ids))
            .collect::<Result<Vec<_>, _>>()?;
        services.matches.create_matches(&name, &lineups).await
    }
    .await;

    Ok(respond(StatusCode::CREATED, result))
}

pub async fn cancel_match(
    name: GroupName,
    match_id: String,
    query: PasswordQuery,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = async {
        services
            .groups
            .authenticate(&name, query.password.as_deref())
            .await?;
        let match_id: MatchId = parse_id(&match_id)?;
        services.matches.cancel_match(&name, match_id).await
    }
    .await
    .map(|status| StatusResponse {
        status: status.to_string(),
    });

    Ok(respond(StatusCode::OK, result))
}

pub async fn submit_results(
    name: GroupName,
    match_id: String,
    query: PasswordQuery,
    body: SubmitResultsRequest,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    let result = async {
        services
            .groups
            .authenticate(&name, query.password.as_deref())
            .await?;
        let match_id: MatchId = parse_id(&match_id)?;
        services
            .matches
            .submit_results(&name, match_id, body.score_team1, body.score_team2)
            .await
    }
    .await;

    Ok(respond(StatusCode::OK, result))
}

pub async fn statistics(
    name: GroupName,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    Ok(respond(
        StatusCode::OK,
        services.stats.compute_stats(&name).await,
    ))
}

pub async fn export_csv(
    name: GroupName,
    services: PadelServices,
) -> Result<Response, warp::Rejection> {
    match services.matches.export_matches_csv(&name).await {
        Ok(csv) => {
            let disposition = format!("attachment; filename=\"{}\"", export_filename(&name));
            let reply = warp::reply::with_header(csv, "Content-Type", "text/csv");
            Ok(warp::reply::with_header(reply, "Content-Disposition", disposition).into_response())
        }
        Err(err) => Ok(error_reply(&err)),
    }
}
