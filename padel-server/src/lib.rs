use std::sync::Arc;

use sea_orm::DatabaseConnection;
use warp::Filter;

use crate::auth::PasswordHasher;
use crate::config::Config;
use crate::group_directory::GroupDirectory;
use crate::handlers::{GroupName, ListMatchesQuery, PasswordQuery};
use crate::match_manager::{MatchManager, MatchSettings};
use crate::player_directory::PlayerDirectory;
use crate::statistics::StatisticsService;
use padel_core::ScoreRange;
use padel_persistence::repositories::{GroupRepository, MatchRepository, PlayerRepository};

pub mod auth;
pub mod config;
pub mod group_directory;
pub mod handlers;
pub mod match_manager;
pub mod player_directory;
pub mod statistics;
mod store;

/// Everything a request handler can reach, shared across connections
#[derive(Clone)]
pub struct PadelServices {
    pub groups: Arc<GroupDirectory>,
    pub players: Arc<PlayerDirectory>,
    pub matches: Arc<MatchManager>,
    pub stats: Arc<StatisticsService>,
}

impl PadelServices {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        let store_timeout = config.store_timeout();
        let group_repository = GroupRepository::new(db.clone());
        let player_repository = PlayerRepository::new(db.clone());
        let match_repository = MatchRepository::new(db);

        let settings = MatchSettings {
            score_range: ScoreRange::new(config.max_score),
            store_timeout,
            recent_limit: config.recent_matches_limit,
            default_page_size: config.default_page_size,
        };

        Self {
            groups: Arc::new(GroupDirectory::new(
                group_repository.clone(),
                PasswordHasher::new(config.bcrypt_cost),
                store_timeout,
            )),
            players: Arc::new(PlayerDirectory::new(
                player_repository.clone(),
                group_repository,
                store_timeout,
            )),
            matches: Arc::new(MatchManager::new(
                match_repository.clone(),
                player_repository.clone(),
                settings,
            )),
            stats: Arc::new(StatisticsService::new(
                match_repository,
                player_repository,
                store_timeout,
            )),
        }
    }
}

pub fn create_routes(
    services: PadelServices,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let services_filter = warp::any().map(move || services.clone());

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    let list_groups = warp::path!("api" / "groups")
        .and(warp::get())
        .and(services_filter.clone())
        .and_then(handlers::list_groups);

    let create_group = warp::path!("api" / "group")
        .and(warp::post())
        .and(warp::body::json())
        .and(services_filter.clone())
        .and_then(handlers::create_group);

    let get_group = warp::path!("api" / "group" / GroupName)
        .and(warp::get())
        .and(warp::query::<PasswordQuery>())
        .and(services_filter.clone())
        .and_then(handlers::get_group);

    let authenticate = warp::path!("api" / "group" / GroupName / "authenticate")
        .and(warp::post())
        .and(warp::body::json())
        .and(services_filter.clone())
        .and_then(handlers::authenticate);

    let list_players = warp::path!("api" / "group" / GroupName / "players")
        .and(warp::get())
        .and(services_filter.clone())
        .and_then(handlers::list_players);

    let add_player = warp::path!("api" / "group" / GroupName / "players")
        .and(warp::post())
        .and(warp::query::<PasswordQuery>())
        .and(warp::body::json())
        .and(services_filter.clone())
        .and_then(handlers::add_player);

    let list_matches = warp::path!("api" / "group" / GroupName / "matches")
        .and(warp::get())
        .and(warp::query::<ListMatchesQuery>())
        .and(services_filter.clone())
        .and_then(handlers::list_matches);

    let create_match = warp::path!("api" / "group" / GroupName / "matches")
        .and(warp::post())
        .and(warp::query::<PasswordQuery>())
        .and(warp::body::json())
        .and(services_filter.clone())
        .and_then(handlers::create_match);

    let create_matches = warp::path!("api" / "group" / GroupName / "matches" / "batch")
        .and(warp::post())
        .and(warp::query::<PasswordQuery>())
        .and(warp::body::json())
        .and(services_filter.clone())
        .and_then(handlers::create_matches);

    let cancel_match = warp::path!("api" / "group" / GroupName / "matches" / String / "cancel")
        .and(warp::post())
        .and(warp::query::<PasswordQuery>())
        .and(services_filter.clone())
        .and_then(handlers::cancel_match);

    let submit_results = warp::path!("api" / "group" / GroupName / "matches" / String / "results")
        .and(warp::post())
        .and(warp::query::<PasswordQuery>())
        .and(warp::body::json())
        .and(services_filter.clone())
        .and_then(handlers::submit_results);

    let statistics = warp::path!("api" / "group" / GroupName / "statistics")
        .and(warp::get())
        .and(services_filter.clone())
        .and_then(handlers::statistics);

    let export_csv = warp::path!("api" / "group" / GroupName / "export" / "csv")
        .and(warp::get())
        .and(services_filter)
        .and_then(handlers::export_csv);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(list_groups)
        .or(create_group)
        .or(get_group)
        .or(authenticate)
        .or(list_players)
        .or(add_player)
        .or(list_matches)
        .or(create_match)
        .or(create_matches)
        .or(cancel_match)
        .or(submit_results)
        .or(statistics)
        .or(export_csv)
        .with(cors)
        .with(warp::log("padel_friends"))
}
