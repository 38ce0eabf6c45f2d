use std::sync::Arc;

use log::info;
use warp::{http::Method, Filter, Rejection, Reply};

use crate::{
    fightsnake::{
        models::{GameState, Movement, Notification, Status},
        types::{APIVersion, Head, Tail},
    },
    strategies::Strategy,
};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

#[must_use]
pub fn status() -> Status {
    Status {
        apiversion: APIVersion::One,
        author:     AUTHOR.to_owned(),
        color:      "#C0C0C0".to_owned(),
        head:       Head::Rudolph,
        tail:       Tail::Coffee,
        version:    VERSION.to_owned(),
    }
}

/// The full battlesnake API: `GET /`, and `POST` to `/start`, `/move` and
/// `/end`.
pub fn routes<S>(
    strategy: Arc<S>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    S: Strategy + Send + Sync + 'static,
{
    let cors = warp::cors()
        .allow_method(Method::GET)
        .allow_method(Method::POST)
        .allow_header("content-type")
        .allow_any_origin();

    let logging = warp::log(NAME);

    // match paths before methods so unknown paths are a 404 rather than 405.
    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::json(&status()));

    let start = warp::path("start")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .map(|note: Notification| {
            info!("game {} starting", note.game.id);
            "ok"
        });

    let strategy = warp::any().map(move || Arc::clone(&strategy));

    let do_move = warp::path("move")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(strategy)
        .map(|state: GameState, strategy: Arc<S>| {
            warp::reply::json(&Movement {
                movement: strategy.get_movement(&state),
                shout:    None,
            })
        });

    let end = warp::path("end")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .map(|note: Notification| {
            info!("game {} ended after {} turns", note.game.id, note.turn);
            "ok"
        });

    index
        .or(start)
        .or(do_move)
        .or(end)
        .with(cors)
        .with(logging)
}
