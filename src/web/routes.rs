use std::sync::Arc;
use warp::{filters::BoxedFilter, Filter, Reply};

use super::handlers;
use super::State;

pub fn router(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    // 프론트엔드가 다른 오리진에서 호출하므로 전 라우트에 CORS 적용
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"]);

    calculate()
        .or(search(Arc::clone(&state)))
        .with(cors)
        .boxed()
}

fn calculate() -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("calculate")
        .and(warp::path::end())
        .and(warp::body::json())
        .and_then(handlers::calculate_handler);
    warp::post().and(route).boxed()
}

fn search(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("search")
        .and(warp::path::end())
        .and(warp::body::json())
        .and_then(move |body: handlers::SearchRequest| {
            handlers::search_handler(Arc::clone(&state), body)
        });
    warp::post().and(route).boxed()
}
