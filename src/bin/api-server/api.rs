use std::{sync::Arc, time::Duration};

use actix_web::{web, HttpResponse};
use menu_board::{
    fetch::{fetch_status, DishSource, MenuState},
    present::MenuPage,
    view::FetchStatus,
};
use tokio::sync::RwLock;

pub(super) struct ApiState {
    menu: RwLock<MenuState>,
    source: Arc<dyn DishSource>,
    fetch_timeout: Duration,
}

impl ApiState {
    pub(super) fn new(source: Arc<dyn DishSource>, fetch_timeout: Duration) -> Self {
        Self {
            menu: RwLock::new(MenuState::new()),
            source,
            fetch_timeout,
        }
    }
}

/// Runs one fetch against the source and records its outcome.
pub(super) async fn refresh_menu(state: web::Data<ApiState>) {
    state.menu.write().await.begin_fetch();
    let status = fetch_status(state.source.as_ref(), state.fetch_timeout).await;
    state.menu.write().await.complete(status);
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    message: String,
}

#[actix_web::get("/api/plats")]
pub(super) async fn dishes(data: web::Data<ApiState>) -> HttpResponse {
    let state = data.menu.read().await;
    match state.status() {
        FetchStatus::Success(plats) => HttpResponse::Ok().json(plats),
        FetchStatus::Loading => HttpResponse::ServiceUnavailable().json(ErrJsonResp {
            message: "menu is still loading".to_string(),
        }),
        FetchStatus::Error(message) => HttpResponse::BadGateway().json(ErrJsonResp {
            message: message.clone(),
        }),
    }
}

#[actix_web::get("/api/menu")]
pub(super) async fn menu(data: web::Data<ApiState>) -> HttpResponse {
    let state = data.menu.read().await;
    HttpResponse::Ok().json(MenuPage::from_plan(&state.plan()))
}

#[actix_web::post("/api/menu/refresh")]
pub(super) async fn refresh(data: web::Data<ApiState>) -> HttpResponse {
    tracing::info!("menu refresh requested");
    actix_web::rt::spawn(refresh_menu(data));
    HttpResponse::Accepted().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{http::StatusCode, test, App};
    use menu_board::fetch::{sample_dishes, FetchError, MockDishSource};

    struct Failing;

    #[async_trait::async_trait]
    impl DishSource for Failing {
        async fn fetch_dishes(&self) -> Result<Vec<menu_board::data::Dish>, FetchError> {
            Err(FetchError::Source("cuisine fermée".to_string()))
        }
    }

    fn state(source: Arc<dyn DishSource>) -> web::Data<ApiState> {
        web::Data::new(ApiState::new(source, Duration::from_secs(1)))
    }

    #[actix_web::test]
    async fn loading_menu() {
        let data = state(Arc::new(MockDishSource::new(Duration::ZERO)));
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(dishes)
                .service(menu),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/plats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::get().uri("/api/menu").to_request();
        let page: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["body"]["kind"], "sections");
        assert_eq!(page["body"]["sections"].as_array().map(Vec::len), Some(4));
        assert_eq!(page["body"]["sections"][0]["kind"], "skeleton");
    }

    #[actix_web::test]
    async fn loaded_menu() {
        let data = state(Arc::new(MockDishSource::new(Duration::ZERO)));
        refresh_menu(data.clone()).await;
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(dishes)
                .service(menu),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/plats").to_request();
        let plats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plats.as_array().map(Vec::len), Some(4));

        let req = test::TestRequest::get().uri("/api/menu").to_request();
        let page: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let sections = page["body"]["sections"].as_array().cloned().unwrap_or_default();
        let titles: Vec<&str> = sections
            .iter()
            .filter_map(|section| section["title"].as_str())
            .collect();
        // the only dessert is unavailable
        assert_eq!(titles, ["Entrées", "Plats Principaux", "Boissons"]);
        assert_eq!(sections[0]["dishes"][0]["price"], "8.50€");
    }

    #[actix_web::test]
    async fn failed_fetch() {
        let data = state(Arc::new(Failing));
        refresh_menu(data.clone()).await;
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(dishes)
                .service(menu),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/plats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let req = test::TestRequest::get().uri("/api/menu").to_request();
        let page: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["body"]["kind"], "error");
        assert_eq!(page["body"]["heading"], "Erreur");
        assert_eq!(page["body"]["message"], "cuisine fermée");
    }

    /// Fails the first fetch, serves the sample menu afterwards.
    struct FailsOnce {
        calls: AtomicUsize,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl DishSource for FailsOnce {
        async fn fetch_dishes(&self) -> Result<Vec<menu_board::data::Dish>, FetchError> {
            tokio::time::sleep(self.delay).await;
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(FetchError::Source("cuisine fermée".to_string()))
            } else {
                Ok(sample_dishes())
            }
        }
    }

    async fn wait_for(data: &web::Data<ApiState>, done: impl Fn(&FetchStatus) -> bool) {
        for _ in 0..200 {
            if done(data.menu.read().await.status()) {
                return;
            }
            actix_web::rt::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("menu never reached the expected status");
    }

    #[actix_web::test]
    async fn refresh_loads_the_menu() {
        let data = state(Arc::new(MockDishSource::new(Duration::from_millis(50))));
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(menu)
                .service(refresh),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/menu/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        wait_for(&data, |status| matches!(status, FetchStatus::Success(_))).await;

        let req = test::TestRequest::get().uri("/api/menu").to_request();
        let page: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["body"]["kind"], "sections");
        assert_eq!(page["body"]["sections"][0]["kind"], "dishes");
        assert_eq!(page["body"]["sections"].as_array().map(Vec::len), Some(3));
    }

    #[actix_web::test]
    async fn refresh_after_error_goes_through_loading() {
        let source = FailsOnce {
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(100),
        };
        let data = state(Arc::new(source));
        refresh_menu(data.clone()).await;
        assert!(matches!(data.menu.read().await.status(), FetchStatus::Error(_)));

        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(dishes)
                .service(menu)
                .service(refresh),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/menu/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        wait_for(&data, FetchStatus::is_loading).await;
        let req = test::TestRequest::get().uri("/api/menu").to_request();
        let page: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["body"]["sections"][0]["kind"], "skeleton");

        wait_for(&data, |status| matches!(status, FetchStatus::Success(_))).await;
        let req = test::TestRequest::get().uri("/api/plats").to_request();
        let plats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plats.as_array().map(Vec::len), Some(4));
    }
}
