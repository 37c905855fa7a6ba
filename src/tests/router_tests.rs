#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt; // for .collect()
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::routes;
    use crate::tests::support::test_state;

    #[test]
    fn test_module_declaration_order() {
        let modules = routes::modules();
        let names: Vec<&str> = modules.iter().map(|m| m.name()).collect();
        let mounts: Vec<&str> = modules.iter().map(|m| m.mount_path()).collect();

        assert_eq!(names, vec!["analysis", "audio", "site"]);
        assert_eq!(mounts, vec!["/analysis", "/audio", "/site"]);
    }

    #[test]
    fn test_active_modules_filtering_preserves_order() {
        let disabled = vec!["audio".to_string()];
        let active = routes::active_modules(&disabled);
        let names: Vec<&str> = active.iter().map(|m| m.name()).collect();

        assert_eq!(names, vec!["analysis", "site"]);
    }

    #[test]
    fn test_active_modules_filtering_is_case_insensitive() {
        let disabled = vec!["AUDIO".to_string(), "Site".to_string()];
        let active = routes::active_modules(&disabled);
        let names: Vec<&str> = active.iter().map(|m| m.name()).collect();

        assert_eq!(names, vec!["analysis"]);
    }

    #[test]
    fn test_empty_disabled_set_keeps_every_module() {
        let active = routes::active_modules(&[]);
        assert_eq!(active.len(), routes::modules().len());
    }

    #[tokio::test]
    async fn test_all_mount_paths_reachable_when_nothing_disabled() {
        let app = routes::compose(test_state(AppConfig::default()));

        for uri in [
            "/api/analysis/search?query=never",
            "/api/audio/jukebox/track-1",
            "/api/site/healthz",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "expected 200 for {}", uri);
        }
    }

    #[tokio::test]
    async fn test_disabled_module_subtree_is_unmounted() {
        let mut config = AppConfig::default();
        config.api.disabled = vec!["site".to_string()];
        let app = routes::compose(test_state(config));

        // The disabled subtree answers exactly like any other unmatched path
        let disabled = app
            .clone()
            .oneshot(Request::builder().uri("/api/site/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let unmatched = app
            .clone()
            .oneshot(Request::builder().uri("/definitely/not/mounted").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(disabled.status(), unmatched.status());
        let disabled_body = disabled.into_body().collect().await.unwrap().to_bytes();
        let unmatched_body = unmatched.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(disabled_body, unmatched_body);

        // The other modules stay mounted
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/analysis/search?query=never").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_enabled_module_differs_from_fallback() {
        let app = routes::compose(test_state(AppConfig::default()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/site/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_static_fallback_serves_non_api_requests() {
        let app = routes::compose(test_state(AppConfig::default()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"<!DOCTYPE html>"));
    }
}
