// API Integration Tests
//
// Purpose: Exercise every endpoint against the builtin size table
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use stocking_sizer::{create_router, AppState};
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app with the builtin catalog
    fn create_test_app() -> axum::Router {
        let state = AppState::load(None).expect("builtin table loads");
        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_create_sku() {
        let request = post_json(
            "/api/sku",
            serde_json::json!({
                "category": "thigh", "color": "bronze", "toe": "open", "compression_class": 1,
                "ankle": 21, "calf": 36, "thigh": 51, "leg_length": 80
            }),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["sku"], "XA69603");
        assert_eq!(body["size"], 3);
        assert_eq!(body["sub_length_class"], "normal");
        assert_eq!(body["confidence_score"], 100);
        assert_eq!(body["reliability"], "very_reliable");
        assert_eq!(body["candidates"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_out_of_range_is_unprocessable() {
        let request = post_json(
            "/api/sku",
            serde_json::json!({
                "category": "knee", "color": "black", "toe": "closed", "compression_class": "Class 2",
                "ankle": 20.5, "calf": 32, "leg_length": 55
            }),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_response(response).await;
        assert_eq!(body["error"], "Leg length out of range.");
        assert_eq!(body["kind"], "out_of_range");
    }

    #[tokio::test]
    async fn test_invalid_option_is_unprocessable() {
        let request = post_json(
            "/api/sku",
            serde_json::json!({
                "category": "thigh", "color": "bronze", "toe": "peep", "compression_class": 1,
                "ankle": 21, "calf": 36, "thigh": 51, "leg_length": 80
            }),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_response(response).await;
        assert_eq!(body["kind"], "validation");
    }

    #[tokio::test]
    async fn test_malformed_measurement_is_validation_error() {
        let request = post_json(
            "/api/sku",
            serde_json::json!({
                "category": "thigh", "color": "bronze", "toe": "open", "compression_class": 1,
                "ankle": "abc", "calf": 36, "thigh": 51, "leg_length": 80
            }),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_response(response).await;
        assert_eq!(body["kind"], "validation");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_sku_exposes_display_percent() {
        let request = post_json(
            "/api/sku",
            serde_json::json!({
                "category": "thigh", "color": "bronze", "toe": "open", "compression_class": 1,
                "ankle": 20.5, "calf": 32, "thigh": 55, "leg_length": 80
            }),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let thigh = &body["deviations"][0];
        assert_eq!(thigh["dimension"], "thigh");
        assert_eq!(thigh["display_percent"], 57);
    }

    #[tokio::test]
    async fn test_batch() {
        let request = post_json(
            "/api/sku/batch",
            serde_json::json!({ "requests": [
                { "category": "knee", "color": "bronze", "toe": "open", "compression_class": 1,
                  "ankle": 18.5, "calf": 30, "leg_length": 30 },
                { "category": "knee", "color": "bronze", "toe": "open", "compression_class": 1,
                  "ankle": 16.9, "calf": 30, "leg_length": 30 }
            ]}),
        );

        let response = create_test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["ok"]["sku"], "XA47601");
        assert_eq!(results[1]["kind"], "out_of_range");
    }

    #[tokio::test]
    async fn test_table_and_guide() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/table").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["thigh_length"]["Normal"].as_array().unwrap().len(), 8);
        assert_eq!(body["knee_length"]["Petite"][0]["D_max"], 38.0);

        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/guide").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_response(response).await;
        assert_eq!(body["ankle"], "Measure around the narrowest part of your ankle");
    }
}
