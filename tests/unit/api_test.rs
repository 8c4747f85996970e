//! Tests for the API module
//!
//! Tests error types and the `EditorApi` handlers directly.

use std::sync::Arc;

use crate::common::fixtures::{api_with, handle, map, theme_config};
use crate::common::mocks::{MockProjects, MockSettings, ProjectCall};

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use flow_editor_api::api::{ApiError, ErrorCode};
    use flow_editor_api::core::ports::RuntimeError;

    #[test]
    fn test_error_code_statuses() {
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::method_not_allowed("x").status_code(), 405);
        assert_eq!(ApiError::payload_too_large("x").status_code(), 413);
        assert_eq!(ApiError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::not_found("Resource missing");
        let display = format!("{err}");
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("Resource missing"));
    }

    #[test]
    fn test_runtime_rejections_map_to_codes() {
        let cases = [
            (RuntimeError::not_found("gone"), ErrorCode::NotFound),
            (RuntimeError::invalid("Unknown key"), ErrorCode::BadRequest),
            (RuntimeError::unauthorized("Unknown user"), ErrorCode::Unauthorized),
            (RuntimeError::failed("disk on fire"), ErrorCode::Internal),
        ];
        for (rejection, code) in cases {
            let message = rejection.to_string();
            let err = ApiError::from(rejection);
            assert_eq!(err.code, code);
            assert_eq!(err.message, message);
        }
    }

    #[test]
    fn test_anyhow_failure_becomes_failed() {
        let err = RuntimeError::from(anyhow::anyhow!("boom"));
        assert_eq!(err, RuntimeError::Failed("boom".to_string()));
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

mod handler_tests {
    use super::*;
    use flow_editor_api::api::{ErrorCode, RequestContext};
    use flow_editor_api::config::EditorConfig;
    use flow_editor_api::core::models::Project;
    use flow_editor_api::core::ports::RuntimeError;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_list_projects_reads_through_every_time() {
        let projects = Arc::new(MockProjects::new().returning_list(vec![Project::new("p1")]));
        let settings = Arc::new(MockSettings::for_user("fred"));
        let api = api_with(&EditorConfig::default(), &projects, &settings);

        api.list_projects().await.unwrap();
        api.list_projects().await.unwrap();

        assert_eq!(projects.calls(), vec![ProjectCall::Get, ProjectCall::Get]);
    }

    #[tokio::test]
    async fn test_delete_resolving_false_is_not_found() {
        let projects = Arc::new(MockProjects::new().returning_deleted(Ok(false)));
        let settings = Arc::new(MockSettings::for_user("fred"));
        let api = api_with(&EditorConfig::default(), &projects, &settings);

        let err = api.delete_project("ghost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("ghost"));
    }

    #[tokio::test]
    async fn test_user_settings_forward_identity() {
        let projects = Arc::new(MockProjects::new());
        let settings =
            Arc::new(MockSettings::for_user("fred").with_user_settings(map(json!({ "c": 3 }))));
        let api = api_with(&EditorConfig::default(), &projects, &settings);

        let fred = api.user_settings(&RequestContext::for_user("fred")).await.unwrap();
        assert_eq!(Value::Object(fred), json!({ "c": 3 }));

        let err = api.user_settings(&RequestContext::for_user("barney")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = api.user_settings(&RequestContext::anonymous()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_settings_merge_theme_defaults() {
        let projects = Arc::new(MockProjects::new());
        let settings = Arc::new(MockSettings::for_user("fred").with_theme(json!({ "test": 0 })));
        let api = api_with(&theme_config(), &projects, &settings);

        let merged = api.settings().await.unwrap();
        assert_eq!(Value::Object(merged), json!({ "existing": 123, "test": 0 }));
    }

    #[tokio::test]
    async fn test_reinit_swaps_runtime() {
        let first = Arc::new(MockProjects::new().returning_list(vec![Project::new("old")]));
        let second = Arc::new(MockProjects::new().returning_list(vec![Project::new("new")]));
        let settings = Arc::new(MockSettings::for_user("fred"));
        let api = api_with(&EditorConfig::default(), &first, &settings);

        assert_eq!(api.list_projects().await.unwrap().projects, vec![Project::new("old")]);

        api.reinit(&theme_config(), handle(&second, &settings));

        assert_eq!(api.list_projects().await.unwrap().projects, vec![Project::new("new")]);
        assert_eq!(first.calls().len(), 1);
        assert_eq!(second.calls().len(), 1);
        assert!(api.settings().await.unwrap().contains_key("existing"));
    }

    #[tokio::test]
    async fn test_rejection_is_surfaced_unchanged() {
        let projects = Arc::new(
            MockProjects::new().returning_updated(Err(RuntimeError::not_found("no such project"))),
        );
        let settings = Arc::new(MockSettings::for_user("fred"));
        let api = api_with(&EditorConfig::default(), &projects, &settings);

        let err = api.update_project("x", Project::new("x")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "no such project");
    }
}
