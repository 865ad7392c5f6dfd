use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod routes;
mod session;
use routes::Route;
use session::Session;

const THEME_BASE: Asset = asset!("/assets/theme-base.css");

/// Largest request body the server accepts. Exports post the whole filtered
/// case list back, so the default axum limit is too small for big datasets.
#[cfg(feature = "server")]
const DEFAULT_MAX_BODY: usize = 16 * 1024 * 1024;

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        let config = server::config::load_config();
        if config.features.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();
        tracing::info!(
            backend = server::backend::backend().mode(),
            base_url = %config.backend.base_url,
            "CaseDesk starting"
        );

        let mut router = dioxus::server::router(App).merge(server::health::health_router());

        if config.features.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let max_body: usize = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY);

        let router = router
            .layer(axum::extract::DefaultBodyLimit::max(max_body))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Fetch feature flags once and provide via context (defaults all-off on error)
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);

    let mut session = use_context_provider(Session::new);

    // localStorage only exists after hydration.
    use_effect(move || session.restore());

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_BASE }
        shared_ui::theme::ThemeSeed {}
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "auth-guard-loading",
                        p { "Loading..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
