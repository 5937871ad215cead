//! Request metrics behind the `metrics` feature.
//!
//! Histograms are labelled with the record backend in use so demo and hosted
//! deployments never share a series. Probe traffic is not counted.

use std::collections::HashMap;
use std::sync::Arc;

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;

const NAMESPACE: &str = "gensys_console";
const ENDPOINT: &str = "/metrics";
const UNCOUNTED: [&str; 2] = ["/health/ready", "/health/live"];

/// Register the request histograms for `backend` (`supabase` or `demo`).
///
/// # Errors
///
/// Fails when the Prometheus registry rejects the collectors.
pub(crate) fn prometheus_metrics(backend: &str) -> std::io::Result<PrometheusMetrics> {
    let labels = HashMap::from([("backend".to_owned(), backend.to_owned())]);
    UNCOUNTED
        .into_iter()
        .fold(
            PrometheusMetricsBuilder::new(NAMESPACE)
                .endpoint(ENDPOINT)
                .const_labels(labels),
            |builder, path| builder.exclude(path),
        )
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

/// Prometheus when configured, a pass-through otherwise. Both arms box the
/// service so the app type does not depend on the feature being switched on
/// at runtime.
#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl From<Option<PrometheusMetrics>> for MetricsLayer {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Disabled, |m| Self::Enabled(Arc::new(m)))
    }
}

type BoxedApp = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedApp;
    type Future = LocalBoxFuture<'static, Result<BoxedApp, ()>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Self::Enabled(metrics) = self else {
            let passthrough = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };
        let wrapped = Compat::new(PrometheusMetrics::clone(metrics)).new_transform(service);
        Box::pin(async move { Ok(boxed::service(wrapped.await?)) })
    }
}
