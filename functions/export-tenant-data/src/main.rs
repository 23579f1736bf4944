use std::sync::Arc;

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{service_fn, LambdaEvent};
use tracing::{error, info};

use export_tenant_data::{build_dispatcher, from_proxy_request, into_proxy_response};
use tenant_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize telemetry
    tenant_shared::telemetry::init_telemetry();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let dispatcher = Arc::new(build_dispatcher(&config).await?);
    info!("Tenant data function starting...");

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<ApiGatewayProxyRequest>| {
            let dispatcher = dispatcher.clone();
            async move {
                let request = from_proxy_request(event.payload, &event.context.request_id);
                let response = dispatcher.handle(request).await;
                Ok::<ApiGatewayProxyResponse, lambda_runtime::Error>(into_proxy_response(response))
            }
        },
    ))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}
