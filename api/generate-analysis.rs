use data_research_api::{
    clients::openai::OpenAiClient, config::AppConfig, handler::handle, telemetry,
};
use vercel_runtime::{run, Body, Error, Request, Response};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    telemetry::init();
    run(handler).await
}

pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    // Read per invocation so a rotated key takes effect without a redeploy.
    let config = AppConfig::from_env();
    let client = OpenAiClient::new(&config.openai);
    Ok(handle(&req, &config, &client).await?)
}
