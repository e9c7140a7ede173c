use anyhow::Context;

use balcao_client::{ClientConfig, OrderApiClient, OrderDetailsResource, Session};
use balcao_core::OrderId;

mod render;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let order_id: OrderId = std::env::args()
        .nth(1)
        .context("usage: balcao-dashboard <order-id>")?
        .parse()
        .context("order id must not be blank")?;

    let base_url = std::env::var("BALCAO_API_URL").unwrap_or_else(|_| {
        tracing::warn!("BALCAO_API_URL not set; using the public backend");
        "https://balcao-api.onrender.com".to_string()
    });
    let token = std::env::var("BALCAO_TOKEN").context("BALCAO_TOKEN not set")?;
    let simulate_delay = std::env::var("BALCAO_SIMULATE_DELAY")
        .map(|value| value == "1" || value == "true")
        .unwrap_or(false);

    let session = Session::new(token)?;
    let config = ClientConfig::new(base_url).with_simulated_delay(simulate_delay);
    let resource = OrderDetailsResource::new(OrderApiClient::new(config, session));

    let order = resource
        .activate(&order_id)
        .await
        .with_context(|| format!("failed to load order {order_id}"))?;

    if order.items_subtotal() != order.total {
        tracing::warn!(
            %order_id,
            total_cents = order.total.cents(),
            items_subtotal_cents = order.items_subtotal().cents(),
            "payload total disagrees with the computed items subtotal"
        );
    }

    print!("{}", render::detail_view(&order));
    resource.deactivate(&order_id).await;

    Ok(())
}
