use std::sync::Arc;

use anyhow::Context;

use safequote_app::{AppConfig, FromEnv, QuoteController};
use safequote_catalog::CategoryFilter;
use safequote_events::{InMemoryEventBus, QuoteEvent};
use safequote_infra::MockCatalogSource;
use safequote_validation::{QuoteForm, format_phone};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    safequote_observability::init_with_filter(&config.log_filter);

    let source = MockCatalogSource::new().with_latency(config.latency);
    let bus = Arc::new(InMemoryEventBus::<QuoteEvent>::new());
    let controller = QuoteController::new(source, Arc::clone(&bus))
        .with_default_filter(CategoryFilter::parse(&config.default_category));
    let events = controller.subscribe();

    controller.initialize().await.context("loading the catalog")?;
    for product in controller.listing() {
        tracing::info!(
            id = %product.id_typed(),
            kind = product.kind_name(),
            price = %product.format_price(),
            available = product.is_available(),
            "{}",
            product.name()
        );
    }

    controller.filter_by_category("mãos").await?;
    if let Some(first) = controller.listing().iter().find(|p| p.is_available()) {
        controller.add_to_quote(first.id_typed())?;
    }
    tracing::info!(total = %controller.basket_total(), "basket ready");

    let form = QuoteForm::new(
        "Maria Souza",
        "maria@empresa.com.br",
        format_phone("11987654321"),
        "Proteção para mãos",
    );
    let receipt = controller.submit(&form).await.context("submitting the quote")?;
    tracing::info!(
        reference_code = %receipt.reference_code,
        eta = %receipt.eta,
        "{}",
        receipt.message
    );

    for event in events.drain() {
        tracing::debug!(?event, "session event");
    }

    Ok(())
}
