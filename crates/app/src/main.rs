use anyhow::Context;

use storefront_app::{Storefront, StorefrontConfig};
use storefront_catalog::FilterCriteria;

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env();
    storefront_observability::init(config.log_format);
    config.log_defaults();

    let storefront = Storefront::build(&config).context("failed to start storefront")?;

    let categories: Vec<String> = storefront
        .catalog
        .categories()
        .into_iter()
        .map(|c| c.name)
        .collect();
    tracing::info!(
        products = storefront.catalog.len(),
        ?categories,
        featured = storefront.catalog.featured(4).len(),
        in_view = storefront.catalog.query(&FilterCriteria::default()).len(),
        "catalog ready"
    );

    let session = storefront.open_session()?;
    let signed_in = storefront
        .sessions
        .with_session(session, |ctx| ctx.is_authenticated())?;
    tracing::info!(%session, signed_in, "storefront ready");

    storefront.close_session(session)?;
    Ok(())
}
