use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;
use telequote::{
    config,
    models::{DestinationPrice, NewPlan, NewPriceTable, Pack},
    store::{RecordStore, SqliteStore},
};
use tracing::info;

/// Execute the seed command
///
/// Imports the FaleMais plans and the price tables for area codes 011, 016,
/// 017 and 018. Refuses to run against a database that already holds plans or
/// price tables unless `force` is set.
pub async fn execute(config_path: &Path, force: bool) -> Result<()> {
    println!("{}", "Seeding database...".yellow());

    let cfg = config::load_config(config_path)?;
    let store =
        SqliteStore::connect(&cfg.database.path, cfg.database.max_connections).await?;

    let (plans, prices) = seed(&store, force).await?;
    store.pool().close().await;

    println!("{}", "✓ Imported".green());
    println!("  {}: {}", "Plans".cyan(), plans);
    println!("  {}: {}", "Price tables".cyan(), prices);

    Ok(())
}

/// Insert the fixtures, returning how many plans and price tables were created
async fn seed(store: &dyn RecordStore, force: bool) -> Result<(usize, usize)> {
    if !force {
        let existing_plans = store.list_plans().await?.len();
        let existing_prices = store.list_prices().await?.len();
        if existing_plans > 0 || existing_prices > 0 {
            bail!(
                "Database already has {} plan(s) and {} price table(s); use --force to seed anyway",
                existing_plans,
                existing_prices
            );
        }
    }

    let plans = standard_plans();
    let prices = standard_prices();
    let counts = (plans.len(), prices.len());

    for plan in plans {
        let created = store.create_plan(plan).await?;
        info!(id = %created.id, name = %created.name, "Seeded plan");
    }
    for price in prices {
        let created = store.create_price(price).await?;
        info!(id = %created.id, origin = %created.origin, "Seeded price table");
    }

    Ok(counts)
}

fn standard_plans() -> Vec<NewPlan> {
    [30, 60, 120]
        .into_iter()
        .map(|minutes| NewPlan {
            name: format!("FaleMais {}", minutes),
            pack: Pack {
                minutes,
                extra: 10,
                cost: minutes,
            },
        })
        .collect()
}

fn standard_prices() -> Vec<NewPriceTable> {
    fn table(origin: &str, destinations: &[(&str, f64)]) -> NewPriceTable {
        NewPriceTable {
            origin: origin.to_string(),
            destinations: destinations
                .iter()
                .map(|(destination, cost)| DestinationPrice {
                    destination: destination.to_string(),
                    cost: *cost,
                })
                .collect(),
        }
    }

    vec![
        table("011", &[("016", 1.9), ("017", 1.7), ("018", 0.9)]),
        table("016", &[("011", 2.9)]),
        table("017", &[("011", 2.7)]),
        table("018", &[("011", 1.9)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plans() {
        let plans = standard_plans();
        let names: Vec<_> = plans.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["FaleMais 30", "FaleMais 60", "FaleMais 120"]);
        assert!(plans.iter().all(|p| p.pack.extra == 10));
        assert_eq!(plans[2].pack.minutes, 120);
    }

    #[test]
    fn test_standard_prices_cover_area_codes() {
        let prices = standard_prices();
        let origins: Vec<_> = prices.iter().map(|p| p.origin.as_str()).collect();

        assert_eq!(origins, vec!["011", "016", "017", "018"]);
        assert_eq!(prices[0].destinations.len(), 3);
        assert_eq!(prices[3].destinations[0].cost, 1.9);
    }

    #[tokio::test]
    async fn test_seed_empty_store() {
        let store = SqliteStore::in_memory().await.unwrap();

        let (plans, prices) = seed(&store, false).await.unwrap();
        assert_eq!((plans, prices), (3, 4));

        let table = store.find_price_by_origin("011").await.unwrap().unwrap();
        assert_eq!(table.price_to("017"), Some(1.7));
    }

    #[tokio::test]
    async fn test_seed_refuses_populated_store_without_force() {
        let store = SqliteStore::in_memory().await.unwrap();
        seed(&store, false).await.unwrap();

        let err = seed(&store, false).await.unwrap_err();
        assert!(err.to_string().contains("--force"));

        seed(&store, true).await.unwrap();
        assert_eq!(store.list_plans().await.unwrap().len(), 6);
    }
}
