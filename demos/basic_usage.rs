//! Basic ModelHaus usage: define a model, then create, query, update and delete rows.
//!
//! Expects a `modelhaus.toml` (or `MODELHAUS_CONFIG`) pointing at a PostgreSQL
//! database with this table:
//!
//! ```sql
//! CREATE TABLE products (
//!     key UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     name TEXT NOT NULL UNIQUE,
//!     price INTEGER NOT NULL,
//!     tags TEXT[] NOT NULL DEFAULT '{}'
//! );
//! ```

use modelhaus::prelude::*;
use tracing_subscriber::EnvFilter;

/// A concrete model: all verbs come from the `Model` trait
struct Products(GenericModel);

impl Model for Products {
    fn definition(&self) -> &ModelDefinition {
        self.0.definition()
    }
}

#[derive(Debug, Deserialize)]
struct Product {
    key: Uuid,
    name: String,
    price: i32,
    tags: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let haus = ModelHaus::from_config_file().await?;
    haus.health_check().await?;

    let products = Products(
        haus.extend(
            PartialModel::new()
                .table("products")
                .field("name", FieldType::Text)
                .field("price", FieldType::Integer)
                .field("tags", FieldType::TextArray),
        )?,
    );

    let price_rule = NonNegativeInteger;
    for (name, price) in [("kettle", 25), ("teapot", 40), ("mug", 8)] {
        price_rule.validate(&json!(price))?;

        let values = Values::new()
            .set("name", json!(name))
            .set("price", json!(price))
            .set("tags", json!(["kitchen"]));

        match products.create(values).await {
            Ok(created) => println!("Created {}: {:?}", name, created.key()),
            Err(e) if e.is_entity_exists() => println!("{} already exists", name),
            Err(e) => return Err(e.into()),
        }
    }

    let cheapest_first = products
        .find(Query::new(), FindOptions::new().order_by("price", SortOrder::Asc))
        .await?;
    for document in cheapest_first {
        let product: Product = document.into_typed()?;
        println!("{} costs {} ({:?}) [{}]", product.name, product.price, product.tags, product.key);
    }

    let mut mug = products.find_one(Query::new().eq("name", json!("mug"))).await?;
    mug.insert("price", json!(9));
    let saved = products.save(&mug).await?;
    println!("Mug now costs {}", saved.get("price").cloned().unwrap_or_default());

    println!("{} products in stock", products.count(Query::new()).await?);

    let removed = products.delete(&saved).await?;
    println!("Removed {:?}", removed.get("name"));

    Ok(())
}
