//! # Demo Sale
//!
//! Runs a scripted sale against an in-memory price table and prints the
//! resulting receipt.
//!
//! ## Usage
//! ```bash
//! cargo run -p vela-session --bin demo
//!
//! # With debug-level session logs
//! RUST_LOG=debug cargo run -p vela-session --bin demo
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use vela_core::money::Money;
use vela_core::types::{CustomerType, ItemCandidate};
use vela_session::checkout::{add_priced_item, submit_order, OrderDraft, UnpricedItem};
use vela_session::{BackendError, OrderSubmitter, PriceLookup, SessionState};

/// In-memory price table keyed by product id.
struct DemoPricing {
    retail: HashMap<&'static str, i64>,
}

#[async_trait]
impl PriceLookup for DemoPricing {
    async fn unit_price(
        &self,
        product_id: &str,
        _variant_id: Option<&str>,
        customer_type: CustomerType,
    ) -> Result<Money, BackendError> {
        let cents = self
            .retail
            .get(product_id)
            .ok_or_else(|| BackendError::NotFound {
                entity: "Product".to_string(),
                id: product_id.to_string(),
            })?;
        let cents = match customer_type {
            CustomerType::Retail => *cents,
            // 10% off list price for wholesale customers
            CustomerType::Wholesale => *cents - Money::from_cents(*cents).percent_of(10).cents(),
        };
        Ok(Money::from_cents(cents))
    }
}

/// Accepts every draft and hands back a fresh order id.
struct DemoSubmitter;

#[async_trait]
impl OrderSubmitter for DemoSubmitter {
    async fn submit(&self, draft: &OrderDraft) -> Result<String, BackendError> {
        info!(
            items = draft.items.len(),
            final_amount = %draft.totals.final_amount,
            "backend accepted order"
        );
        Ok(Uuid::new_v4().to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let pricing = DemoPricing {
        retail: HashMap::from([("phone-128", 1000), ("charger", 500)]),
    };
    let state = SessionState::new();

    // Scripted sale: two inventory items and one external item
    add_priced_item(
        &state,
        &pricing,
        UnpricedItem {
            product_id: "phone-128".to_string(),
            variant_id: None,
            name: "Phone 128GB".to_string(),
            unit_cost: Some(Money::from_cents(700)),
            available_quantity: Some(10),
            quantity: 2,
        },
    )
    .await?;
    add_priced_item(
        &state,
        &pricing,
        UnpricedItem {
            product_id: "charger".to_string(),
            variant_id: None,
            name: "USB-C Charger".to_string(),
            unit_cost: None,
            available_quantity: Some(25),
            quantity: 3,
        },
    )
    .await?;
    state.with_session_mut(|s| {
        s.add_item(ItemCandidate::external(
            "Screen protector (external)",
            Money::from_cents(300),
        ))?;
        s.set_discount(Money::from_cents(500))?;
        s.set_tax(Money::from_cents(160))?;
        Ok::<_, vela_core::CoreError>(())
    })?;

    // Pay in full via the quick button, then submit
    state.with_session_mut(|s| s.quick_amount(100))?;

    print_receipt(&state);

    let submitted = submit_order(&state, &DemoSubmitter).await?;
    println!("\nOrder {} submitted.", submitted.order_id);
    println!(
        "Session cleared: cart empty = {}",
        state.with_session(|s| s.cart().is_empty())
    );

    Ok(())
}

fn print_receipt(state: &SessionState) {
    state.with_session(|session| {
        println!("================ RECEIPT ================");
        for item in session.items() {
            println!(
                "{:<30} x{:<3} {:>8}",
                item.name,
                item.quantity,
                item.line_total().to_string()
            );
        }
        let totals = session.totals();
        println!("-----------------------------------------");
        println!("{:<35}{:>8}", "Subtotal", totals.subtotal.to_string());
        println!("{:<35}{:>8}", "Discount", totals.discount.to_string());
        println!("{:<35}{:>8}", "Tax", totals.tax.to_string());
        println!("{:<35}{:>8}", "Shipping", totals.shipping.to_string());
        println!("{:<35}{:>8}", "TOTAL", totals.final_amount.to_string());
        println!("{:<35}{:>8}", "Paid", totals.amount_paid.to_string());
        println!("{:<35}{:>8}", "Balance due", totals.balance_due.to_string());
        println!("Status: {:?}", totals.status);
        println!("=========================================");
    });
}
