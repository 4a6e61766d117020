//! Property test: stock conservation.
//!
//! For any sequence of place/cancel operations against one product starting
//! at stock S0, the available stock plus the units held by live
//! (non-cancelled) orders always equals S0.

use std::sync::Arc;

use chrono::{Days, Utc};
use proptest::prelude::*;

use storefront_api::application::ports::NoOpEventPublisher;
use storefront_api::application::use_cases::{
    CancelOrderUseCase, PlaceOrderRequest, PlaceOrderUseCase,
};
use storefront_api::domain::catalog::{Product, ProductRepository};
use storefront_api::domain::ordering::services::DeliverySchedule;
use storefront_api::domain::ordering::{OrderRepository, OrderStatus, Page};
use storefront_api::infrastructure::persistence::{
    InMemoryOrderRepository, InMemoryProductRepository,
};
use storefront_api::{CurrentUser, Money, ProductId, Role, UserId};

const INITIAL_STOCK: u32 = 12;

#[derive(Debug, Clone)]
enum Op {
    Place { qty: u32 },
    Cancel { pick: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..=5).prop_map(|qty| Op::Place { qty }),
        (0usize..16).prop_map(|pick| Op::Cancel { pick }),
    ]
}

async fn live_units(orders: &InMemoryOrderRepository) -> u32 {
    let page = orders
        .find_all(None, None, Page::new(1, Page::MAX_SIZE))
        .await
        .unwrap();
    page.orders
        .iter()
        .filter(|o| o.status() != OrderStatus::Cancelled)
        .map(|o| o.quantity().get())
        .sum()
}

async fn run_ops(ops: Vec<Op>) {
    let products = Arc::new(InMemoryProductRepository::new());
    products.add(Product::new(
        ProductId::new("prod-1"),
        "Ceylon Tea 500g",
        Money::from_f64(10.0),
        INITIAL_STOCK,
        true,
    ));
    let orders = Arc::new(InMemoryOrderRepository::new());
    let schedule = Arc::new(DeliverySchedule::new(
        vec!["10 AM".to_string()],
        vec!["Colombo".to_string()],
        vec![],
    ));

    let place = PlaceOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&orders),
        Arc::new(NoOpEventPublisher),
        schedule,
    );
    let cancel = CancelOrderUseCase::new(
        Arc::clone(&products),
        Arc::clone(&orders),
        Arc::new(NoOpEventPublisher),
    );

    let user = CurrentUser {
        id: UserId::new("user-1"),
        username: "nimal".to_string(),
        role: Role::User,
    };
    let mut placed_ids: Vec<String> = Vec::new();

    for op in ops {
        match op {
            Op::Place { qty } => {
                // May fail with OutOfStock; both outcomes must conserve stock
                if let Ok(order) = place
                    .execute(
                        &user,
                        PlaceOrderRequest {
                            product_id: "prod-1".to_string(),
                            quantity: qty,
                            purchase_date: Utc::now().date_naive() + Days::new(1),
                            delivery_time: "10 AM".to_string(),
                            delivery_location: "Colombo".to_string(),
                            message: None,
                        },
                    )
                    .await
                {
                    placed_ids.push(order.id().as_str().to_string());
                }
            }
            Op::Cancel { pick } => {
                if placed_ids.is_empty() {
                    continue;
                }
                let id = &placed_ids[pick % placed_ids.len()];
                // Second cancels of the same order must fail and change nothing
                let _ = cancel.execute(&user, id, None).await;
            }
        }

        let stock = products
            .find_by_id(&ProductId::new("prod-1"))
            .await
            .unwrap()
            .unwrap()
            .stock();
        let live = live_units(&orders).await;
        assert_eq!(
            stock + live,
            INITIAL_STOCK,
            "stock {stock} + live units {live} != initial {INITIAL_STOCK}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stock_plus_live_reservations_is_constant(
        ops in proptest::collection::vec(op_strategy(), 1..24)
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(run_ops(ops));
    }
}
