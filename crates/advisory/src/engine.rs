//! Pure evaluation of a product snapshot into prioritized recommendations.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use shelfwise_core::{DomainError, Product, ProductId, SalesVelocity};

use crate::policy::AdvisoryPolicy;
use crate::recommendation::{ActionPayload, Priority, Recommendation, RecommendationType};

/// A product excluded from evaluation because its record was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProduct {
    pub product_id: ProductId,
    pub reason: DomainError,
}

/// Output of one evaluation pass.
///
/// Malformed records are reported alongside the recommendations rather than
/// failing the pass; one bad row never blocks advice for the rest of the
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Recommendations in presentation order: Critical, then Urgent, then
    /// High; snapshot order within equal priority.
    pub recommendations: Vec<Recommendation>,
    pub skipped: Vec<SkippedProduct>,
}

/// Evaluate a snapshot against the advisory rules.
///
/// Pure and deterministic: the same snapshot, reference date, and policy
/// always produce the identical recommendation sequence, including order.
/// `reference_date` is an explicit input rather than wall-clock time so the
/// function stays testable.
pub fn evaluate(
    snapshot: &[Product],
    reference_date: NaiveDate,
    policy: &AdvisoryPolicy,
) -> Evaluation {
    let mut out = Evaluation::default();

    for product in snapshot {
        if let Err(reason) = product.validate() {
            warn!(product_id = %product.id, %reason, "skipping malformed product record");
            out.skipped.push(SkippedProduct {
                product_id: product.id,
                reason,
            });
            continue;
        }

        // Delisted products get no further advice.
        if product.removed_from_sale {
            continue;
        }

        if let Some(rec) = reorder_rule(product, policy) {
            out.recommendations.push(rec);
        }
        if let Some(rec) = expiry_rule(product, reference_date, policy) {
            out.recommendations.push(rec);
        }
    }

    // Stable: equal priorities keep snapshot order.
    out.recommendations
        .sort_by_key(|r| core::cmp::Reverse(r.priority));

    out
}

fn reorder_rule(product: &Product, policy: &AdvisoryPolicy) -> Option<Recommendation> {
    if product.stock_count >= product.critical_stock_threshold {
        return None;
    }
    if product.sales_velocity != SalesVelocity::High {
        return None;
    }

    let quantity = policy.reorder_quantity();
    Some(Recommendation {
        product_id: product.id,
        kind: RecommendationType::Reorder,
        priority: Priority::High,
        message: format!(
            "'{}' is below its critical stock level ({} < {}) and selling fast; reorder {} units",
            product.name, product.stock_count, product.critical_stock_threshold, quantity
        ),
        action: ActionPayload::Reorder {
            product_id: product.id,
            quantity,
        },
    })
}

fn expiry_rule(
    product: &Product,
    reference_date: NaiveDate,
    policy: &AdvisoryPolicy,
) -> Option<Recommendation> {
    let expiry = product.expiry_date?;
    let days_to_expiry = (expiry - reference_date).num_days();

    if days_to_expiry <= 0 {
        return Some(Recommendation {
            product_id: product.id,
            kind: RecommendationType::WriteOff,
            priority: Priority::Critical,
            message: format!(
                "'{}' expired on {}; remove from sale",
                product.name, expiry
            ),
            action: ActionPayload::WriteOff {
                product_id: product.id,
            },
        });
    }

    if days_to_expiry <= policy.markdown_window_days {
        let new_price = product.unit_price.reduce_percent(policy.markdown_percent);
        return Some(Recommendation {
            product_id: product.id,
            kind: RecommendationType::Markdown,
            priority: Priority::Urgent,
            message: format!(
                "'{}' expires in {} day(s); mark down {} -> {} ({}% off)",
                product.name, days_to_expiry, product.unit_price, new_price, policy.markdown_percent
            ),
            action: ActionPayload::Markdown {
                product_id: product.id,
                new_price,
            },
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfwise_core::Money;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_string(),
            stock_count: 100,
            sales_velocity: SalesVelocity::Normal,
            expiry_date: None,
            unit_price: Money(1000),
            critical_stock_threshold: 10,
            removed_from_sale: false,
        }
    }

    #[test]
    fn empty_snapshot_yields_empty_evaluation() {
        let eval = evaluate(&[], reference_date(), &AdvisoryPolicy::default());
        assert!(eval.recommendations.is_empty());
        assert!(eval.skipped.is_empty());
    }

    #[test]
    fn low_stock_high_velocity_yields_reorder_of_seventy() {
        let mut p = product("Energy Drink");
        p.stock_count = 5;
        p.critical_stock_threshold = 20;
        p.sales_velocity = SalesVelocity::High;

        let eval = evaluate(&[p.clone()], reference_date(), &AdvisoryPolicy::default());
        assert_eq!(eval.recommendations.len(), 1);

        let rec = &eval.recommendations[0];
        assert_eq!(rec.kind, RecommendationType::Reorder);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(
            rec.action,
            ActionPayload::Reorder {
                product_id: p.id,
                quantity: 70
            }
        );
    }

    #[test]
    fn low_stock_normal_velocity_yields_nothing() {
        let mut p = product("Canned Beans");
        p.stock_count = 5;
        p.critical_stock_threshold = 20;
        p.sales_velocity = SalesVelocity::Normal;

        let eval = evaluate(&[p], reference_date(), &AdvisoryPolicy::default());
        assert!(eval.recommendations.is_empty());
    }

    #[test]
    fn near_expiry_yields_markdown_at_ninety_percent() {
        let mut p = product("Yogurt");
        p.unit_price = Money(6000);
        p.expiry_date = Some(reference_date() + chrono::Duration::days(2));

        let eval = evaluate(&[p.clone()], reference_date(), &AdvisoryPolicy::default());
        assert_eq!(eval.recommendations.len(), 1);

        let rec = &eval.recommendations[0];
        assert_eq!(rec.kind, RecommendationType::Markdown);
        assert_eq!(rec.priority, Priority::Urgent);
        assert_eq!(
            rec.action,
            ActionPayload::Markdown {
                product_id: p.id,
                new_price: Money(5400)
            }
        );
    }

    #[test]
    fn expired_product_yields_write_off_and_no_markdown() {
        let mut p = product("Old Milk");
        p.expiry_date = Some(reference_date() - chrono::Duration::days(1));

        let eval = evaluate(&[p.clone()], reference_date(), &AdvisoryPolicy::default());
        assert_eq!(eval.recommendations.len(), 1);

        let rec = &eval.recommendations[0];
        assert_eq!(rec.kind, RecommendationType::WriteOff);
        assert_eq!(rec.priority, Priority::Critical);
        assert_eq!(
            rec.action,
            ActionPayload::WriteOff { product_id: p.id }
        );
    }

    #[test]
    fn expiring_today_counts_as_expired() {
        let mut p = product("Bread");
        p.expiry_date = Some(reference_date());

        let eval = evaluate(&[p], reference_date(), &AdvisoryPolicy::default());
        assert_eq!(eval.recommendations.len(), 1);
        assert_eq!(eval.recommendations[0].kind, RecommendationType::WriteOff);
    }

    #[test]
    fn expiry_beyond_window_yields_nothing() {
        let mut p = product("Cheese");
        p.expiry_date = Some(reference_date() + chrono::Duration::days(4));

        let eval = evaluate(&[p], reference_date(), &AdvisoryPolicy::default());
        assert!(eval.recommendations.is_empty());
    }

    #[test]
    fn non_perishables_are_exempt_from_expiry_rule() {
        let p = product("Batteries");
        let eval = evaluate(&[p], reference_date(), &AdvisoryPolicy::default());
        assert!(eval.recommendations.is_empty());
    }

    #[test]
    fn one_product_can_yield_reorder_and_markdown() {
        let mut p = product("Smoothie");
        p.stock_count = 2;
        p.critical_stock_threshold = 10;
        p.sales_velocity = SalesVelocity::High;
        p.expiry_date = Some(reference_date() + chrono::Duration::days(1));

        let eval = evaluate(&[p], reference_date(), &AdvisoryPolicy::default());
        assert_eq!(eval.recommendations.len(), 2);
        // Urgent markdown presented before the High reorder.
        assert_eq!(eval.recommendations[0].kind, RecommendationType::Markdown);
        assert_eq!(eval.recommendations[1].kind, RecommendationType::Reorder);
    }

    #[test]
    fn recommendations_ordered_critical_urgent_high_regardless_of_input_order() {
        let mut reorder = product("Reorder Me");
        reorder.stock_count = 1;
        reorder.critical_stock_threshold = 10;
        reorder.sales_velocity = SalesVelocity::High;

        let mut markdown = product("Mark Me Down");
        markdown.expiry_date = Some(reference_date() + chrono::Duration::days(2));

        let mut write_off = product("Write Me Off");
        write_off.expiry_date = Some(reference_date() - chrono::Duration::days(2));

        // Deliberately worst-case input order.
        let snapshot = vec![reorder, markdown, write_off];
        let eval = evaluate(&snapshot, reference_date(), &AdvisoryPolicy::default());

        let priorities: Vec<Priority> =
            eval.recommendations.iter().map(|r| r.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::Critical, Priority::Urgent, Priority::High]
        );
    }

    #[test]
    fn equal_priority_preserves_snapshot_order() {
        let mut first = product("First");
        first.expiry_date = Some(reference_date() + chrono::Duration::days(1));
        let mut second = product("Second");
        second.expiry_date = Some(reference_date() + chrono::Duration::days(2));

        let eval = evaluate(
            &[first.clone(), second.clone()],
            reference_date(),
            &AdvisoryPolicy::default(),
        );
        assert_eq!(eval.recommendations.len(), 2);
        assert_eq!(eval.recommendations[0].product_id, first.id);
        assert_eq!(eval.recommendations[1].product_id, second.id);
    }

    #[test]
    fn malformed_product_is_skipped_without_blocking_others() {
        let mut bad = product("Corrupt Row");
        bad.stock_count = -1;

        let mut good = product("Fine Product");
        good.stock_count = 5;
        good.critical_stock_threshold = 20;
        good.sales_velocity = SalesVelocity::High;

        let eval = evaluate(
            &[bad.clone(), good.clone()],
            reference_date(),
            &AdvisoryPolicy::default(),
        );

        assert_eq!(eval.recommendations.len(), 1);
        assert_eq!(eval.recommendations[0].product_id, good.id);
        assert_eq!(eval.skipped.len(), 1);
        assert_eq!(eval.skipped[0].product_id, bad.id);
        assert!(matches!(eval.skipped[0].reason, DomainError::Validation(_)));
    }

    #[test]
    fn removed_products_yield_no_recommendations() {
        let mut p = product("Delisted");
        p.removed_from_sale = true;
        p.stock_count = 0;
        p.critical_stock_threshold = 10;
        p.sales_velocity = SalesVelocity::High;
        p.expiry_date = Some(reference_date() - chrono::Duration::days(3));

        let eval = evaluate(&[p], reference_date(), &AdvisoryPolicy::default());
        assert!(eval.recommendations.is_empty());
        assert!(eval.skipped.is_empty());
    }

    #[test]
    fn custom_policy_changes_quantities_and_window() {
        let policy = AdvisoryPolicy::default()
            .with_base_replenishment_qty(10)
            .with_high_velocity_surplus(5)
            .with_markdown_window_days(7);

        let mut low = product("Low Stock");
        low.stock_count = 0;
        low.critical_stock_threshold = 1;
        low.sales_velocity = SalesVelocity::High;

        let mut perishable = product("Week Out");
        perishable.expiry_date = Some(reference_date() + chrono::Duration::days(6));

        let eval = evaluate(&[low.clone(), perishable], reference_date(), &policy);
        assert_eq!(eval.recommendations.len(), 2);
        assert_eq!(
            eval.recommendations[1].action,
            ActionPayload::Reorder {
                product_id: low.id,
                quantity: 15
            }
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_velocity() -> impl Strategy<Value = SalesVelocity> {
            prop_oneof![
                Just(SalesVelocity::Low),
                Just(SalesVelocity::Normal),
                Just(SalesVelocity::High),
            ]
        }

        fn arb_product() -> impl Strategy<Value = Product> {
            (
                any::<u128>(),
                "[A-Za-z][A-Za-z0-9 ]{0,20}",
                0i64..500,
                arb_velocity(),
                proptest::option::of(-10i64..30),
                0i64..100_000,
                0i64..50,
            )
                .prop_map(
                    |(raw_id, name, stock, velocity, expiry_offset, price, threshold)| Product {
                        id: ProductId::from_uuid(uuid::Uuid::from_u128(raw_id)),
                        name,
                        stock_count: stock,
                        sales_velocity: velocity,
                        expiry_date: expiry_offset.map(|d| {
                            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
                                + chrono::Duration::days(d)
                        }),
                        unit_price: Money(price),
                        critical_stock_threshold: threshold,
                        removed_from_sale: false,
                    },
                )
        }

        proptest! {
            /// Same snapshot + reference date = identical output, order included.
            #[test]
            fn evaluate_is_deterministic(snapshot in proptest::collection::vec(arb_product(), 0..30)) {
                let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
                let policy = AdvisoryPolicy::default();
                let a = evaluate(&snapshot, date, &policy);
                let b = evaluate(&snapshot, date, &policy);
                prop_assert_eq!(a, b);
            }

            /// Output priorities are always non-increasing.
            #[test]
            fn output_is_sorted_by_priority(snapshot in proptest::collection::vec(arb_product(), 0..30)) {
                let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
                let eval = evaluate(&snapshot, date, &AdvisoryPolicy::default());
                for pair in eval.recommendations.windows(2) {
                    prop_assert!(pair[0].priority >= pair[1].priority);
                }
            }

            /// Every recommendation references a product present in the snapshot.
            #[test]
            fn recommendations_reference_snapshot_products(snapshot in proptest::collection::vec(arb_product(), 0..30)) {
                let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
                let eval = evaluate(&snapshot, date, &AdvisoryPolicy::default());
                for rec in &eval.recommendations {
                    prop_assert!(snapshot.iter().any(|p| p.id == rec.product_id));
                    prop_assert_eq!(rec.action.product_id(), rec.product_id);
                }
            }
        }
    }
}
