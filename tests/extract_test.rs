use chrono::{TimeZone, Utc};
use order_extract::{
    AMOUNT_NOT_APPLICABLE, AMOUNT_UNAVAILABLE, DateSource, ExtractError, InboundEmail,
    ItemSource, ItemTier, OrderStatus, ParserRegistry, PlatformId, Stage, default_registry,
    extract,
};
use std::collections::HashSet;

fn received() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap()
}

fn email(sender: &str, subject: &str, body: &str) -> InboundEmail {
    InboundEmail::new(sender, subject, received())
        .with_text(body)
        .with_message_id("msg-001")
}

const AMAZON_HTML: &str = r#"<html><body>
<p>Hello Priya,</p>
<p>Thank you for your order. We will send a confirmation when your item ships.</p>
<table>
<tr><td>Order #</td><td>408-1234567-7654321</td></tr>
<tr><td>Order placed on</td><td>12 March 2024</td></tr>
<tr><td>Arriving</td><td>Friday, 15 March</td></tr>
</table>
<p>Echo Dot (5th Gen)</p>
<p>Qty: 1</p>
<p>Rs. 4,499.00</p>
<p>Sold by: Appario Retail Private Ltd</p>
<p>Order Total: Rs. 4,499.00</p>
</body></html>"#;

fn amazon_placed() -> InboundEmail {
    InboundEmail::new(
        "Amazon.in <auto-confirm@amazon.in>",
        "Your Amazon.in order of \"Echo Dot (5th Gen)\" has been placed",
        received(),
    )
    .with_html(AMAZON_HTML)
    .with_message_id("amz-42")
}

fn bigbasket_delivered() -> InboundEmail {
    email(
        "noreply@bigbasket.com",
        "Your BigBasket order BB12345678 delivered",
        "Hi Rahul,\n\
         Your order has been delivered.\n\
         2x Amul Butter 100g ₹116.00\n\
         3x Britannia Bread ₹120.00\n\
         Bill Amount: ₹452.00\n\
         Thank you for shopping with bigbasket",
    )
}

fn generic_invoice() -> InboundEmail {
    email(
        "billing@acme-tools.example",
        "Invoice #AB12345678 - total ₹999.00 paid",
        "Thanks for your purchase.",
    )
}

fn myntra_promo() -> InboundEmail {
    email(
        "updates@myntra.com",
        "50% off sale - explore now",
        "Shop the season's best styles before they are gone.",
    )
}

fn courier_awb_only() -> InboundEmail {
    email(
        "tracking@delhivery.com",
        "Shipment update",
        "Your shipment with AWB 1234567890123 has been picked up.\nTrack it on our website.",
    )
}

#[test]
fn test_amazon_order_placed() {
    let draft = extract(&amazon_placed()).unwrap();

    assert_eq!(draft.platform, PlatformId::Amazon);
    assert_eq!(draft.order_id, "408-1234567-7654321");
    assert!(matches!(
        draft.status,
        OrderStatus::Ordered | OrderStatus::Confirmed
    ));
    assert_eq!(draft.amount, Some(4499.0));
    assert_eq!(draft.formatted_amount, "₹4,499.00");
    assert_eq!(draft.items.len(), 1);
    assert_eq!(draft.items[0].name, "Echo Dot (5th Gen)");
    assert_eq!(draft.items[0].source, ItemSource::Body);
    assert_eq!(
        draft.seller_name.as_deref(),
        Some("Appario Retail Private Ltd")
    );
    assert_eq!(draft.expected_delivery.as_deref(), Some("Friday, 15 March"));
    assert_eq!(
        draft.order_date,
        Utc.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap()
    );

    let meta = &draft.extraction_metadata;
    assert_eq!(meta.rule_for("order_id"), Some("amazon_order_id"));
    assert_eq!(meta.rule_for("seller_name"), Some("amazon_sold_by"));
    assert_eq!(meta.item_tier, ItemTier::Body);
    assert_eq!(meta.date_source, DateSource::Body);
    assert!(meta.status_classified);
    assert_eq!(meta.source_message_id, "amz-42");
    assert_eq!(meta.engine_version, env!("CARGO_PKG_VERSION"));
    assert!(draft.confidence <= 0.95);
    assert!(draft.confidence > 0.8);
}

#[test]
fn test_bigbasket_delivered() {
    let draft = extract(&bigbasket_delivered()).unwrap();

    assert_eq!(draft.platform, PlatformId::BigBasket);
    assert_eq!(draft.order_id, "BB12345678");
    assert_eq!(draft.amount, Some(452.0));
    assert_eq!(draft.status, OrderStatus::Delivered);
    assert_eq!(draft.items.len(), 2);
    assert_eq!(draft.items[0].name, "Amul Butter 100g");
    assert_eq!(draft.items[0].quantity, 2);
    assert_eq!(draft.items[0].unit_price, 58.0);
    assert_eq!(draft.items[1].name, "Britannia Bread");
    assert!(draft.confidence > 0.8);
}

#[test]
fn test_generic_invoice() {
    let draft = extract(&generic_invoice()).unwrap();

    assert_eq!(draft.platform, PlatformId::Generic);
    assert_eq!(draft.order_id, "AB12345678");
    assert_eq!(draft.amount, Some(999.0));
    assert!(draft.confidence <= 0.8);
    assert_eq!(draft.items.len(), 1);
    assert!(draft.items[0].is_placeholder());
    assert_eq!(draft.items[0].total_price, 999.0);
}

#[test]
fn test_promotional_mail_declined() {
    let mail = myntra_promo();
    let registry = default_registry();

    assert_eq!(registry.detect_platform(&mail), Some(PlatformId::Myntra));
    assert!(extract(&mail).is_none());
    assert!(matches!(
        registry.try_extract(&mail),
        Err(ExtractError::NotTransactional {
            platform: PlatformId::Myntra
        })
    ));
}

#[test]
fn test_courier_awb_only() {
    let draft = extract(&courier_awb_only()).unwrap();

    assert_eq!(draft.platform, PlatformId::Delhivery);
    assert_eq!(draft.order_id, "1234567890123");
    assert_eq!(draft.tracking_id.as_deref(), Some("1234567890123"));
    assert_eq!(draft.amount, Some(0.0));
    assert_eq!(draft.formatted_amount, AMOUNT_NOT_APPLICABLE);
    assert_eq!(draft.items.len(), 1);
    assert!(draft.items[0].is_placeholder());
    assert_eq!(draft.status, OrderStatus::PickedUp);
    assert_eq!(draft.courier_name.as_deref(), Some("Delhivery"));
}

#[test]
fn test_merchant_mail_names_courier() {
    let mail = email(
        "no-reply@flipkart.com",
        "Your Flipkart item has been shipped",
        "Order ID: OD428761234567890100\n\
         Your item has been handed over to Ekart Logistics.\n\
         Tracking ID: FMPP1234567890",
    );
    let draft = extract(&mail).unwrap();

    assert_eq!(draft.order_id, "OD428761234567890100");
    assert_eq!(draft.status, OrderStatus::Shipped);
    assert_eq!(draft.tracking_id.as_deref(), Some("FMPP1234567890"));
    assert_eq!(draft.courier_name.as_deref(), Some("Ekart"));
    assert_eq!(draft.formatted_amount, AMOUNT_UNAVAILABLE);
    assert_eq!(draft.amount, None);
}

#[test]
fn test_food_delivery_items_and_restaurant() {
    let mail = email(
        "noreply@swiggy.in",
        "Your Swiggy order was delivered",
        "Order No: 123456789012\n\
         Restaurant: Meghana Foods\n\
         Chicken Biryani (2) ₹560\n\
         Gulab Jamun (1) ₹90\n\
         Total Paid: ₹650",
    );
    let draft = extract(&mail).unwrap();

    assert_eq!(draft.order_id, "123456789012");
    assert_eq!(draft.amount, Some(650.0));
    assert_eq!(draft.seller_name.as_deref(), Some("Meghana Foods"));
    assert_eq!(draft.items.len(), 2);
    assert_eq!(draft.items[0].quantity, 2);
    assert_eq!(draft.items[0].unit_price, 280.0);
}

#[test]
fn test_amount_priority_independent_of_order() {
    let subtotal_first = email(
        "orders@flipkart.com",
        "Order Confirmed",
        "Order ID OD123456789012345678\nSubtotal: ₹500.00\nGrand Total: ₹450.00",
    );
    let total_first = email(
        "orders@flipkart.com",
        "Order Confirmed",
        "Order ID OD123456789012345678\nGrand Total: ₹450.00\nSubtotal: ₹500.00",
    );

    assert_eq!(extract(&subtotal_first).unwrap().amount, Some(450.0));
    assert_eq!(extract(&total_first).unwrap().amount, Some(450.0));
}

#[test]
fn test_amount_above_category_ceiling_rejected() {
    let mail = email(
        "noreply@bigbasket.com",
        "Your BigBasket order BB87654321 is confirmed",
        "Bill Amount: ₹75,000.00",
    );
    let draft = extract(&mail).unwrap();

    assert_eq!(draft.amount, None);
    assert_eq!(draft.formatted_amount, AMOUNT_UNAVAILABLE);
}

#[test]
fn test_duplicate_items_dropped() {
    let mail = email(
        "noreply@bigbasket.com",
        "Your BigBasket order BB12345678 delivered",
        "2x Amul Butter ₹116.00\n1x amul  butter ₹58.00\n1x Bread ₹40.00\nBill Amount: ₹214.00",
    );
    let draft = extract(&mail).unwrap();

    assert_eq!(draft.items.len(), 2);
    let keys: HashSet<_> = draft.items.iter().map(|i| i.key()).collect();
    assert_eq!(keys.len(), draft.items.len());
    assert_eq!(draft.items[0].quantity, 2);
}

#[test]
fn test_item_keys_unique_across_scenarios() {
    for mail in [amazon_placed(), bigbasket_delivered(), generic_invoice(), courier_awb_only()] {
        let draft = extract(&mail).unwrap();
        let keys: HashSet<_> = draft.items.iter().map(|i| i.key()).collect();
        assert_eq!(keys.len(), draft.items.len());
        assert!(!draft.items.is_empty());
    }
}

#[test]
fn test_extract_is_idempotent() {
    for mail in [amazon_placed(), bigbasket_delivered(), generic_invoice(), courier_awb_only()] {
        let first = serde_json::to_string(&extract(&mail)).unwrap();
        let second = serde_json::to_string(&extract(&mail)).unwrap();
        assert_eq!(first, second);

        let fresh = ParserRegistry::new(Default::default()).unwrap();
        assert_eq!(serde_json::to_string(&fresh.extract(&mail)).unwrap(), first);
    }
}

#[test]
fn test_confidence_within_ceiling() {
    let registry = default_registry();
    for mail in [amazon_placed(), bigbasket_delivered(), generic_invoice(), courier_awb_only()] {
        let draft = registry.extract(&mail).unwrap();
        let ceiling = if draft.platform == PlatformId::Generic {
            0.8
        } else {
            0.95
        };
        assert!(draft.confidence >= 0.0);
        assert!(draft.confidence <= ceiling);
    }
}

#[test]
fn test_missing_identifier() {
    let mail = email(
        "noreply@bigbasket.com",
        "Your order has been delivered",
        "Thanks!",
    );
    let result = default_registry().try_extract(&mail);

    assert!(matches!(
        result,
        Err(ExtractError::NoIdentifier {
            platform: PlatformId::BigBasket
        })
    ));
    assert!(extract(&mail).is_none());
}

#[test]
fn test_no_platform() {
    let mail = email("friend@example.org", "Lunch?", "See you at noon");
    let err = default_registry().try_extract(&mail).unwrap_err();

    assert!(matches!(err, ExtractError::NoPlatformMatch));
    assert!(err.is_decline());
}

#[test]
fn test_received_date_fallback() {
    let draft = extract(&bigbasket_delivered()).unwrap();

    assert_eq!(draft.order_date, received());
    assert_eq!(draft.extraction_metadata.date_source, DateSource::Received);
}

#[test]
fn test_trace_of_accepted_mail() {
    let (draft, trace) = default_registry().extract_traced(&amazon_placed());

    assert!(draft.is_some());
    assert!(!trace.is_declined());
    assert_eq!(trace.platform, Some(PlatformId::Amazon));
    assert_eq!(trace.events_for(Stage::OrderId).count(), 1);
    assert_eq!(trace.events_for(Stage::Outcome).count(), 1);
}

#[test]
fn test_trace_of_declined_mail() {
    let (draft, trace) = default_registry().extract_traced(&myntra_promo());

    assert!(draft.is_none());
    assert!(trace.is_declined());
    assert_eq!(trace.platform, Some(PlatformId::Myntra));
    assert_eq!(trace.events_for(Stage::Classify).count(), 1);
    assert_eq!(trace.events_for(Stage::OrderId).count(), 0);
}

#[test]
fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParserRegistry>();

    let registry = default_registry();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let draft = registry.extract(&bigbasket_delivered()).unwrap();
                assert_eq!(draft.order_id, "BB12345678");
            });
        }
    });
}

#[test]
fn test_delivery_date_is_not_order_date() {
    let mail = email(
        "no-reply@flipkart.com",
        "Your Flipkart order has been shipped",
        "Order ID: OD428761234567890100\nExpected Delivery Date: 20 Mar 2024",
    );

    let draft = extract(&mail).unwrap();
    let meta = &draft.extraction_metadata;

    assert_eq!(draft.order_date, received());
    assert_eq!(meta.date_source, DateSource::Received);
    assert!(meta.rule_for("order_date").is_none());
    assert_eq!(draft.expected_delivery.as_deref(), Some("20 Mar 2024"));
}

#[test]
fn test_labelled_date_after_receipt_ignored() {
    let mail = email(
        "noreply@bigbasket.com",
        "Your BigBasket order BB12345678 is confirmed",
        "Order Date: 20 Mar 2024\nBill Amount: ₹452.00",
    );

    let draft = extract(&mail).unwrap();

    assert_eq!(draft.order_date, received());
    assert_eq!(draft.extraction_metadata.date_source, DateSource::Received);
    assert!(draft.order_date <= mail.received_at);
}

#[test]
fn test_yearless_date_from_previous_year() {
    let new_year = Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
    let mail = InboundEmail::new(
        "noreply@bigbasket.com",
        "Your BigBasket order BB12345678 is confirmed",
        new_year,
    )
    .with_text("Order Date: 30 Dec\nBill Amount: ₹452.00");

    let draft = extract(&mail).unwrap();

    assert_eq!(
        draft.order_date,
        Utc.with_ymd_and_hms(2023, 12, 30, 0, 0, 0).unwrap()
    );
    assert_eq!(draft.extraction_metadata.date_source, DateSource::Body);
}

#[test]
fn test_awb_stands_in_for_order_id() {
    let mail = email(
        "tracking@delhivery.com",
        "Shipment update",
        "Your Amazon package with AWB 1234567890123 is out for delivery.",
    );

    let draft = default_registry().try_extract(&mail).unwrap();

    assert_eq!(draft.platform, PlatformId::Amazon);
    assert_eq!(draft.order_id, "1234567890123");
    assert_eq!(draft.tracking_id.as_deref(), Some("1234567890123"));
    assert_eq!(draft.status, OrderStatus::OutForDelivery);
    assert_eq!(
        draft.extraction_metadata.rule_for("order_id"),
        Some("tracking_label")
    );
}
