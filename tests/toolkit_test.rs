use chrono::{NaiveDate, TimeZone, Utc};
use order_extract::rules::COMMON_ITEMS;
use order_extract::toolkit::{
    Candidate, Cascade, ItemSet, RuleSpec, clean_item_name, detect_status, format_amount,
    is_date_shaped, match_item_lines, month_from_name, normalize_currency, normalize_item_name,
    parse_amount, parse_date, select_by_priority, select_by_priority_magnitude, status_from_text,
    subject_item_name, validate_amount, validate_identifier, validate_text,
};
use order_extract::{Currency, ItemSource, LineItem, OrderStatus};

fn candidate(value: f64, priority: u8, position: usize) -> Candidate<f64> {
    Candidate {
        value,
        priority,
        position,
        rule: "test",
    }
}

#[test]
fn test_validate_identifier() {
    assert_eq!(validate_identifier("AB12345678").as_deref(), Some("AB12345678"));
    assert_eq!(validate_identifier("#AB12345678").as_deref(), Some("AB12345678"));
    assert_eq!(
        validate_identifier("408-1234567-7654321").as_deref(),
        Some("408-1234567-7654321")
    );

    assert!(validate_identifier("ABCDEFG").is_none());
    assert!(validate_identifier("1234").is_none());
    assert!(validate_identifier("2024-03-12").is_none());
    assert!(validate_identifier("100px-wide").is_none());
    assert!(validate_identifier("table-12345").is_none());
    assert!(validate_identifier("AB 12345678").is_none());
}

#[test]
fn test_validate_amount() {
    assert_eq!(validate_amount("1,234.50", 50_000.0), Some(1234.5));
    assert_eq!(validate_amount("50,000", 50_000.0), Some(50_000.0));
    assert!(validate_amount("0", 50_000.0).is_none());
    assert!(validate_amount("60,000", 50_000.0).is_none());
}

#[test]
fn test_validate_text() {
    assert_eq!(
        validate_text("  Appario Retail Private Ltd  ", 2, 60).as_deref(),
        Some("Appario Retail Private Ltd")
    );
    assert!(validate_text("font-size: 12px", 2, 60).is_none());
    assert!(validate_text("td width", 2, 60).is_none());
    assert!(validate_text("12345", 2, 60).is_none());
    assert!(validate_text("x", 2, 60).is_none());
}

#[test]
fn test_currency_normalization() {
    assert_eq!(
        normalize_currency("Total Rs. 1,299 and INR 50"),
        "Total ₹1,299 and ₹50"
    );
    assert_eq!(normalize_currency("Paid &#8377;99"), "Paid ₹99");
    assert_eq!(normalize_currency("Paid USD 20"), "Paid $20");
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("1,23,456.50"), Some(123_456.5));
    assert_eq!(parse_amount("452"), Some(452.0));
    assert!(parse_amount("abc").is_none());
    assert!(parse_amount("1.2.3").is_none());
}

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(123_456.0, Currency::Inr), "₹1,23,456.00");
    assert_eq!(format_amount(452.0, Currency::Inr), "₹452.00");
    assert_eq!(format_amount(1_234_567.5, Currency::Usd), "$1,234,567.50");
}

#[test]
fn test_parse_date_shapes() {
    let reference = Utc.with_ymd_and_hms(2024, 3, 20, 10, 0, 0).unwrap();
    let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);

    assert_eq!(parse_date("Ordered on 12 Mar 2024", reference), day(2024, 3, 12));
    assert_eq!(parse_date("2024-03-05", reference), day(2024, 3, 5));
    assert_eq!(parse_date("March 9, 2024", reference), day(2024, 3, 9));
    assert_eq!(parse_date("12-Mar-2024", reference), day(2024, 3, 12));
    assert_eq!(parse_date("12/03/2024", reference), day(2024, 3, 12));
    assert_eq!(parse_date("5 Mar", reference), day(2024, 3, 5));
    assert_eq!(parse_date("no date here", reference), None);
}

#[test]
fn test_yearless_date_never_after_reference() {
    let new_year = Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();

    assert_eq!(
        parse_date("30 Dec", new_year),
        NaiveDate::from_ymd_opt(2023, 12, 30)
    );
    assert_eq!(
        parse_date("2 Jan", new_year),
        NaiveDate::from_ymd_opt(2024, 1, 2)
    );
}

#[test]
fn test_date_shaped_identifiers() {
    assert!(is_date_shaped("2024-03-12"));
    assert!(is_date_shaped("12-03-2024"));
    assert!(is_date_shaped("12-03-24"));
    assert!(!is_date_shaped("408-1234567-7654321"));
    assert!(!is_date_shaped("12-03-2024X"));

    assert!(validate_identifier("12-03-2024").is_none());
    assert!(validate_identifier("12-03-24").is_none());
}

#[test]
fn test_month_from_name() {
    assert_eq!(month_from_name("Sept"), Some(9));
    assert_eq!(month_from_name("mar"), Some(3));
    assert_eq!(month_from_name("December"), Some(12));
    assert_eq!(month_from_name("marketplace"), None);
    assert_eq!(month_from_name("ma"), None);
}

#[test]
fn test_status_keywords() {
    assert_eq!(
        status_from_text("Your order has been delivered").map(|s| s.0),
        Some(OrderStatus::Delivered)
    );
    assert_eq!(
        status_from_text("Your order was cancelled after it shipped").map(|s| s.0),
        Some(OrderStatus::Cancelled)
    );
    assert_eq!(
        status_from_text("Your package is out for delivery").map(|s| s.0),
        Some(OrderStatus::OutForDelivery)
    );
}

#[test]
fn test_status_ignores_future_phrases() {
    assert!(status_from_text("Your package will be delivered by Friday").is_none());
}

#[test]
fn test_detect_status_subject_first() {
    let (status, _) = detect_status("Order shipped", "It was delivered yesterday", false).unwrap();
    assert_eq!(status, OrderStatus::Shipped);

    let (status, label) = detect_status("Order update", "It was delivered yesterday", false).unwrap();
    assert_eq!(status, OrderStatus::Delivered);
    assert_eq!(label, "delivered");
}

#[test]
fn test_detect_status_courier_lifecycle() {
    let (status, _) = detect_status("Your order has been shipped", "", true).unwrap();
    assert_eq!(status, OrderStatus::InTransit);

    let (status, _) = detect_status("Shipment booked", "", true).unwrap();
    assert_eq!(status, OrderStatus::Booked);
}

#[test]
fn test_priority_beats_magnitude_and_position() {
    let best = select_by_priority_magnitude(vec![
        candidate(999.0, 10, 0),
        candidate(452.0, 90, 50),
    ])
    .unwrap();
    assert_eq!(best.value, 452.0);
}

#[test]
fn test_magnitude_breaks_priority_ties() {
    let best =
        select_by_priority_magnitude(vec![candidate(100.0, 10, 0), candidate(250.0, 10, 40)])
            .unwrap();
    assert_eq!(best.value, 250.0);
}

#[test]
fn test_select_by_priority_prefers_earliest() {
    let best = select_by_priority(vec![
        candidate(1.0, 50, 30),
        candidate(2.0, 50, 10),
        candidate(3.0, 40, 0),
    ])
    .unwrap();
    assert_eq!(best.value, 2.0);
    assert!(select_by_priority::<f64>(Vec::new()).is_none());
}

#[test]
fn test_cascade_orders_rules_by_priority() {
    let specs = [
        RuleSpec::new("bare", r"[₹$](?P<v>\d+)", 10),
        RuleSpec::new("total", r"Total: [₹$](?P<v>\d+)", 90),
    ];
    let cascade = Cascade::compile("amount", &specs).unwrap();

    assert_eq!(cascade.field(), "amount");
    assert_eq!(cascade.rules()[0].label, "total");

    let best = select_by_priority_magnitude(
        cascade.candidates("₹5 Total: ₹40", |raw| raw.parse::<f64>().ok()),
    )
    .unwrap();
    assert_eq!(best.value, 40.0);
    assert_eq!(best.rule, "total");
}

#[test]
fn test_cascade_rejects_bad_pattern() {
    let specs = [RuleSpec::new("broken", r"(?P<v>\d+", 10)];
    assert!(Cascade::compile("amount", &specs).is_err());
}

#[test]
fn test_item_set_drops_duplicates() {
    let mut set = ItemSet::new(10);
    assert!(set.insert(LineItem::priced("Amul Butter", 1, 50.0, ItemSource::Body)));
    assert!(!set.insert(LineItem::priced("  amul   BUTTER ", 2, 100.0, ItemSource::Body)));
    assert!(set.insert(LineItem::priced("Bread", 1, 40.0, ItemSource::Body)));
    assert_eq!(set.len(), 2);

    let items = set.into_vec();
    assert_eq!(items[0].quantity, 1);
}

#[test]
fn test_item_set_cap() {
    let mut set = ItemSet::new(1);
    assert!(set.insert(LineItem::priced("Milk", 1, 30.0, ItemSource::Body)));
    assert!(!set.insert(LineItem::priced("Eggs", 1, 60.0, ItemSource::Body)));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_item_names() {
    assert_eq!(normalize_item_name("  Amul   Butter 500g "), "amul butter 500g");
    assert_eq!(
        clean_item_name("• Dairy Milk Silk").as_deref(),
        Some("Dairy Milk Silk")
    );
    assert!(clean_item_name("Subtotal").is_none());
    assert!(clean_item_name("GST").is_none());
    assert!(clean_item_name("12").is_none());
}

#[test]
fn test_match_item_lines() {
    let cascade = Cascade::compile("items", COMMON_ITEMS).unwrap();
    let text = "2x Amul Butter ₹100.00\nCoca Cola x 3 ₹120\nDelivery Fee - ₹30\nMasala Dosa - ₹90";

    let items = match_item_lines(&cascade, text, 50_000.0);
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();

    assert_eq!(names, ["Amul Butter", "Coca Cola", "Masala Dosa"]);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[1].quantity, 3);
    assert_eq!(items[1].price, 120.0);
    assert_eq!(items[2].quantity, 1);
}

#[test]
fn test_line_item_unit_price() {
    let item = LineItem::priced("Chicken Biryani", 2, 560.0, ItemSource::Body);
    assert_eq!(item.unit_price, 280.0);
    assert_eq!(item.total_price, 560.0);
    assert_eq!(item.key(), "chicken biryani");
}

#[test]
fn test_subject_item_name() {
    assert_eq!(
        subject_item_name("Your Amazon.in order of \"Echo Dot (5th Gen)\" has been placed")
            .as_deref(),
        Some("Echo Dot (5th Gen)")
    );
    assert!(subject_item_name("Your order has shipped").is_none());
}
