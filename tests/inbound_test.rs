use chrono::{TimeZone, Utc};
use order_extract::{ExtractError, PlatformId, extract, parse_inbound};

#[test]
fn test_parse_multipart_order_mail() {
    let raw = b"From: Amazon.in <auto-confirm@amazon.in>\r\n\
                To: priya@example.com\r\n\
                Subject: Your Amazon.in order has been placed\r\n\
                Date: Tue, 12 Mar 2024 09:30:00 +0530\r\n\
                Message-ID: <abc123@amazon.in>\r\n\
                MIME-Version: 1.0\r\n\
                Content-Type: multipart/alternative; boundary=\"b1\"\r\n\
                \r\n\
                --b1\r\n\
                Content-Type: text/plain; charset=utf-8\r\n\
                \r\n\
                Order # 403-9876543-1234567\r\n\
                Order Total: Rs. 4,499.00\r\n\
                --b1\r\n\
                Content-Type: text/html; charset=utf-8\r\n\
                \r\n\
                <p>Order # 403-9876543-1234567</p><p>Order Total: Rs. 4,499.00</p>\r\n\
                --b1--\r\n";

    let email = parse_inbound(raw).unwrap();

    assert_eq!(email.sender_address().unwrap().domain, "amazon.in");
    assert_eq!(email.subject, "Your Amazon.in order has been placed");
    assert_eq!(email.provider_message_id, "abc123@amazon.in");
    assert_eq!(
        email.received_at,
        Utc.with_ymd_and_hms(2024, 3, 12, 4, 0, 0).unwrap()
    );
    assert!(email.text_body.as_deref().unwrap().contains("Order Total"));
    assert!(email.html_body.as_deref().unwrap().contains("<p>"));

    let draft = extract(&email).unwrap();
    assert_eq!(draft.platform, PlatformId::Amazon);
    assert_eq!(draft.order_id, "403-9876543-1234567");
    assert_eq!(draft.amount, Some(4499.0));
}

#[test]
fn test_parse_single_part_html() {
    let raw = b"From: orders@swiggy.in\r\n\
                Subject: Your order was delivered\r\n\
                Date: Thu, 01 Feb 2024 20:15:00 +0000\r\n\
                Message-ID: <sw-1@swiggy.in>\r\n\
                Content-Type: text/html; charset=utf-8\r\n\
                \r\n\
                <p>Order ID: 1234567890123</p>";

    let email = parse_inbound(raw).unwrap();

    assert!(email.text_body.is_none());
    assert!(email.html_body.as_deref().unwrap().contains("1234567890123"));
}

#[test]
fn test_parse_plain_without_content_type() {
    let raw = b"From: sender@example.com\r\n\
                Subject: Hello\r\n\
                Date: Thu, 01 Jan 2025 12:00:00 +0000\r\n\
                \r\n\
                Just saying hi.";

    let email = parse_inbound(raw).unwrap();

    assert!(email.html_body.is_none());
    assert!(email.text_body.as_deref().unwrap().contains("saying hi"));
    assert_eq!(email.provider_message_id, "");
}

#[test]
fn test_missing_from_header() {
    let raw = b"Subject: No sender\r\n\
                Date: Thu, 01 Jan 2025 12:00:00 +0000\r\n\
                \r\n\
                Body";

    assert!(matches!(
        parse_inbound(raw),
        Err(ExtractError::MissingHeader(ref h)) if h == "From"
    ));
}

#[test]
fn test_unparseable_from_header() {
    let raw = b"From: not-an-address\r\n\
                Subject: Hello\r\n\
                \r\n\
                Body";

    assert!(matches!(parse_inbound(raw), Err(ExtractError::Structure(_))));
}
