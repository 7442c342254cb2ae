// Guestbook drafts, the local wish cache, and proxy reply handling.

use cake_core::guestbook::*;
use cake_core::GuestbookError;
use rand::prelude::*;

#[test]
fn draft_trims_and_requires_both_fields() {
    let draft = WishDraft::new("  Ana ", "\nHappy birthday!  ").unwrap();
    assert_eq!(draft.name(), "Ana");
    assert_eq!(draft.message(), "Happy birthday!");

    assert!(matches!(
        WishDraft::new("   ", "hi"),
        Err(GuestbookError::MissingField)
    ));
    assert!(matches!(
        WishDraft::new("Ana", "\t"),
        Err(GuestbookError::MissingField)
    ));
}

#[test]
fn draft_form_fields_name_the_form() {
    let draft = WishDraft::new("Bo", "Cheers").unwrap();
    assert_eq!(
        draft.form_fields(),
        [("form-name", "wishes"), ("name", "Bo"), ("message", "Cheers")]
    );
}

#[test]
fn empty_storage_is_an_empty_cache() {
    assert!(WishCache::decode(None).unwrap().is_empty());
    assert!(WishCache::decode(Some("  ")).unwrap().is_empty());
    assert!(WishCache::decode(Some("[]")).unwrap().is_empty());
}

#[test]
fn legacy_string_entries_read_as_anonymous_wishes() {
    let cache = WishCache::decode(Some(
        r#"["old message", {"name":"Cy","message":"new","timestamp":"2024-05-01T10:00:00.000Z"}]"#,
    ))
    .unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.wishes()[0].message, "old message");
    assert_eq!(cache.wishes()[0].sender(), ANONYMOUS);
    assert_eq!(cache.wishes()[1].sender(), "Cy");
}

#[test]
fn corrupt_cache_is_reported() {
    assert!(matches!(
        WishCache::decode(Some("{not json")),
        Err(GuestbookError::Cache(_))
    ));
}

#[test]
fn commit_appends_and_persists() {
    let mut cache = WishCache::default();
    let draft = WishDraft::new("Dee", "Many happy returns").unwrap();
    let wish = cache
        .commit(draft, "2024-06-01T12:00:00.000Z".to_string())
        .clone();
    assert_eq!(wish.name, "Dee");
    assert_eq!(cache.len(), 1);

    let json = cache.encode().unwrap();
    let reloaded = WishCache::decode(Some(&json)).unwrap();
    assert_eq!(reloaded, cache);
}

#[test]
fn rejected_submission_leaves_cache_untouched() {
    let stored = r#"[{"name":"Eve","message":"Cheers","timestamp":"2024-05-01T10:00:00.000Z"}]"#;
    let mut cache = WishCache::decode(Some(stored)).unwrap();
    let before = cache.encode().unwrap();

    for status in [0, 302, 404, 500, 503] {
        let draft = WishDraft::new("Fay", "See you soon").unwrap();
        assert!(matches!(
            cache.settle(draft, status, "2024-06-02T09:00:00.000Z".to_string()),
            Err(GuestbookError::Status(s)) if s == status
        ));
    }
    assert_eq!(cache.encode().unwrap(), before);
    assert_eq!(cache.len(), 1);
}

#[test]
fn accepted_submission_appends_one_wish() {
    let mut cache = WishCache::default();
    let draft = WishDraft::new(" Gus ", "Happy birthday!").unwrap();
    let wish = cache
        .settle(draft, 200, "2024-06-02T09:00:00.000Z".to_string())
        .unwrap()
        .clone();
    assert_eq!(wish.name, "Gus");
    assert_eq!(wish.timestamp, "2024-06-02T09:00:00.000Z");
    assert_eq!(cache.len(), 1);

    let draft = WishDraft::new("Hal", "Another year").unwrap();
    cache
        .settle(draft, 204, "2024-06-02T09:05:00.000Z".to_string())
        .unwrap();
    let reloaded = WishCache::decode(Some(&cache.encode().unwrap())).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.wishes()[1].name, "Hal");
}

#[test]
fn proxy_reply_is_sorted_newest_first() {
    let body = r#"[
        {"name":"A","message":"first","timestamp":"2024-01-01T00:00:00.000Z"},
        {"name":"B","message":"third","timestamp":"2024-03-01T00:00:00.000Z"},
        {"name":"C","message":"second","timestamp":"2024-02-01T00:00:00.000Z"}
    ]"#;
    let wishes = parse_proxy_reply(200, body).unwrap();
    let order: Vec<&str> = wishes.iter().map(|w| w.message.as_str()).collect();
    assert_eq!(order, ["third", "second", "first"]);
}

#[test]
fn proxy_error_payload_is_surfaced() {
    match parse_proxy_reply(500, r#"{"error":"Missing environment variables"}"#) {
        Err(GuestbookError::Upstream(msg)) => assert_eq!(msg, "Missing environment variables"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn proxy_failure_without_payload_reports_status() {
    assert!(matches!(
        parse_proxy_reply(502, "Bad Gateway"),
        Err(GuestbookError::Status(502))
    ));
    assert!(matches!(
        parse_proxy_reply(200, "<html>"),
        Err(GuestbookError::Reply(_))
    ));
}

#[test]
fn bubble_style_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..100 {
        let style = BubbleStyle::pick(&mut rng);
        assert!(BUBBLE_PALETTES.contains(&style.palette));
        assert!(style.rotation_deg >= -3.0 && style.rotation_deg < 3.0);
    }
}
