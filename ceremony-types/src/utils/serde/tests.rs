use super::*;

#[derive(Deserialize)]
struct Timeout {
    #[serde(default, deserialize_with = "maybe_stringified")]
    timeout: Option<u32>,
}

fn timeout(json: &str) -> Option<u32> {
    serde_json::from_str::<Timeout>(json)
        .expect("failed to deserialize")
        .timeout
}

#[test]
fn timeouts_from_numbers_and_strings() {
    assert_eq!(timeout(r#"{"timeout": 60000}"#), Some(60000));
    assert_eq!(timeout(r#"{"timeout": 1800.75}"#), Some(1800));
    assert_eq!(timeout(r#"{"timeout": "9000"}"#), Some(9000));
    assert_eq!(timeout(r#"{"timeout": " 9000.0 "}"#), Some(9000));
}

#[test]
fn unusable_timeouts_are_absent() {
    assert_eq!(timeout(r#"{}"#), None);
    assert_eq!(timeout(r#"{"timeout": null}"#), None);
    assert_eq!(timeout(r#"{"timeout": -1}"#), None);
    assert_eq!(timeout(r#"{"timeout": "soon"}"#), None);
    assert_eq!(timeout(r#"{"timeout": 1.0e300}"#), None);
    assert_eq!(timeout(r#"{"timeout": {"ms": 5}}"#), None);
}

#[test]
fn unusable_timeouts_report_why() {
    assert_eq!(
        timeout_millis(&StringOrNum::Str("abc".into())),
        Err("not a number")
    );
    assert!(timeout_millis(&StringOrNum::Num(-5.0)).is_err());
    assert!(timeout_millis(&StringOrNum::Num(5_000_000_000.0)).is_err());
    assert!(timeout_millis(&StringOrNum::Str("1e10".into())).is_err());
    assert_eq!(timeout_millis(&StringOrNum::Str("250.9".into())), Ok(250));
}

#[test]
fn non_scalar_timeouts_are_absent() {
    assert_eq!(timeout(r#"{"timeout": true}"#), None);
    assert_eq!(timeout(r#"{"timeout": [1000]}"#), None);
    assert_eq!(timeout(r#"{"timeout": 4294967296}"#), None);
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Fruit {
    Apple,
    Pear,
}

#[derive(Deserialize)]
struct Basket {
    #[serde(deserialize_with = "ignore_unknown_vec")]
    fruit: Vec<Fruit>,
    #[serde(default, deserialize_with = "ignore_unknown_opt_vec")]
    extra: Option<Vec<Fruit>>,
}

#[test]
fn unknown_list_entries_are_dropped() {
    let basket: Basket =
        serde_json::from_str(r#"{"fruit": ["apple", "durian", 3, "pear"], "extra": ["kiwi"]}"#)
            .expect("failed to deserialize");
    assert_eq!(basket.fruit, vec![Fruit::Apple, Fruit::Pear]);
    assert_eq!(basket.extra, Some(vec![]));

    let basket: Basket = serde_json::from_str(r#"{"fruit": [], "extra": null}"#)
        .expect("failed to deserialize");
    assert!(basket.fruit.is_empty());
    assert_eq!(basket.extra, None);
}
