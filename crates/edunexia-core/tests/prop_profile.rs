use edunexia_core::{path_of, Profile};
use proptest::prelude::*;

#[test]
fn cached_profile_roundtrip_keeps_display_name() {
    let profile = Profile::from_cached(r#"{"id":7,"username":"an","full_name":"Tran An"}"#)
        .expect("parse");
    let cached = profile.to_cached().expect("serialize");
    let decoded = Profile::from_cached(&cached).expect("deserialize");
    assert_eq!(decoded.id, "7");
    assert_eq!(decoded.display_name(), "Tran An");
}

proptest! {
    #[test]
    fn cached_profile_parse_never_panics(raw in ".*") {
        let _ = Profile::from_cached(&raw);
    }

    #[test]
    fn display_name_is_never_empty(id in "[a-z0-9]{1,12}", name in "[ a-zA-Z]{0,12}") {
        let raw = serde_json::json!({ "id": id, "full_name": name }).to_string();
        let profile = Profile::from_cached(&raw).expect("parse");
        prop_assert!(!profile.display_name().is_empty());
    }

    #[test]
    fn path_of_drops_query(path in "/[a-z/]{0,20}", query in "[a-z=&]{0,20}") {
        let location = format!("{path}?{query}");
        prop_assert_eq!(path_of(&location), path.as_str());
    }
}
