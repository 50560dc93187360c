pub mod raw;
pub mod record;

pub use raw::{AttachmentMap, RawRecord, RawValue};
pub use record::{CanonicalRecord, Contributors, Dates, Periodical, RefType, Titles, Urls};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_int_coercions() {
        assert_eq!(RawValue::Int(5).as_int(), Some(5));
        assert_eq!(RawValue::Real(5.9).as_int(), Some(5));
        assert_eq!(RawValue::Text(" 42 ".to_string()).as_int(), Some(42));
        assert_eq!(RawValue::Text("42.0".to_string()).as_int(), Some(42));
        assert_eq!(RawValue::Text("n/a".to_string()).as_int(), None);
        assert_eq!(RawValue::Null.as_int(), None);
    }

    #[test]
    fn raw_value_display_forms() {
        assert_eq!(RawValue::Int(2020).display().as_deref(), Some("2020"));
        assert_eq!(RawValue::Real(2020.0).display().as_deref(), Some("2020"));
        assert_eq!(RawValue::Real(1.5).display().as_deref(), Some("1.5"));
        assert_eq!(RawValue::Null.display(), None);
    }

    #[test]
    fn raw_record_blank_text_is_absent() {
        let mut row = RawRecord::new();
        row.insert("title", RawValue::Text("  ".to_string()));
        row.insert("pages", RawValue::Null);
        assert_eq!(row.text("title").as_deref(), Some("  "));
        assert_eq!(row.non_blank_text("title"), None);
        assert_eq!(row.non_blank_text("pages"), None);
        assert_eq!(row.non_blank_text("missing"), None);
    }

    #[test]
    fn canonical_record_serializes() {
        let record = CanonicalRecord::new(
            7,
            RefType {
                code: 17,
                name: "Journal Article".to_string(),
            },
        );
        let json = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(json["ref_type"]["code"], 17);
        assert_eq!(json["notes"], "");
    }
}
