use crate::catalog::{Creature, CreatureId, FORM_ID_THRESHOLD};

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive equality, ignoring surrounding whitespace.
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// A filter field only constrains when it holds non-blank text.
pub fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// National dex number: alternate forms report their base species.
pub fn dex_number(creature: &Creature) -> CreatureId {
    match creature.form_of {
        Some(base) if creature.id >= FORM_ID_THRESHOLD => base,
        _ => creature.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn creature(value: serde_json::Value) -> Creature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn forms_report_their_base_dex_number() {
        let form = creature(json!({ "id": 10001, "name": "Mega X", "form_of": 5, "base_form": false }));
        assert_eq!(dex_number(&form), 5);

        let orphan = creature(json!({ "id": 10002, "name": "Odd" }));
        assert_eq!(dex_number(&orphan), 10002);

        // form_of below the threshold is ignored
        let low = creature(json!({ "id": 25, "name": "Pikachu", "form_of": 1 }));
        assert_eq!(dex_number(&low), 25);
    }

    #[test]
    fn blank_fields_are_inactive() {
        assert_eq!(active(&None), None);
        assert_eq!(active(&Some("   ".into())), None);
        assert_eq!(active(&Some(" fire ".into())), Some("fire"));
        assert!(contains_ci("Charizard", "ZARD"));
        assert!(eq_ci("Fire ", "fire"));
    }
}
