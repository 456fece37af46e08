use crate::i18n::bundle::with_bundle;
use crate::i18n::format::localize_digits;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn plural_category(count: f64) -> &'static str {
    if count.abs() < f64::EPSILON {
        "zero"
    } else if (count - 1.0).abs() < f64::EPSILON {
        "one"
    } else {
        "other"
    }
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let category = args
                .and_then(|m| m.get("count"))
                .and_then(|count| count.parse::<f64>().ok())
                .map(plural_category);
            category
                .and_then(|c| map.get(c))
                .or_else(|| map.get("_"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_value(v, args)))
    })
}

/// Translate a key to the current language, falling back to English, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key, replacing `{name}` placeholders from `args`.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Translate a pluralised key; the count is rendered in the locale's digits.
#[must_use]
pub fn tr_count(key: &str, count: usize) -> String {
    let count = count.to_string();
    let args = BTreeMap::from([("count", count.as_str())]);
    localize_digits(&tr(key, Some(&args)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_selection_defaults() {
        let value = serde_json::json!({ "one": "one course", "other": "{count} courses" });
        let mut args = BTreeMap::new();
        args.insert("count", "1");
        assert_eq!(render_value(&value, Some(&args)).unwrap(), "one course");
        args.insert("count", "3");
        assert_eq!(render_value(&value, Some(&args)).unwrap(), "3 courses");
        assert!(render_value(&value, None).is_none());
    }

    #[test]
    fn interpolation_replaces_every_placeholder() {
        let value = Value::String("{language} - {level} ({language})".into());
        let args = BTreeMap::from([("language", "German"), ("level", "B1")]);
        assert_eq!(
            render_value(&value, Some(&args)).unwrap(),
            "German - B1 (German)"
        );
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        crate::i18n::set_lang("fa");
        assert_eq!(t("no.such.key"), "no.such.key");
        assert_eq!(t("modal.close"), "بستن");
        assert_eq!(tr_count("catalog.course_count", 12), "۱۲ دوره");
    }
}
