use super::state::{FieldValue, FormValues};

/// Check that may look at other fields. Returns the error message on failure.
pub type FieldCheck<K> = fn(&FieldValue, &FormValues<K>) -> Option<&'static str>;

/// One validation rule attached to a registered field.
///
/// Rules are evaluated in registration order and stop at the first failure
/// for that field.
#[derive(Debug, Clone)]
pub enum Rule<K> {
    /// The field must hold non-blank text or at least one file.
    Required { message: &'static str },
    /// The field must parse as a number no smaller than `min`.
    Min { min: f64, message: &'static str },
    /// Arbitrary check, typically a cross-field comparison.
    Check(FieldCheck<K>),
}

impl<K: Copy + Ord> Rule<K> {
    pub fn required(message: &'static str) -> Self {
        Rule::Required { message }
    }

    pub fn min(min: f64, message: &'static str) -> Self {
        Rule::Min { min, message }
    }

    /// Evaluate this rule against `value`, with the whole form for context.
    pub fn check(&self, value: &FieldValue, values: &FormValues<K>) -> Result<(), &'static str> {
        match self {
            Rule::Required { message } => {
                if value.is_blank() {
                    Err(*message)
                } else {
                    Ok(())
                }
            }
            // An empty value is the Required rule's concern.
            Rule::Min { min, message } => match value {
                FieldValue::Text(text) if text.trim().is_empty() => Ok(()),
                _ => match value.as_number() {
                    Some(n) if n >= *min => Ok(()),
                    _ => Err(*message),
                },
            },
            Rule::Check(check) => match check(value, values) {
                Some(message) => Err(message),
                None => Ok(()),
            },
        }
    }
}

/// Run `rules` in order, returning the first failure.
pub fn first_failure<K: Copy + Ord>(
    rules: &[Rule<K>],
    value: &FieldValue,
    values: &FormValues<K>,
) -> Option<&'static str> {
    rules.iter().find_map(|rule| rule.check(value, values).err())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::state::SelectedFile;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Field {
        High,
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn not_above_high(value: &FieldValue, values: &FormValues<Field>) -> Option<&'static str> {
        let high = values.number(Field::High)?;
        match value.as_number() {
            Some(low) if low <= high => None,
            _ => Some("too high"),
        }
    }

    #[test]
    fn required_rejects_blank_text_and_empty_selection() {
        let values = FormValues::<Field>::default();
        let rule = Rule::required("needed");
        assert_eq!(rule.check(&text(""), &values), Err("needed"));
        assert_eq!(rule.check(&text("   "), &values), Err("needed"));
        assert_eq!(rule.check(&FieldValue::Files(vec![]), &values), Err("needed"));
        assert_eq!(rule.check(&text("0"), &values), Ok(()));

        let file = SelectedFile {
            name: "cabin.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![1],
        };
        assert_eq!(rule.check(&FieldValue::Files(vec![file]), &values), Ok(()));
    }

    #[test]
    fn min_compares_numerically() {
        let values = FormValues::<Field>::default();
        let rule = Rule::min(1.0, "at least 1");
        assert_eq!(rule.check(&text("0"), &values), Err("at least 1"));
        assert_eq!(rule.check(&text("-3"), &values), Err("at least 1"));
        assert_eq!(rule.check(&text("1"), &values), Ok(()));
        assert_eq!(rule.check(&text(" 12.5 "), &values), Ok(()));
    }

    #[test]
    fn min_rejects_non_numeric_but_leaves_blank_to_required() {
        let values = FormValues::<Field>::default();
        let rule = Rule::min(1.0, "at least 1");
        assert_eq!(rule.check(&text("ten"), &values), Err("at least 1"));
        assert_eq!(rule.check(&text(""), &values), Ok(()));
    }

    #[test]
    fn first_failure_short_circuits() {
        let values = FormValues::<Field>::default();
        let rules = vec![Rule::required("needed"), Rule::min(1.0, "at least 1")];
        assert_eq!(first_failure(&rules, &text(""), &values), Some("needed"));
        assert_eq!(first_failure(&rules, &text("0"), &values), Some("at least 1"));
        assert_eq!(first_failure(&rules, &text("4"), &values), None);
    }

    #[test]
    fn check_rules_see_other_fields() {
        let values = FormValues::from_iter([(Field::High, text("100"))]);
        let rule = Rule::Check(not_above_high);
        assert_eq!(rule.check(&text("100"), &values), Ok(()));
        assert_eq!(rule.check(&text("101"), &values), Err("too high"));
    }
}
