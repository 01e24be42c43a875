//! Raw form input and the best-effort parsing the handlers apply to it.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::ParseEnumError;
use crate::notify::Notification;
use crate::utils::dates::parse_form_date;

use super::{HandlerContext, NumericInput, ServiceError, ServiceResult};

/// Field names understood by the handlers.
pub mod fields {
    pub const NAME: &str = "name";
    pub const VARIETY: &str = "variety";
    pub const PLANTED_DATE: &str = "planted_date";
    pub const EXPECTED_HARVEST_DATE: &str = "expected_harvest_date";
    pub const AREA: &str = "area";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const CROP_ID: &str = "crop_id";
    pub const PRIORITY: &str = "priority";
    pub const SCHEDULED_DATE: &str = "scheduled_date";
    pub const AMOUNT: &str = "amount";
    pub const CATEGORY: &str = "category";
    pub const DATE: &str = "date";
}

/// Field name to raw string value, as submitted by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// The trimmed value of `key`. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub(crate) fn required(&self, key: &'static str) -> ServiceResult<String> {
        self.get(key)
            .map(str::to_string)
            .ok_or(ServiceError::MissingField(key))
    }

    pub(crate) fn date_or(&self, key: &str, default: NaiveDate) -> NaiveDate {
        self.get(key).and_then(parse_form_date).unwrap_or(default)
    }

    pub(crate) fn choice<T>(&self, key: &'static str) -> ServiceResult<Option<T>>
    where
        T: FromStr<Err = ParseEnumError>,
    {
        self.get(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|err| ServiceError::InvalidField {
                    field: key,
                    reason: err.to_string(),
                })
            })
            .transpose()
    }

    /// Reads a non-negative quantity. Absent values are 0. Anything that is
    /// not a finite, non-negative number is coerced to 0 with a warning, or
    /// rejected, depending on the entry policy.
    pub(crate) fn quantity(
        &self,
        key: &'static str,
        ctx: &mut HandlerContext<'_>,
    ) -> ServiceResult<f64> {
        let Some(raw) = self.get(key) else {
            return Ok(0.0);
        };
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => match ctx.policy.numeric_input {
                NumericInput::Reject => Err(ServiceError::InvalidField {
                    field: key,
                    reason: format!("`{raw}` is not a non-negative number"),
                }),
                NumericInput::Coerce => {
                    warn!(field = key, value = raw, "coercing unusable number to 0");
                    ctx.notify(Notification::warning(format!(
                        "`{raw}` is not a valid {key}; recorded as 0."
                    )));
                    Ok(0.0)
                }
            },
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormFields::new();
        for (key, value) in iter {
            form.insert(key, value);
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskPriority;
    use crate::notify::{NotificationLog, Severity};
    use crate::services::EntryPolicy;
    use crate::utils::dates::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn blank_values_are_absent() {
        let form = FormFields::new().with("name", "   ").with("variety", " Roma ");
        assert_eq!(form.get("name"), None);
        assert_eq!(form.get("variety"), Some("Roma"));
        assert!(matches!(
            form.required("name"),
            Err(ServiceError::MissingField("name"))
        ));
    }

    #[test]
    fn quantity_coerces_and_warns() {
        let clock = clock();
        let mut log = NotificationLog::new();
        let policy = EntryPolicy::default();
        let mut ctx = HandlerContext::new(&clock, &mut log, &policy);
        let form = FormFields::new().with("area", "lots").with("amount", "-3");

        assert_eq!(form.quantity("area", &mut ctx).unwrap(), 0.0);
        assert_eq!(form.quantity("amount", &mut ctx).unwrap(), 0.0);
        assert_eq!(form.quantity("missing", &mut ctx).unwrap(), 0.0);
        assert_eq!(log.entries().len(), 2);
        assert!(log.entries().iter().all(|n| n.severity == Severity::Warning));
    }

    #[test]
    fn quantity_rejects_under_strict_policy() {
        let clock = clock();
        let mut log = NotificationLog::new();
        let policy = EntryPolicy {
            numeric_input: NumericInput::Reject,
            ..EntryPolicy::default()
        };
        let mut ctx = HandlerContext::new(&clock, &mut log, &policy);
        let form = FormFields::new().with("amount", "12,50");

        let err = form.quantity("amount", &mut ctx).unwrap_err();
        assert!(err.to_string().contains("12,50"));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn choice_parses_or_reports_field() {
        let form = FormFields::new().with("priority", "HIGH").with("category", "Snacks");
        assert_eq!(
            form.choice::<TaskPriority>("priority").unwrap(),
            Some(TaskPriority::High)
        );
        assert!(form.choice::<TaskPriority>("absent").unwrap().is_none());
        assert!(matches!(
            form.choice::<crate::domain::ExpenseCategory>("category"),
            Err(ServiceError::InvalidField {
                field: "category",
                ..
            })
        ));
    }
}
