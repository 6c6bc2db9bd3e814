//! Request input validation
//!
//! Rules are declared per field as pipe-separated strings in the familiar
//! `"required|integer|min:1"` form and checked against flat string input
//! such as a decoded query string.

use crate::pipe::{FieldErrors, Pipe, PipeError, PipeResult, ValidationErrors};
use async_trait::async_trait;
use std::collections::HashMap;

/// A single validation rule
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    Integer,
    Numeric,
    Boolean,
    Min(f64),
    Max(f64),
    In(Vec<String>),
}

impl Rule {
    fn parse(field: &str, raw: &str) -> PipeResult<Self> {
        let invalid = || PipeError::InvalidRule {
            field: field.to_string(),
            rule: raw.to_string(),
        };

        let (name, arg) = match raw.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (raw.trim(), None),
        };

        match (name, arg) {
            ("required", None) => Ok(Rule::Required),
            ("integer", None) => Ok(Rule::Integer),
            ("numeric", None) => Ok(Rule::Numeric),
            ("boolean", None) => Ok(Rule::Boolean),
            ("min", Some(n)) => n.parse().map(Rule::Min).map_err(|_| invalid()),
            ("max", Some(n)) => n.parse().map(Rule::Max).map_err(|_| invalid()),
            ("in", Some(list)) => Ok(Rule::In(
                list.split(',').map(|v| v.trim().to_string()).collect(),
            )),
            _ => Err(invalid()),
        }
    }

    /// Returns the failure message, if any. `numeric` switches size rules
    /// from character counts to numeric comparison.
    fn check(&self, label: &str, value: &str, numeric: bool) -> Option<String> {
        match self {
            Rule::Required => None,
            Rule::Integer => value
                .parse::<i64>()
                .is_err()
                .then(|| format!("The {label} field must be an integer.")),
            Rule::Numeric => value
                .parse::<f64>()
                .is_err()
                .then(|| format!("The {label} field must be a number.")),
            Rule::Boolean => (!matches!(value, "true" | "false" | "1" | "0"))
                .then(|| format!("The {label} field must be true or false.")),
            Rule::Min(limit) => {
                if numeric {
                    let n = value.parse::<f64>().ok()?;
                    (n < *limit).then(|| format!("The {label} field must be at least {limit}."))
                } else {
                    ((value.chars().count() as f64) < *limit).then(|| {
                        format!("The {label} field must be at least {limit} characters.")
                    })
                }
            }
            Rule::Max(limit) => {
                if numeric {
                    let n = value.parse::<f64>().ok()?;
                    (n > *limit)
                        .then(|| format!("The {label} field must not be greater than {limit}."))
                } else {
                    ((value.chars().count() as f64) > *limit).then(|| {
                        format!("The {label} field must not be greater than {limit} characters.")
                    })
                }
            }
            Rule::In(allowed) => (!allowed.iter().any(|a| a == value))
                .then(|| format!("The selected {label} is invalid.")),
        }
    }
}

/// Rule set for a whole request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rules {
    fields: Vec<(String, Vec<Rule>)>,
}

impl Rules {
    /// Parse `(field, "rule|rule:arg")` pairs
    ///
    /// # Example
    /// ```
    /// use primeskills_web::pipe::Rules;
    ///
    /// let rules = Rules::parse([("str", "required"), ("page", "integer|min:1")]).unwrap();
    /// assert_eq!(rules.len(), 2);
    /// ```
    pub fn parse<I, K, V>(pairs: I) -> PipeResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut fields = Vec::new();
        for (field, raw) in pairs {
            let field: String = field.into();
            let rules = raw
                .as_ref()
                .split('|')
                .filter(|r| !r.trim().is_empty())
                .map(|r| Rule::parse(&field, r))
                .collect::<PipeResult<Vec<_>>>()?;
            fields.push((field, rules));
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate `input`, returning only the fields that have rules
    pub fn validate(
        &self,
        input: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>, ValidationErrors> {
        let mut errors = FieldErrors::new();
        let mut validated = HashMap::new();

        for (field, rules) in &self.fields {
            let label = field.replace('_', " ");
            let value = input.get(field).filter(|v| !v.trim().is_empty());

            let Some(value) = value else {
                if rules.contains(&Rule::Required) {
                    errors
                        .entry(field.clone())
                        .or_default()
                        .push(format!("The {label} field is required."));
                }
                continue;
            };

            let numeric = rules
                .iter()
                .any(|r| matches!(r, Rule::Integer | Rule::Numeric));
            let failures: Vec<String> = rules
                .iter()
                .filter_map(|rule| rule.check(&label, value, numeric))
                .collect();

            if failures.is_empty() {
                validated.insert(field.clone(), value.clone());
            } else {
                errors.insert(field.clone(), failures);
            }
        }

        if errors.is_empty() {
            Ok(validated)
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}

/// A pipe that validates flat request input against a [`Rules`] set
#[derive(Debug, Clone)]
pub struct ValidationPipe {
    rules: Rules,
}

impl ValidationPipe {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl Pipe for ValidationPipe {
    type Input = HashMap<String, String>;
    type Output = HashMap<String, String>;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output> {
        Ok(self.rules.validate(&input)?)
    }
}
