use serde::{Deserialize, Deserializer};

// select inputs post their value as a string, so "3" and 3 are both accepted.
// An empty string is kept apart from a number so validation can reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawNumber")]
pub enum FormNumber {
    Empty,
    Value(i64),
}

impl FormNumber {
    pub fn value(self) -> Option<i64> {
        match self {
            FormNumber::Empty => None,
            FormNumber::Value(v) => Some(v),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Text(String),
}

impl TryFrom<RawNumber> for FormNumber {
    type Error = String;

    fn try_from(value: RawNumber) -> Result<Self, Self::Error> {
        match value {
            RawNumber::Int(v) => Ok(FormNumber::Value(v)),
            RawNumber::Text(text) if text.is_empty() => Ok(FormNumber::Empty),
            RawNumber::Text(text) => match text.trim().parse::<i64>() {
                Ok(v) => Ok(FormNumber::Value(v)),
                Err(_) => Err(format!("Wrong value {text}, can not parse to i64")),
            },
        }
    }
}

/// Page numbers are 1-based. A missing or non-numeric value means the first
/// page; anything below 1 maps to `0`, which paginates to nothing.
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    let page = match value.and_then(|v| v.trim().parse::<i64>().ok()) {
        None => 1,
        Some(page) if page < 1 => 0,
        Some(page) => usize::try_from(page).unwrap_or(usize::MAX),
    };
    Ok(page)
}

pub fn first_page() -> usize {
    1
}

/// Pair with `#[serde(default)]` on an `Option<Option<T>>` field: an absent
/// key stays `None`, an explicit `null` becomes `Some(None)`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
