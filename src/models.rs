use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A short link created from this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl ShortLink {
    pub fn new(code: impl Into<String>, target: impl Into<String>, created_at: i64) -> Self {
        Self {
            code: code.into(),
            target: target.into(),
            created_at,
        }
    }
}

// ── Create call ────────────────────────────────────────────────────────────

/// Body of the remote `create` call. `short_link` is left out entirely when
/// no custom alias was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRequest {
    pub target_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_link: Option<String>,
}

/// Reply of the remote `create` call. `status == 0` is success.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateResponse {
    #[serde(deserialize_with = "de_int")]
    pub status: i64,
    #[serde(default)]
    pub short_link: Option<String>,
    #[serde(default)]
    pub target_link: Option<String>,
    #[serde(default, deserialize_with = "de_opt_int")]
    pub created_date: Option<i64>,
    #[serde(default, deserialize_with = "de_messages")]
    pub msg: Option<String>,
}

impl CreateResponse {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

// ── Stats tables ───────────────────────────────────────────────────────────

/// One of the three statistics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Creation,
    Use,
    LinkSpace,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Creation, Dataset::Use, Dataset::LinkSpace];

    pub fn path(self) -> &'static str {
        match self {
            Dataset::Creation => "/data/creation",
            Dataset::Use => "/data/use",
            Dataset::LinkSpace => "/data/linkspace",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Creation => "creation",
            Dataset::Use => "use",
            Dataset::LinkSpace => "linkspace",
        }
    }
}

/// Raw `{ "data": [[...], ...] }` payload. The backend answers `{}` when it
/// has nothing, which decodes as an empty table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DataTable {
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl DataTable {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ── Lenient decoding helpers ───────────────────────────────────────────────

/// Read a JSON cell as an integer: either a number or a string holding one.
pub fn cell_as_i64(cell: &Value) -> Option<i64> {
    match cell {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Same as [`cell_as_i64`] but rejects negative values.
pub fn cell_as_u64(cell: &Value) -> Option<u64> {
    cell_as_i64(cell).and_then(|n| u64::try_from(n).ok())
}

fn de_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    cell_as_i64(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {value}")))
}

fn de_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    cell_as_i64(&value)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {value}")))
}

/// `msg` is a repeated field on the backend: accept one string or a list.
fn de_messages<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Messages {
        One(String),
        Many(Vec<String>),
    }

    let messages = Option::<Messages>::deserialize(deserializer)?;
    Ok(messages
        .map(|m| match m {
            Messages::One(s) => s,
            Messages::Many(list) => list.join("; "),
        })
        .filter(|s| !s.is_empty()))
}
