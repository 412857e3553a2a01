use serde::{Deserialize, Deserializer, Serialize};

/// OData collection envelope, `{"value": [...]}`.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum LocatorType {
    Sas,
    OnDemandOrigin,
    Other(u8),
}

impl LocatorType {
    pub fn code(self) -> u8 {
        match self {
            LocatorType::Sas => 1,
            LocatorType::OnDemandOrigin => 2,
            LocatorType::Other(code) => code,
        }
    }
}

impl From<u8> for LocatorType {
    fn from(code: u8) -> Self {
        match code {
            1 => LocatorType::Sas,
            2 => LocatorType::OnDemandOrigin,
            other => LocatorType::Other(other),
        }
    }
}

impl From<LocatorType> for u8 {
    fn from(locator_type: LocatorType) -> Self {
        locator_type.code()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Locator {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "Type", default)]
    pub locator_type: Option<LocatorType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetFile {
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub content_file_size: Option<String>,
}

impl AssetFile {
    pub fn size(&self) -> Option<u64> {
        self.content_file_size
            .as_ref()
            .and_then(|size| size.trim().parse().ok())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;

    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}
