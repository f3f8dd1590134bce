//! Domain Models
//!
//! Request/response shapes for the Yang tools. Third-party payloads are
//! decoded only as far as the tools need them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// App-level metadata published to the host
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppMetadata {
    /// User-facing name
    pub fullname: String,

    /// User-facing description
    pub description: String,

    /// Internal app name
    pub name: String,

    /// Goal presented to the agentic model
    pub goal: String,

    /// 512x512 PNG icon
    pub icon_url: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            fullname: "His Name Is Yang".into(),
            description: "That's my quant!".into(),
            name: "yang".into(),
            goal: "Research, formulate, and execute quantitative strategies for trading cryptocurrencies.".into(),
            icon_url: "https://raw.githubusercontent.com/deepshard/trufflesdk/refs/heads/main/assets/icon.png".into(),
        }
    }
}

// ============================================================================
// Inference outputs
// ============================================================================

/// Stance recommended to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
}

impl Sentiment {
    /// The opposite of a model-assigned label. Only an exact "Bullish" flips
    /// to Bearish; every other label (Neutral, lowercase, unknown) is Bullish.
    pub fn contrarian_to(label: &str) -> Sentiment {
        if label == "Bullish" {
            Sentiment::Bearish
        } else {
            Sentiment::Bullish
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "Bullish"),
            Sentiment::Bearish => write!(f, "Bearish"),
        }
    }
}

/// `{sentiment, confidence}` returned by the sentiment prompt.
///
/// Both fields are taken as the model wrote them; only a missing key fails.
#[derive(Clone, Debug, Deserialize)]
pub struct SentimentReading {
    pub sentiment: String,

    /// Usually 0-100, echoed verbatim
    pub confidence: serde_json::Value,
}

impl SentimentReading {
    pub fn inverted(&self) -> Sentiment {
        Sentiment::contrarian_to(&self.sentiment)
    }
}

/// `{strategy}` returned by the strategy prompt
#[derive(Clone, Debug, Deserialize)]
pub struct StrategyReading {
    pub strategy: String,
}

// ============================================================================
// Positions
// ============================================================================

/// Direction of a position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Exact, lowercase match only
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "long" => Some(PositionSide::Long),
            "short" => Some(PositionSide::Short),
            _ => None,
        }
    }
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionSide::Long => write!(f, "long"),
            PositionSide::Short => write!(f, "short"),
        }
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Inferred column type, named the way dataframe libraries name them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    Object,
}

/// Column name -> inferred type, in file order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnTypes(Vec<(String, ColumnType)>);

impl ColumnTypes {
    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.0.iter().find(|(name, _)| name == column).map(|(_, ty)| *ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.0.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ColumnType)> for ColumnTypes {
    fn from_iter<I: IntoIterator<Item = (String, ColumnType)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ColumnTypes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, ty) in &self.0 {
            map.serialize_entry(name, ty)?;
        }
        map.end()
    }
}

/// Metadata about a CSV file
#[derive(Clone, Debug, Serialize)]
pub struct CsvSummary {
    pub path: String,

    /// Column names in file order
    pub columns: Vec<String>,

    /// (rows, columns), header excluded
    pub shape: (usize, usize),

    pub dtypes: ColumnTypes,
}

// ============================================================================
// Market data
// ============================================================================

/// Entry of the full coin listing
#[derive(Clone, Debug, Deserialize)]
pub struct CoinListing {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    pub name: String,
}

/// USD quote for a coin
#[derive(Clone, Debug, Deserialize)]
pub struct UsdQuote {
    pub usd: Decimal,
}

/// Average whale transaction amount
#[derive(Clone, Debug, Deserialize)]
pub struct WhaleAverage {
    pub avg_amount: AmountValue,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AmountValue {
    /// Denominated in ETH
    pub value: serde_json::Value,
}

/// A large on-chain transfer
#[derive(Clone, Debug, Deserialize)]
pub struct WhaleTransaction {
    pub from_owner: serde_json::Value,
    pub to_owner: serde_json::Value,
    pub format_amount: serde_json::Value,
    pub amount_usd: serde_json::Value,
}

/// Page of recent whale transactions
#[derive(Clone, Debug, Deserialize)]
pub struct WhaleTransactionPage {
    pub data: Vec<WhaleTransaction>,
}

/// Render an opaque JSON scalar the way a person would write it
/// (strings without quotes, null as "None").
pub fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "None".into(),
        other => other.to_string(),
    }
}
