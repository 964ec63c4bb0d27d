use serde::{Deserialize, Serialize};

/// One cryptocurrency as delivered by the data loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    // ========================================================================
    // CORE FIELDS (used by the layout)
    // ========================================================================
    pub code: String,
    pub name: String,
    /// Inception year
    pub year: i32,
    pub category: String,
    pub market_cap: f64,
    pub volume_30d: f64,

    // ========================================================================
    // REFERENCE FIELDS (carried through, never laid out)
    // ========================================================================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork_of: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_to: Option<String>,
}

impl CurrencyRecord {
    pub fn new(
        code: &str,
        name: &str,
        year: i32,
        category: &str,
        market_cap: f64,
        volume_30d: f64,
    ) -> Self {
        CurrencyRecord {
            code: code.to_string(),
            name: name.to_string(),
            year,
            category: category.to_string(),
            market_cap,
            volume_30d,
            kind: None,
            fork_of: None,
            similar_to: None,
        }
    }

    /// A currency whose name is just its code ("DOGE" / "Doge") shows no name lines
    pub fn name_is_code(&self) -> bool {
        self.code == self.name.to_uppercase()
    }

    /// Name split on single spaces
    pub fn name_words(&self) -> Vec<&str> {
        self.name.split(' ').collect()
    }
}

/// A record plus its normalized scores, all in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: CurrencyRecord,
    pub cap_score: f64,
    pub vol_score: f64,
    pub overall_score: f64,
}

impl EnrichedRecord {
    pub fn code(&self) -> &str {
        &self.record.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_code() {
        let doge = CurrencyRecord::new("DOGE", "Doge", 2013, "Meme", 1.0, 1.0);
        assert!(doge.name_is_code());

        let eth = CurrencyRecord::new("ETH", "Ethereum", 2015, "Platform", 1.0, 1.0);
        assert!(!eth.name_is_code());
    }

    #[test]
    fn test_name_words() {
        let etc = CurrencyRecord::new("ETC", "Ethereum Classic", 2016, "Platform", 1.0, 1.0);
        assert_eq!(etc.name_words(), vec!["Ethereum", "Classic"]);
    }
}
