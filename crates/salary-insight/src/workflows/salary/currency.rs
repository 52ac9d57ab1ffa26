use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Currency a USD estimate is converted into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub rate: f64,
}

impl Currency {
    pub fn new(code: &str, rate: f64) -> Self {
        Self {
            code: code.to_string(),
            rate,
        }
    }

    pub fn usd() -> Self {
        Self::new("USD", 1.0)
    }

    pub fn convert(&self, amount_usd: f64) -> f64 {
        amount_usd * self.rate
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("unable to open currency table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("currency table is malformed: {0}")]
    Csv(#[from] csv::Error),
    #[error("exchange rate for {country} must be a positive number (got {rate})")]
    InvalidRate { country: String, rate: f64 },
    #[error("country '{0}' is listed more than once")]
    DuplicateCountry(String),
}

#[derive(Debug, Deserialize)]
struct CurrencyRecord {
    country: String,
    currency_code: String,
    rate: f64,
}

/// Fixed country to currency lookup; unlisted countries fall back to USD.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTable {
    entries: HashMap<String, Currency>,
}

impl CurrencyTable {
    pub fn standard() -> Self {
        let entries = [
            ("United States of America", "USD", 1.0),
            ("India", "INR", 83.0),
            ("Germany", "EUR", 0.91),
            ("Canada", "CAD", 1.37),
            (
                "United Kingdom of Great Britain and Northern Ireland",
                "GBP",
                0.78,
            ),
            ("Australia", "AUD", 1.48),
            ("Brazil", "BRL", 5.45),
            ("Nigeria", "NGN", 1540.0),
            ("France", "EUR", 0.91),
            ("Japan", "JPY", 157.0),
            ("South Africa", "ZAR", 18.4),
            ("Mexico", "MXN", 17.2),
            ("Turkey", "TRY", 33.5),
            ("China", "CNY", 7.3),
        ]
        .into_iter()
        .map(|(country, code, rate)| (country.to_string(), Currency::new(code, rate)))
        .collect();

        Self { entries }
    }

    /// Parse a `country,currency_code,rate` CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CurrencyError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for record in csv_reader.deserialize::<CurrencyRecord>() {
            let record = record?;
            if !record.rate.is_finite() || record.rate <= 0.0 {
                return Err(CurrencyError::InvalidRate {
                    country: record.country,
                    rate: record.rate,
                });
            }
            let currency = Currency::new(&record.currency_code, record.rate);
            if entries.insert(record.country.clone(), currency).is_some() {
                return Err(CurrencyError::DuplicateCountry(record.country));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CurrencyError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CurrencyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Exact-match lookup by country name.
    pub fn lookup(&self, country: &str) -> Currency {
        self.entries
            .get(country)
            .cloned()
            .unwrap_or_else(Currency::usd)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::standard()
    }
}
