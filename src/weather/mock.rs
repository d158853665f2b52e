//! Built-in weather provider backed by a fixed dataset

use crate::types::Result;
use crate::weather::{ReportProvider, WeatherReport};

/// Fixed forecasts as `(city, date, weather, temperature)`.
///
/// Scanned in order; the first entry whose city contains the query city and
/// whose date equals the query date wins.
const FORECASTS: &[(&str, &str, &str, &str)] = &[
    ("taipei", "today", "Sunny", "26°C"),
    ("taipei", "tomorrow", "Cloudy", "24°C"),
    ("平鎮區, 桃園市, 台灣", "today", "Rainy", "20°C"),
    ("平鎮區, 桃園市, 台灣", "tomorrow", "Sunny", "22°C"),
    ("grand canyon, usa", "today", "Hot", "35°C"),
    ("grand canyon, usa", "2025-05-06", "Clear", "33°C"),
];

/// Provider answering from a small built-in dataset.
pub struct MockProvider {
    city: String,
    date: String,
}

impl MockProvider {
    pub fn new(city: &str, date: &str) -> Self {
        Self {
            city: city.to_string(),
            date: date.to_string(),
        }
    }

    fn lookup(&self) -> Option<(&'static str, &'static str)> {
        let key_city = self.city.trim().to_lowercase();
        let key_date = self.date.trim().to_lowercase();

        FORECASTS
            .iter()
            .find(|(city, date, _, _)| {
                city.to_lowercase().contains(&key_city) && key_date == date.to_lowercase()
            })
            .map(|&(_, _, weather, temperature)| (weather, temperature))
    }
}

impl ReportProvider for MockProvider {
    fn fetch(&self) -> Result<WeatherReport> {
        let report = match self.lookup() {
            Some((weather, temperature)) => WeatherReport {
                city: self.city.clone(),
                date: self.date.clone(),
                weather: weather.to_string(),
                temperature: temperature.to_string(),
            },
            None => WeatherReport::unknown(&self.city, &self.date),
        };

        tracing::debug!(
            "MockProvider: {}, {}, {}, {}",
            report.city,
            report.date,
            report.weather,
            report.temperature
        );

        Ok(report)
    }
}
