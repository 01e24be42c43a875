use serde::{Deserialize, Serialize};

use super::common::labelled_enum;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rain,
}

labelled_enum!(WeatherCondition, "weather condition", {
    Sunny => "Sunny",
    PartlyCloudy => "Partly Cloudy",
    Cloudy => "Cloudy",
    Rain => "Rain",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub day: String,
    /// Degrees Fahrenheit.
    pub temperature: i32,
    pub condition: WeatherCondition,
}

/// Current conditions plus a short forecast. Static data; there is no
/// weather service behind it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub temperature: i32,
    /// Percent.
    pub humidity: u8,
    pub condition: WeatherCondition,
    pub forecast: Vec<DailyForecast>,
}

/// Field advice derived from the forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Rain is coming; protect sensitive crops.
    RainAlert { day: String },
    Irrigation(String),
    Planting(String),
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::RainAlert { day } => format!(
                "Rain expected {day}. Consider covering sensitive crops and adjusting watering schedules accordingly."
            ),
            Advisory::Irrigation(text) | Advisory::Planting(text) => text.clone(),
        }
    }
}

const HUMIDITY_PLANTING_RANGE: std::ops::RangeInclusive<u8> = 40..=75;
const TEMPERATURE_PLANTING_RANGE: std::ops::RangeInclusive<i32> = 55..=85;

impl WeatherReport {
    /// The report shown by the dashboard when no other source is wired in.
    pub fn sample() -> Self {
        Self {
            temperature: 72,
            humidity: 65,
            condition: WeatherCondition::PartlyCloudy,
            forecast: vec![
                DailyForecast {
                    day: "Today".into(),
                    temperature: 72,
                    condition: WeatherCondition::Sunny,
                },
                DailyForecast {
                    day: "Tomorrow".into(),
                    temperature: 75,
                    condition: WeatherCondition::Cloudy,
                },
                DailyForecast {
                    day: "Wednesday".into(),
                    temperature: 68,
                    condition: WeatherCondition::Rain,
                },
            ],
        }
    }

    pub fn first_rain_day(&self) -> Option<&DailyForecast> {
        self.forecast
            .iter()
            .find(|day| day.condition == WeatherCondition::Rain)
    }

    pub fn advisories(&self) -> Vec<Advisory> {
        let mut advice = Vec::new();
        let rain = self.first_rain_day();
        if let Some(day) = rain {
            advice.push(Advisory::RainAlert {
                day: day.day.clone(),
            });
        }

        let irrigation = match (self.condition, rain) {
            (WeatherCondition::Rain, _) => "Rain today. Skip irrigation.".to_string(),
            (_, Some(day)) => format!(
                "Good conditions for watering today. Rain expected {} may reduce irrigation needs.",
                day.day
            ),
            (_, None) => "Good conditions for watering today. No rain in the forecast.".to_string(),
        };
        advice.push(Advisory::Irrigation(irrigation));

        if TEMPERATURE_PLANTING_RANGE.contains(&self.temperature)
            && HUMIDITY_PLANTING_RANGE.contains(&self.humidity)
        {
            advice.push(Advisory::Planting(
                "Excellent conditions for outdoor planting. Temperature and humidity levels are optimal."
                    .into(),
            ));
        }
        advice
    }
}
