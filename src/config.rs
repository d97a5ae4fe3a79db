use std::fs;
use std::time::Duration;

const DEFAULT_TRAVEL_INTERVAL_MS: u64 = 5000;
const DEFAULT_FLOOR_INTERVAL_MS: u64 = 10000;

/// Controller settings. `floors` is the ordered label sequence, bottom to
/// top; the car starts at `initial_position`. The dwell at a stop lasts
/// `floor_interval`, optionally split into a leading door-open sub-interval.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub floors: Vec<String>,
    pub initial_position: usize,
    pub travel_interval: Duration,
    pub floor_interval: Duration,
    pub door_interval: Option<Duration>,
}

impl ControllerConfig {
    pub fn new(floors: Vec<String>) -> Self {
        ControllerConfig {
            floors,
            initial_position: 0,
            travel_interval: Duration::from_millis(DEFAULT_TRAVEL_INTERVAL_MS),
            floor_interval: Duration::from_millis(DEFAULT_FLOOR_INTERVAL_MS),
            door_interval: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floors.is_empty() {
            return Err(ConfigError::NoFloors);
        }
        if self.initial_position >= self.floors.len() {
            return Err(ConfigError::InitialPositionOutOfRange {
                position: self.initial_position,
                num_floors: self.floors.len(),
            });
        }
        if let Some(door) = self.door_interval {
            if door > self.floor_interval {
                return Err(ConfigError::DoorIntervalTooLong);
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("floor list is empty")]
    NoFloors,
    #[error("initial position {position} is outside the {num_floors} configured floors")]
    InitialPositionOutOfRange { position: usize, num_floors: usize },
    #[error("door interval exceeds the floor interval")]
    DoorIntervalTooLong,
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
struct ConfigFile {
    floors: Vec<String>,
    initial_position: Option<usize>,
    travel_interval_ms: Option<u64>,
    floor_interval_ms: Option<u64>,
    door_interval_ms: Option<u64>,
}

/// Reads controller settings from a JSON file.
pub fn load_file(path: &str) -> Result<ControllerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let file: ConfigFile = serde_json::from_str(&contents)?;

    let mut config = ControllerConfig::new(file.floors);
    if let Some(position) = file.initial_position {
        config.initial_position = position;
    }
    if let Some(ms) = file.travel_interval_ms {
        config.travel_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = file.floor_interval_ms {
        config.floor_interval = Duration::from_millis(ms);
    }
    config.door_interval = file.door_interval_ms.map(Duration::from_millis);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_match_the_documented_intervals() {
        let config = ControllerConfig::new(labels(&["1", "2"]));
        assert_eq!(config.travel_interval, Duration::from_millis(5000));
        assert_eq!(config.floor_interval, Duration::from_millis(10000));
        assert_eq!(config.initial_position, 0);
        assert!(config.door_interval.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_floor_list() {
        let config = ControllerConfig::new(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::NoFloors)));
    }

    #[test]
    fn rejects_initial_position_outside_the_shaft() {
        let mut config = ControllerConfig::new(labels(&["1", "2"]));
        config.initial_position = 2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InitialPositionOutOfRange { position: 2, num_floors: 2 })
        ));
    }

    #[test]
    fn rejects_door_interval_longer_than_the_dwell() {
        let mut config = ControllerConfig::new(labels(&["1", "2"]));
        config.floor_interval = Duration::from_millis(100);
        config.door_interval = Some(Duration::from_millis(200));
        assert!(matches!(config.validate(), Err(ConfigError::DoorIntervalTooLong)));
    }
}
