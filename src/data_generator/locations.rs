use crate::shared_data::{Location, RoadType};

/// The monitored Bandung roads that frequently jam.
pub fn bandung_locations() -> Vec<Location> {
    vec![
        Location::new("Jalan Pasteur", -6.9019, 107.5876, RoadType::MainRoad, 30.0),
        Location::new("Jalan Soekarno-Hatta", -6.9389, 107.6317, RoadType::MainRoad, 35.0),
        Location::new("Jalan Dago", -6.8705, 107.6142, RoadType::TouristRoad, 25.0),
        Location::new("Jalan Buah Batu", -6.9515, 107.6349, RoadType::MainRoad, 32.0),
        Location::new("Jalan Cibiru", -6.9258, 107.7105, RoadType::SuburbanRoad, 40.0),
        Location::new("Jalan Kopo", -6.9667, 107.5667, RoadType::MainRoad, 28.0),
        Location::new("Jalan Cihampelas", -6.8961, 107.5983, RoadType::TouristRoad, 22.0),
        Location::new("Jalan Sukajadi", -6.8894, 107.5944, RoadType::MainRoad, 30.0),
        Location::new("Jalan Ahmad Yani", -6.9147, 107.6192, RoadType::MainRoad, 35.0),
        Location::new("Jalan Riau", -6.9053, 107.6147, RoadType::CityCenterRoad, 20.0),
    ]
}
