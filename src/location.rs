use std::fmt;

use serde::Serialize;

pub type PointId = String;

/// 一个带标识的地理坐标点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub id: PointId,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(id: impl Into<PointId>, lat: f64, lon: f64) -> Self {
        Self { id: id.into(), lat, lon }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {:.6}, {:.6})", self.id, self.lat, self.lon)
    }
}
