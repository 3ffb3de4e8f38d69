//! 几何模型
//!
//! 封闭的几何和类型，加上 WKT 读取与 KML 标记转换。
//! 新增几何种类时，所有 match 都必须同步更新

pub mod kml;
pub mod wkt_reader;

use serde::{Deserialize, Serialize};

pub use kml::{KmlGeometry, Placemark, kml_from_wkt, placemark_for_metacard, to_kml};
pub use wkt_reader::read_wkt;

/// 二维坐标，保持输入顺序 (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}

/// 几何值
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// 点
    Point(Coordinate),
    /// 折线
    LineString(Vec<Coordinate>),
    /// 多边形，只保留外环
    Polygon(Vec<Coordinate>),
    /// 异构集合，成员保持原始顺序
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// 几何类型名称
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::Collection(_) => "GeometryCollection",
        }
    }

    /// 按遍历顺序返回第一个顶点，没有任何坐标时返回 None
    pub fn first_coordinate(&self) -> Option<Coordinate> {
        match self {
            Geometry::Point(coord) => Some(*coord),
            Geometry::LineString(coords) | Geometry::Polygon(coords) => coords.first().copied(),
            Geometry::Collection(members) => members.iter().find_map(Geometry::first_coordinate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_coordinate_skips_empty_members() {
        let geometry = Geometry::Collection(vec![
            Geometry::LineString(vec![]),
            Geometry::Collection(vec![]),
            Geometry::Polygon(vec![Coordinate::new(5.0, 6.0), Coordinate::new(7.0, 8.0)]),
        ]);
        assert_eq!(geometry.first_coordinate(), Some(Coordinate::new(5.0, 6.0)));
        assert_eq!(Geometry::Collection(vec![]).first_coordinate(), None);
    }
}
