//! KML几何标记转换
//!
//! 递归构建标记树；非点几何额外包一层 MultiGeometry，
//! 第一个成员是代表点，保证下游总能找到一个可点击的位置

use serde::Serialize;

use super::{Coordinate, Geometry, read_wkt};
use crate::debug_log;
use crate::error::MetacardResult;
use crate::i18n::tf;
use crate::types::{Metacard, names};

/// KML时间格式 yyyy-MM-dd'T'HH:mm:ss
const KML_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// KML几何标记树
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum KmlGeometry {
    /// 单坐标点
    Point(Coordinate),
    /// 有序坐标序列
    LineString(Vec<Coordinate>),
    /// 只有外边界的多边形
    Polygon { outer_boundary: Vec<Coordinate> },
    /// 几何集合
    MultiGeometry(Vec<KmlGeometry>),
}

impl KmlGeometry {
    /// 标记类型名称
    pub fn kind(&self) -> &'static str {
        match self {
            KmlGeometry::Point(_) => "Point",
            KmlGeometry::LineString(_) => "LineString",
            KmlGeometry::Polygon { .. } => "Polygon",
            KmlGeometry::MultiGeometry(_) => "MultiGeometry",
        }
    }
}

fn build(geometry: &Geometry) -> KmlGeometry {
    match geometry {
        Geometry::Point(coord) => KmlGeometry::Point(*coord),
        Geometry::LineString(coords) => KmlGeometry::LineString(coords.clone()),
        Geometry::Polygon(ring) => KmlGeometry::Polygon {
            outer_boundary: ring.clone(),
        },
        Geometry::Collection(members) => {
            KmlGeometry::MultiGeometry(members.iter().map(build).collect())
        }
    }
}

/// 将几何转换为KML标记
///
/// 最外层是点时原样返回；否则返回 `[代表点, 原始标记]` 两个成员的 MultiGeometry。
/// 非点几何没有任何坐标时返回 None
pub fn to_kml(geometry: &Geometry) -> Option<KmlGeometry> {
    let markup = build(geometry);
    match geometry {
        Geometry::Point(_) => Some(markup),
        _ => geometry
            .first_coordinate()
            .map(|vertex| KmlGeometry::MultiGeometry(vec![KmlGeometry::Point(vertex), markup])),
    }
}

/// 解析WKT文本并转换为KML标记
pub fn kml_from_wkt(wkt: &str) -> MetacardResult<Option<KmlGeometry>> {
    let geometry = read_wkt(wkt)?;
    Ok(to_kml(&geometry))
}

/// KML地标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placemark {
    /// 形如 `Placemark-<卡片id>`
    pub id: String,
    /// 卡片标题
    pub name: Option<String>,
    /// 生效时间，UTC
    pub time_span_begin: Option<String>,
    /// 几何标记，位置没有任何坐标时为空
    pub geometry: Option<KmlGeometry>,
}

/// 为元数据卡片生成KML地标
///
/// 卡片必须带有 `location` 属性
pub fn placemark_for_metacard(metacard: &Metacard) -> MetacardResult<Placemark> {
    let location = metacard
        .first_value(names::LOCATION)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            crate::metacard_error!(
                invalid_input,
                tf("error.location_missing", &[("id", metacard.id())])
            )
        })?;

    let geometry = kml_from_wkt(location)?;
    debug_log!(
        "生成KML地标: id={}, 几何={:?}",
        metacard.id(),
        geometry.as_ref().map(KmlGeometry::kind)
    );

    Ok(Placemark {
        id: format!("Placemark-{}", metacard.id()),
        name: metacard
            .first_value(names::TITLE)
            .and_then(|v| v.as_str())
            .map(str::to_string),
        time_span_begin: metacard
            .first_value(names::EFFECTIVE)
            .and_then(|v| v.as_date())
            .map(|dt| dt.format(KML_TIME_FORMAT).to_string()),
        geometry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetacardError;
    use crate::types::{AttributeValue, MetacardType};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_point_is_not_wrapped() {
        let kml = kml_from_wkt("POINT (2 3)").unwrap();
        assert_eq!(kml, Some(KmlGeometry::Point(c(2.0, 3.0))));
    }

    #[test]
    fn test_polygon_is_wrapped_with_first_vertex() {
        let kml = kml_from_wkt("POLYGON ((1 1, 2 1, 2 2, 1 2, 1 1))").unwrap();
        assert_eq!(
            kml,
            Some(KmlGeometry::MultiGeometry(vec![
                KmlGeometry::Point(c(1.0, 1.0)),
                KmlGeometry::Polygon {
                    outer_boundary: vec![c(1.0, 1.0), c(2.0, 1.0), c(2.0, 2.0), c(1.0, 2.0), c(1.0, 1.0)],
                },
            ]))
        );
    }

    #[test]
    fn test_empty_geometry_yields_none() {
        assert_eq!(to_kml(&Geometry::Collection(vec![])), None);
        assert_eq!(to_kml(&Geometry::LineString(vec![])), None);
    }

    #[test]
    fn test_placemark() {
        let mut metacard = Metacard::new("1234567890", Arc::new(MetacardType::basic()));
        metacard.set_value(names::TITLE, "myTitle");
        metacard.set_attribute(
            names::LOCATION,
            vec![AttributeValue::Geometry("LINESTRING (1 1, 2 1)".to_string())],
        );
        metacard.set_value(
            names::EFFECTIVE,
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 5).unwrap(),
        );

        let placemark = placemark_for_metacard(&metacard).unwrap();
        assert_eq!(placemark.id, "Placemark-1234567890");
        assert_eq!(placemark.name.as_deref(), Some("myTitle"));
        assert_eq!(placemark.time_span_begin.as_deref(), Some("2024-03-01T08:00:05"));
        match placemark.geometry {
            Some(KmlGeometry::MultiGeometry(members)) => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[0].kind(), "Point");
                assert_eq!(members[1].kind(), "LineString");
            }
            other => panic!("期望 MultiGeometry，实际 {:?}", other),
        }
    }

    #[test]
    fn test_placemark_without_location() {
        let metacard = Metacard::new("1", Arc::new(MetacardType::basic()));
        assert!(matches!(
            placemark_for_metacard(&metacard),
            Err(MetacardError::InvalidInput { .. })
        ));
    }
}
