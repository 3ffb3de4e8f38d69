//! WKT文本读取
//!
//! 文本解析交给 wkt crate，得到 geo 的几何类型后再收敛到本库的封闭几何模型

use wkt::TryFromWkt;

use super::{Coordinate, Geometry};
use crate::error::MetacardResult;
use crate::i18n::{t, tf};

/// 解析WKT文本
///
/// 空白文本在解析前直接拒绝；Multi* 类型按集合处理，成员顺序不变
pub fn read_wkt(text: &str) -> MetacardResult<Geometry> {
    if text.trim().is_empty() {
        return Err(crate::metacard_error!(invalid_input, t("error.wkt_empty")));
    }

    let parsed = geo::Geometry::<f64>::try_from_wkt_str(text)
        .map_err(|e| {
            crate::metacard_error!(geometry_parse, tf("error.wkt_parse", &[("message", &e.to_string())]))
        })?;

    Geometry::try_from(parsed)
}

fn ring(line: &geo::LineString<f64>) -> Vec<Coordinate> {
    line.coords().map(|c| Coordinate::from(*c)).collect()
}

impl TryFrom<geo::Geometry<f64>> for Geometry {
    type Error = crate::error::MetacardError;

    fn try_from(geometry: geo::Geometry<f64>) -> MetacardResult<Self> {
        match geometry {
            geo::Geometry::Point(point) => Ok(Geometry::Point(Coordinate::from(point.0))),
            geo::Geometry::Line(line) => Ok(Geometry::LineString(vec![
                Coordinate::from(line.start),
                Coordinate::from(line.end),
            ])),
            geo::Geometry::LineString(line) => Ok(Geometry::LineString(ring(&line))),
            geo::Geometry::Polygon(polygon) => Ok(Geometry::Polygon(ring(polygon.exterior()))),
            geo::Geometry::MultiPoint(points) => Ok(Geometry::Collection(
                points
                    .0
                    .into_iter()
                    .map(|p| Geometry::Point(Coordinate::from(p.0)))
                    .collect(),
            )),
            geo::Geometry::MultiLineString(lines) => Ok(Geometry::Collection(
                lines
                    .0
                    .iter()
                    .map(|l| Geometry::LineString(ring(l)))
                    .collect(),
            )),
            geo::Geometry::MultiPolygon(polygons) => Ok(Geometry::Collection(
                polygons
                    .0
                    .iter()
                    .map(|p| Geometry::Polygon(ring(p.exterior())))
                    .collect(),
            )),
            geo::Geometry::GeometryCollection(collection) => collection
                .0
                .into_iter()
                .map(Geometry::try_from)
                .collect::<MetacardResult<Vec<_>>>()
                .map(Geometry::Collection),
            geo::Geometry::Rect(_) => Err(crate::metacard_error!(unsupported_geometry, "Rect")),
            geo::Geometry::Triangle(_) => {
                Err(crate::metacard_error!(unsupported_geometry, "Triangle"))
            }
        }
    }
}
