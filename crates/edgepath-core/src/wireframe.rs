//! Wireframe input: the plain data a mesh host hands over.
//!
//! A [`Wireframe`] is loaded from JSON or from a Wavefront OBJ file and
//! turned into a [`GraphModel`] snapshot. The world matrix, when present,
//! is applied on request, and every coordinate is rounded so that exact
//! comparisons between vertices are stable.

use crate::error::{Error, GraphError, Result};
use crate::geometry::{round_to, Point, COORDINATE_DECIMALS};
use crate::graph::{GraphModel, VertexId};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Mesh vertices and edges as exported by a modelling host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wireframe {
    /// Object name, used as the SVG polyline id
    #[serde(default)]
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    pub edges: Vec<[VertexId; 2]>,
    /// Selected vertex indices
    #[serde(default)]
    pub selected: Vec<VertexId>,
    /// Row-major object-to-world matrix
    #[serde(default)]
    pub matrix_world: Option<[[f64; 4]; 4]>,
}

impl Wireframe {
    /// Load a wireframe, choosing the parser from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let content = std::fs::read_to_string(path)?;
        let mut wireframe = match ext.as_str() {
            "json" => Self::from_json(&content)?,
            "obj" => Self::from_obj(&content)?,
            other => return Err(Error::UnsupportedFormat(other.to_string())),
        };

        if wireframe.name.is_empty() {
            wireframe.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("outline")
                .to_string();
        }

        debug!(
            path = %path.display(),
            vertices = wireframe.vertices.len(),
            edges = wireframe.edges.len(),
            "Loaded wireframe"
        );
        Ok(wireframe)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse Wavefront OBJ text.
    ///
    /// `v` lines become vertices, `l` elements become consecutive edges and
    /// `f` faces contribute their boundary edges once per unordered pair.
    /// The first `o` line names the object.
    pub fn from_obj(content: &str) -> Result<Self> {
        let mut wireframe = Self::default();
        let mut face_edges: HashSet<(VertexId, VertexId)> = HashSet::new();

        for (number, raw) in content.lines().enumerate() {
            let line = number + 1;
            let text = raw.split('#').next().unwrap_or("").trim();
            let mut fields = text.split_whitespace();
            let Some(keyword) = fields.next() else {
                continue;
            };

            match keyword {
                "o" if wireframe.name.is_empty() => {
                    wireframe.name = fields.collect::<Vec<_>>().join(" ");
                }
                "v" => {
                    let coords = fields
                        .take(3)
                        .map(|f| {
                            f.parse::<f64>().map_err(|e| Error::ObjParse {
                                line,
                                reason: format!("invalid coordinate '{}': {}", f, e),
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    if coords.len() != 3 {
                        return Err(Error::ObjParse {
                            line,
                            reason: "vertex needs three coordinates".to_string(),
                        });
                    }
                    wireframe.vertices.push([coords[0], coords[1], coords[2]]);
                }
                "l" => {
                    let indices = parse_indices(fields, line)?;
                    for pair in indices.windows(2) {
                        wireframe.edges.push([pair[0], pair[1]]);
                    }
                }
                "f" => {
                    let indices = parse_indices(fields, line)?;
                    if indices.len() < 3 {
                        return Err(Error::ObjParse {
                            line,
                            reason: "face needs at least three vertices".to_string(),
                        });
                    }
                    let ring = indices.iter().zip(indices.iter().cycle().skip(1));
                    for (&a, &b) in ring {
                        if face_edges.insert((a.min(b), a.max(b))) {
                            wireframe.edges.push([a, b]);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(wireframe)
    }

    /// World matrix, if one was supplied
    pub fn world_matrix(&self) -> Option<Matrix4<f64>> {
        self.matrix_world.map(|rows| {
            Matrix4::from_row_slice(&[
                rows[0][0], rows[0][1], rows[0][2], rows[0][3], rows[1][0], rows[1][1],
                rows[1][2], rows[1][3], rows[2][0], rows[2][1], rows[2][2], rows[2][3],
                rows[3][0], rows[3][1], rows[3][2], rows[3][3],
            ])
        })
    }

    /// Vertex positions, optionally in world space, rounded to five decimals
    pub fn points(&self, apply_transform: bool) -> Vec<Point> {
        let matrix = if apply_transform {
            self.world_matrix()
        } else {
            None
        };

        self.vertices
            .iter()
            .map(|&[x, y, z]| {
                let p = Point::new(x, y, z);
                let p = match &matrix {
                    Some(m) => m.transform_point(&p),
                    None => p,
                };
                p.map(|c| round_to(c, COORDINATE_DECIMALS))
            })
            .collect()
    }

    /// Snapshot this wireframe into an immutable graph
    pub fn graph(&self, apply_transform: bool) -> std::result::Result<GraphModel, GraphError> {
        GraphModel::new(self.points(apply_transform), &self.edges)
    }

    /// Resolve the start vertex for a chain walk.
    ///
    /// An explicit vertex wins; otherwise exactly one vertex must be selected.
    pub fn start_vertex(&self, explicit: Option<VertexId>) -> Result<VertexId> {
        let vertex = match (explicit, self.selected.as_slice()) {
            (Some(v), _) => v,
            (None, [v]) => *v,
            (None, selected) => {
                return Err(Error::StartSelection {
                    selected: selected.len(),
                })
            }
        };

        if vertex >= self.vertices.len() {
            return Err(GraphError::UnknownVertex {
                vertex,
                vertex_count: self.vertices.len(),
            }
            .into());
        }
        Ok(vertex)
    }
}

/// Parse OBJ vertex references (`7`, `7/1`, `7/1/3`) into 0-based indices
fn parse_indices<'a>(fields: impl Iterator<Item = &'a str>, line: usize) -> Result<Vec<VertexId>> {
    fields
        .map(|field| {
            let head = field.split('/').next().unwrap_or(field);
            match head.parse::<usize>() {
                Ok(index) if index > 0 => Ok(index - 1),
                _ => Err(Error::ObjParse {
                    line,
                    reason: format!("invalid vertex reference '{}'", field),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obj_polyline_elements() {
        let obj = "o Outline\nv 0 0 0\nv 1 0 0\nv 1 1 0\nl 1 2 3\n";
        let wf = Wireframe::from_obj(obj).unwrap();
        assert_eq!(wf.name, "Outline");
        assert_eq!(wf.vertices.len(), 3);
        assert_eq!(wf.edges, vec![[0, 1], [1, 2]]);
    }

    #[test]
    fn test_obj_faces_share_edges_once() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1/1 3/1 4/1\n";
        let wf = Wireframe::from_obj(obj).unwrap();
        assert_eq!(wf.edges, vec![[0, 1], [1, 2], [2, 0], [2, 3], [3, 0]]);
    }

    #[test]
    fn test_obj_rejects_bad_reference() {
        let err = Wireframe::from_obj("v 0 0 0\nl 1 0\n").unwrap_err();
        assert!(matches!(err, Error::ObjParse { line: 2, .. }));

        let err = Wireframe::from_obj("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, Error::ObjParse { line: 1, .. }));
    }

    #[test]
    fn test_points_apply_world_matrix_and_round() {
        let wf = Wireframe {
            vertices: vec![[1.0, 2.0, 0.0000049]],
            matrix_world: Some([
                [2.0, 0.0, 0.0, 10.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            ..Default::default()
        };
        assert_eq!(wf.points(true), vec![Point::new(12.0, 2.0, 0.0)]);
        assert_eq!(wf.points(false), vec![Point::new(1.0, 2.0, 0.0)]);
    }

    #[test]
    fn test_start_vertex_selection() {
        let mut wf = Wireframe {
            vertices: vec![[0.0; 3], [1.0, 0.0, 0.0]],
            edges: vec![[0, 1]],
            ..Default::default()
        };
        assert!(matches!(
            wf.start_vertex(None),
            Err(Error::StartSelection { selected: 0 })
        ));
        assert_eq!(wf.start_vertex(Some(1)).unwrap(), 1);

        wf.selected = vec![1];
        assert_eq!(wf.start_vertex(None).unwrap(), 1);

        wf.selected = vec![0, 1];
        assert!(matches!(
            wf.start_vertex(None),
            Err(Error::StartSelection { selected: 2 })
        ));
        assert!(wf.start_vertex(Some(5)).is_err());
    }

    #[test]
    fn test_json_defaults() {
        let wf = Wireframe::from_json(r#"{"vertices": [[0,0,0],[1,0,0]], "edges": [[0,1]]}"#)
            .unwrap();
        assert!(wf.selected.is_empty());
        assert!(wf.matrix_world.is_none());
        assert_eq!(wf.graph(true).unwrap().edge_count(), 1);
    }
}
