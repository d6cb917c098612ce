//! Parser for the `v`/`f` subset of Wavefront OBJ
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};
use nalgebra::Vector3;
use nom::{
    branch::alt,
    character::complete::{char, space0, space1, u32 as index},
    combinator::{all_consuming, map},
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

use crate::geometry::IndexedMesh;

/// Failure to produce a mesh from a file or stream
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open file `{}`: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read mesh data: {0}")]
    Read(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A malformed line; loading stops at the first one
#[derive(Debug, Error, PartialEq)]
#[error("line {line_number}: {kind}: `{line}`")]
pub struct ParseError {
    pub line_number: usize,
    pub line: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("unparsable line")]
    Unparsable,
    #[error("face index {index} out of range 1..={vertex_count}")]
    IndexOutOfRange { index: usize, vertex_count: usize },
    #[error("vertex coordinate is not finite")]
    NonFiniteCoordinate,
    #[error("face has zero area")]
    DegenerateFace,
}

#[derive(Debug)]
enum Line {
    Vertex(Vector3<f32>),
    Face([usize; 3]),
}

fn coordinate(input: &str) -> IResult<&str, f32> {
    preceded(space1, float)(input)
}

fn vertex_index(input: &str) -> IResult<&str, usize> {
    map(preceded(space1, index), |i| i as usize)(input)
}

fn parse_vertex(input: &str) -> IResult<&str, Line> {
    map(
        preceded(char('v'), tuple((coordinate, coordinate, coordinate))),
        |(x, y, z)| Line::Vertex(Vector3::new(x, y, z)),
    )(input)
}

fn parse_face(input: &str) -> IResult<&str, Line> {
    map(
        preceded(char('f'), tuple((vertex_index, vertex_index, vertex_index))),
        |(a, b, c)| Line::Face([a, b, c]),
    )(input)
}

fn parse_line(input: &str) -> Option<Line> {
    all_consuming(terminated(alt((parse_vertex, parse_face)), space0))(input)
        .ok()
        .map(|(_, line)| line)
}

/// Parse mesh data from a buffered reader.
///
/// Vertices are numbered from 1 in the order they appear; faces may only
/// reference vertices seen before them. Blank lines are skipped.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<IndexedMesh, LoadError> {
    let mut mesh = IndexedMesh::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end();
        if trimmed.trim_start().is_empty() {
            continue;
        }

        let error = |kind| ParseError {
            line_number: number + 1,
            line: trimmed.to_string(),
            kind,
        };

        match parse_line(trimmed).ok_or_else(|| error(ParseErrorKind::Unparsable))? {
            Line::Vertex(vertex) => {
                if !vertex.iter().all(|c| c.is_finite()) {
                    return Err(error(ParseErrorKind::NonFiniteCoordinate).into());
                }
                mesh.add_vertex(vertex);
            }
            Line::Face(indices) => {
                let vertex_count = mesh.vertices.len();
                if let Some(&index) = indices.iter().find(|&&i| i == 0 || i > vertex_count) {
                    return Err(error(ParseErrorKind::IndexOutOfRange {
                        index,
                        vertex_count,
                    })
                    .into());
                }
                if mesh.add_face(indices).is_none() {
                    return Err(error(ParseErrorKind::DegenerateFace).into());
                }
            }
        }
    }

    debug!(
        "parsed {} vertices and {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Parse mesh data held in memory
pub fn parse_obj_str(input: &str) -> Result<IndexedMesh, LoadError> {
    parse_obj(input.as_bytes())
}

/// Open and parse a mesh file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<IndexedMesh, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loading mesh file: {}", path.display());
    parse_obj(BufReader::new(file))
}
