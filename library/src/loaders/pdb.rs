use crate::geometry::alias::Point;
use crate::scene::container::Scene;
use crate::scene::handles::{BoxId, MaterialHandle};
use crate::scene::primitive::{PrimitiveGeometry, PrimitiveKind};
use crate::scene::scene_error::SceneError;
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

const ATOM_RECORD: &str = "ATOM";

const NAME_COLUMNS: Range<usize> = 12..16;
const X_COLUMNS: Range<usize> = 30..38;
const Y_COLUMNS: Range<usize> = 38..46;
const Z_COLUMNS: Range<usize> = 46..54;

/// Atoms with a dedicated material and radius; any other name gets the base ones.
const KNOWN_ATOMS: [&str; 11] = ["N", "CA", "C", "O", "CB", "CG", "OD1", "OD2", "SD", "CE", "OE1"];
const BASE_MATERIAL: usize = 2;
const BASE_RADIUS: f32 = 8.0;

const POSITION_SCALE: f32 = 50.0;
const MIN_ATOMS_PER_BOX: usize = 25;

#[derive(Error, Debug)]
pub enum PdbError {
    #[error("failed to read protein data bank file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed {field} coordinate {value:?}")]
    MalformedCoordinate {
        line: usize,
        field: char,
        value: String,
    },
    #[error("first box {first_box} lies outside the {boxes_count} bounding boxes")]
    FirstBoxOutOfRange {
        first_box: usize,
        boxes_count: usize,
    },
    #[error(transparent)]
    Scene(#[from] SceneError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub name: String,
    pub position: Point,
}

impl Atom {
    #[must_use]
    fn known_index(&self) -> Option<usize> {
        KNOWN_ATOMS.iter().position(|known| *known == self.name)
    }

    #[must_use]
    pub fn material(&self) -> MaterialHandle {
        MaterialHandle(BASE_MATERIAL + self.known_index().map_or(0, |index| index + 1))
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        BASE_RADIUS * self.known_index().map_or(1.0, |index| (index + 2) as f32)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PdbSummary {
    pub atoms: usize,
    pub boxes: usize,
    pub atoms_per_box: usize,
}

#[must_use]
fn column(line: &str, columns: Range<usize>) -> &str {
    let end = columns.end.min(line.len());
    let start = columns.start.min(end);
    line.get(start..end).unwrap_or("").trim()
}

fn coordinate(line: &str, line_number: usize, field: char, columns: Range<usize>) -> Result<f32, PdbError> {
    let text = column(line, columns);
    text.parse::<f32>().map_err(|_| PdbError::MalformedCoordinate { line: line_number, field, value: text.to_string() })
}

/// Reads the `ATOM` records; every other record is skipped.
pub fn parse_atoms<R: BufRead>(source: R) -> Result<Vec<Atom>, PdbError> {
    let mut atoms = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line?;
        if !line.starts_with(ATOM_RECORD) {
            continue;
        }
        let line_number = index + 1;
        atoms.push(Atom {
            name: column(&line, NAME_COLUMNS).to_string(),
            position: Point::new(
                coordinate(&line, line_number, 'x', X_COLUMNS)?,
                coordinate(&line, line_number, 'y', Y_COLUMNS)?,
                coordinate(&line, line_number, 'z', Z_COLUMNS)?,
            ),
        });
    }
    Ok(atoms)
}

/// Midpoint of the axis-aligned extent of all atoms.
#[must_use]
fn molecule_center(atoms: &[Atom]) -> Point {
    let Some(first) = atoms.first() else {
        return Point::new(0.0, 0.0, 0.0);
    };
    let (min, max) = atoms.iter().fold((first.position, first.position), |(min, max), atom| {
        (
            Point::new(min.x.min(atom.position.x), min.y.min(atom.position.y), min.z.min(atom.position.z)),
            Point::new(max.x.max(atom.position.x), max.y.max(atom.position.y), max.z.max(atom.position.z)),
        )
    });
    Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0, (min.z + max.z) / 2.0)
}

/// Adds one sphere per atom, centered on the molecule and spread over
/// consecutive boxes starting at `first_box`. Material handles follow the
/// atom names; a material the scene does not have leaves the sphere untextured.
pub fn add_atoms(scene: &mut Scene, atoms: &[Atom], first_box: BoxId) -> Result<PdbSummary, PdbError> {
    let boxes_count = scene.boxes().capacity();
    if first_box.0 >= boxes_count {
        return Err(PdbError::FirstBoxOutOfRange { first_box: first_box.0, boxes_count });
    }

    let atoms_per_box = ((atoms.len() + boxes_count) / (boxes_count - first_box.0))
        .max(MIN_ATOMS_PER_BOX)
        .min(scene.boxes().members_per_box());
    let center = molecule_center(atoms);
    let mut missing_materials = 0;

    for (index, atom) in atoms.iter().enumerate() {
        let target_box = BoxId(first_box.0 + index / atoms_per_box);
        let position = Point::new(
            POSITION_SCALE * (atom.position.x - center.x),
            POSITION_SCALE * (atom.position.y - center.y),
            POSITION_SCALE * (atom.position.z - center.z),
        );
        let material = Some(atom.material()).filter(|handle| handle.0 < scene.materials_count());
        if material.is_none() {
            missing_materials += 1;
        }

        let handle = scene.add_primitive(PrimitiveKind::Sphere)?;
        scene.set_primitive(handle, Some(target_box), &PrimitiveGeometry::sphere(position, atom.radius()), material);
    }

    if missing_materials > 0 {
        warn!("{} atoms refer to materials the scene does not have", missing_materials);
    }

    let boxes = if atoms.is_empty() { 0 } else { (atoms.len() - 1) / atoms_per_box + 1 };
    Ok(PdbSummary { atoms: atoms.len(), boxes, atoms_per_box })
}

pub fn load_pdb(path: impl AsRef<Path>, scene: &mut Scene, first_box: BoxId) -> Result<PdbSummary, PdbError> {
    let path = path.as_ref();
    let loaded = File::open(path)
        .map_err(PdbError::from)
        .and_then(|file| parse_atoms(BufReader::new(file)))
        .and_then(|atoms| add_atoms(scene, &atoms, first_box));

    match &loaded {
        Ok(summary) => info!(
            "{}: {} atoms in {} boxes, {} atoms per box",
            path.display(),
            summary.atoms,
            summary.boxes,
            summary.atoms_per_box,
        ),
        Err(failure) => error!("failed to load {}: {}", path.display(), failure),
    }
    loaded
}
