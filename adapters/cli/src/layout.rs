//! Parsing of defender placements supplied on the command line.

use std::str::FromStr;

use garden_defense_core::{CellCoord, DefenderKind, UnknownDefenderKind};
use thiserror::Error;

/// Separates the defender name from its cell.
const KIND_DELIMITER: char = '@';
/// Separates the row from the column.
const CELL_DELIMITER: char = ',';

/// Defender to plant before the session starts, written `KIND@ROW,COL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlantSpec {
    pub(crate) kind: DefenderKind,
    pub(crate) cell: CellCoord,
}

/// Errors produced while parsing a [`PlantSpec`].
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LayoutError {
    /// The `@` between kind and cell is missing.
    #[error("expected KIND@ROW,COL, got `{0}`")]
    MissingKindDelimiter(String),
    /// The `,` between row and column is missing.
    #[error("expected ROW,COL after `@`, got `{0}`")]
    MissingCellDelimiter(String),
    /// The defender name is not recognised.
    #[error(transparent)]
    UnknownKind(#[from] UnknownDefenderKind),
    /// A row or column is not a non-negative integer.
    #[error("invalid grid coordinate `{0}`")]
    InvalidCoordinate(String),
}

impl FromStr for PlantSpec {
    type Err = LayoutError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (kind, cell) = trimmed
            .split_once(KIND_DELIMITER)
            .ok_or_else(|| LayoutError::MissingKindDelimiter(trimmed.to_owned()))?;
        let (row, column) = cell
            .split_once(CELL_DELIMITER)
            .ok_or_else(|| LayoutError::MissingCellDelimiter(cell.to_owned()))?;

        Ok(Self {
            kind: kind.trim().parse()?,
            cell: CellCoord::new(parse_coordinate(column)?, parse_coordinate(row)?),
        })
    }
}

fn parse_coordinate(value: &str) -> Result<u32, LayoutError> {
    let trimmed = value.trim();
    trimmed
        .parse()
        .map_err(|_| LayoutError::InvalidCoordinate(trimmed.to_owned()))
}
