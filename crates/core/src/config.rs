use crate::{
    cells::{
        AnyCells, CellAxis, CellIndex, HexagonalCells, OrthogonalCells,
        StaggeredCells,
    },
    geometry::{Vector2f, Vector2i},
};
use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::{Validate, ValidationError};

/// The shape of the cells in a layer
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CellOrientation {
    Orthogonal,
    Staggered,
    Hexagonal,
}

/// Configuration that defines the cells of a layer. This is the serializable
/// counterpart to [AnyCells]: use [Self::build] to get the real thing.
///
/// Not every field applies to every orientation. `axis` and `index` only
/// matter for staggered and hexagonal cells, `side_length` and `radius` only
/// for hexagonal cells. Fields that don't apply are ignored, including by
/// validation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_cells_config"))]
#[serde(default)]
pub struct CellsConfig {
    pub orientation: CellOrientation,

    /// Width of a single tile's bounding box, in world units
    pub tile_width: f32,

    /// Height of a single tile's bounding box, in world units
    pub tile_height: f32,

    /// Length of the hexagon edges that run parallel to the staggered lines.
    /// Can't be longer than the tile across those lines, i.e. `tile_height`
    /// for [CellAxis::Y] and `tile_width` for [CellAxis::X].
    pub side_length: f32,

    /// If given, build **regular** hexagons with this circumradius. The tile
    /// size and side length are derived from it and the corresponding fields
    /// are ignored.
    pub radius: Option<f32>,

    pub axis: CellAxis,

    pub index: CellIndex,
}

impl CellsConfig {
    /// Validate this config, then build the cells it describes. If validation
    /// fails, the returned error can be downcast to
    /// [ValidationErrors](validator::ValidationErrors).
    pub fn build(&self) -> anyhow::Result<AnyCells> {
        self.validate().context("invalid cells config")?;

        let tile_size = Vector2f::new(self.tile_width, self.tile_height);
        let cells: AnyCells = match self.orientation {
            CellOrientation::Orthogonal => {
                OrthogonalCells::new(tile_size).into()
            }
            CellOrientation::Staggered => {
                StaggeredCells::new(tile_size, self.axis, self.index).into()
            }
            CellOrientation::Hexagonal => match self.radius {
                Some(radius) => {
                    HexagonalCells::regular(radius, self.axis, self.index)
                        .into()
                }
                None => HexagonalCells::new(
                    tile_size,
                    self.side_length,
                    self.axis,
                    self.index,
                )
                .into(),
            },
        };
        debug!("Built {:?} from {:?}", cells, self);
        Ok(cells)
    }
}

impl Default for CellsConfig {
    fn default() -> Self {
        Self {
            orientation: CellOrientation::Orthogonal,
            tile_width: 32.0,
            tile_height: 32.0,
            side_length: 16.0,
            radius: None,
            axis: CellAxis::Y,
            index: CellIndex::Odd,
        }
    }
}

/// Cross-field validation for [CellsConfig]. Which fields are checked depends
/// on the orientation.
fn validate_cells_config(config: &CellsConfig) -> Result<(), ValidationError> {
    fn is_positive(value: f32) -> bool {
        value.is_finite() && value > 0.0
    }

    // A regular hexagon is fully defined by its radius
    if let (CellOrientation::Hexagonal, Some(radius)) =
        (config.orientation, config.radius)
    {
        return if is_positive(radius) {
            Ok(())
        } else {
            Err(ValidationError::new("radius_not_positive"))
        };
    }

    if !is_positive(config.tile_width) || !is_positive(config.tile_height) {
        return Err(ValidationError::new("tile_size_not_positive"));
    }

    if config.orientation == CellOrientation::Hexagonal {
        let tile_across = match config.axis {
            CellAxis::X => config.tile_width,
            CellAxis::Y => config.tile_height,
        };
        if !is_positive(config.side_length) {
            return Err(ValidationError::new("side_length_not_positive"));
        }
        if config.side_length > tile_across {
            return Err(ValidationError::new("side_length_too_long"));
        }
    }

    Ok(())
}

/// Configuration for a whole layer: the shape of its cells, how many there
/// are, and how thick the grid outline is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayerConfig {
    /// Number of columns
    #[validate(range(min = 0, max = 100000))]
    pub width: u32,

    /// Number of rows
    #[validate(range(min = 0, max = 100000))]
    pub height: u32,

    /// Width of the grid outline, in world units. The outline is centered on
    /// the cell edges, and grows the drawn area by this much on every side.
    #[validate(range(min = 0.0))]
    pub line_width: f32,

    // Tables have to come after plain values for TOML output
    #[validate]
    pub cells: CellsConfig,
}

impl LayerConfig {
    /// Validate the entire layer config, then build its cells. See
    /// [CellsConfig::build].
    pub fn build(&self) -> anyhow::Result<AnyCells> {
        self.validate().context("invalid layer config")?;
        debug!("Building cells for {}x{} layer", self.width, self.height);
        self.cells.build()
    }

    /// Layer dimensions in cells
    pub fn layer_size(&self) -> Vector2i {
        // Validation keeps both well within i32
        Vector2i::new(self.width as i32, self.height as i32)
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            line_width: 1.0,
            cells: CellsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens, assert_tokens, Token};
    use std::str::FromStr;

    #[test]
    fn test_default_is_valid() {
        assert!(CellsConfig::default().validate().is_ok());
        assert!(LayerConfig::default().validate().is_ok());
        assert_eq!(
            LayerConfig::default().layer_size(),
            Vector2i::new(16, 16)
        );
    }

    #[test]
    fn test_build_orthogonal() {
        let cells = CellsConfig::default().build().unwrap();
        assert_eq!(
            cells,
            AnyCells::Orthogonal(OrthogonalCells::new(Vector2f::new(
                32.0, 32.0
            )))
        );
    }

    #[test]
    fn test_build_regular_hexagons() {
        let config = CellsConfig {
            orientation: CellOrientation::Hexagonal,
            // Both of these get ignored in favor of the radius
            tile_width: -1.0,
            side_length: 1000.0,
            radius: Some(10.0),
            axis: CellAxis::X,
            index: CellIndex::Even,
            ..Default::default()
        };
        assert_eq!(
            config.build().unwrap(),
            AnyCells::Hexagonal(HexagonalCells::regular(
                10.0,
                CellAxis::X,
                CellIndex::Even
            ))
        );
    }

    #[test]
    fn test_hexagon_side_length() {
        let mut config = CellsConfig {
            orientation: CellOrientation::Hexagonal,
            tile_width: 40.0,
            tile_height: 20.0,
            side_length: 30.0,
            ..Default::default()
        };
        // Pointy top, so the side can't be longer than the tile height
        assert!(config.validate().is_err());
        // Flat top, it's compared to the width instead
        config.axis = CellAxis::X;
        assert!(config.validate().is_ok());

        config.side_length = 0.0;
        assert!(config.validate().is_err());

        // Side length doesn't matter for other orientations
        config.orientation = CellOrientation::Staggered;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_tile_size() {
        for (width, height) in [(0.0, 32.0), (32.0, -1.0), (f32::NAN, 32.0)] {
            let config = CellsConfig {
                tile_width: width,
                tile_height: height,
                ..Default::default()
            };
            assert!(
                config.build().is_err(),
                "expected {}x{} to be invalid",
                width,
                height
            );
        }
    }

    #[test]
    fn test_orientation_serde() {
        assert_tokens(
            &CellOrientation::Hexagonal,
            &[Token::UnitVariant {
                name: "CellOrientation",
                variant: "hexagonal",
            }],
        );
        assert_eq!(
            CellOrientation::from_str("staggered").unwrap(),
            CellOrientation::Staggered
        );
        assert_eq!(CellOrientation::Orthogonal.to_string(), "orthogonal");
    }

    #[test]
    fn test_deserialize_partial() {
        // Missing fields fall back to the defaults
        assert_de_tokens(
            &CellsConfig {
                orientation: CellOrientation::Staggered,
                tile_width: 64.0,
                axis: CellAxis::X,
                ..Default::default()
            },
            &[
                Token::Struct {
                    name: "CellsConfig",
                    len: 3,
                },
                Token::Str("orientation"),
                Token::UnitVariant {
                    name: "CellOrientation",
                    variant: "staggered",
                },
                Token::Str("tile_width"),
                Token::F32(64.0),
                Token::Str("axis"),
                Token::UnitVariant {
                    name: "CellAxis",
                    variant: "x",
                },
                Token::StructEnd,
            ],
        );
    }
}
