use crate::models::view::{PathCommand, SparklinePath};

/// Flat or single-point series have no vertical extent; anchor them at
/// mid-height instead of dividing by a zero range.
const FLAT_Y: f64 = 50.0;

/// Projects a bounded numeric series onto a normalized trend path.
///
/// Each index maps to an (x, y) pair in the 100×100 unit square with y
/// inverted, so larger values render higher on screen. Purely geometric;
/// every coordinate is finite for every input.
pub struct SparklineService;

impl SparklineService {
    pub fn new() -> Self {
        Self
    }

    /// Project `values` as a line path: `MoveTo` for index 0, `LineTo`
    /// thereafter. An empty input yields an empty path.
    #[must_use]
    pub fn project(&self, values: &[f64]) -> SparklinePath {
        if values.is_empty() {
            return SparklinePath::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // A single point spans no width; anchor it at the left edge.
        let span = (values.len() - 1).max(1) as f64;

        let commands = values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let x = (i as f64 / span) * 100.0;
                let y = if max == min {
                    FLAT_Y
                } else {
                    100.0 - ((value - min) / (max - min)) * 100.0
                };
                if i == 0 {
                    PathCommand::MoveTo { x, y }
                } else {
                    PathCommand::LineTo { x, y }
                }
            })
            .collect();

        SparklinePath { commands }
    }

    /// The closed-region variant for gradient fill: the line path plus
    /// two baseline points and a close command.
    #[must_use]
    pub fn project_filled(&self, values: &[f64]) -> SparklinePath {
        let mut path = self.project(values);
        if path.is_empty() {
            return path;
        }
        path.commands.push(PathCommand::LineTo { x: 100.0, y: 100.0 });
        path.commands.push(PathCommand::LineTo { x: 0.0, y: 100.0 });
        path.commands.push(PathCommand::Close);
        path
    }
}

impl Default for SparklineService {
    fn default() -> Self {
        Self::new()
    }
}
