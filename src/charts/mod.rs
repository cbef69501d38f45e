//! Charts module - Chart data extraction and rendering

mod kind;
mod plotter;
mod renderer;
mod series;

pub use kind::ChartKind;
pub use plotter::ChartPlotter;
pub use renderer::{ChartError, StaticChartRenderer};
pub use series::{ChartSeries, PieSlice};

/// Line chart stroke (blue).
pub const LINE_RGB: (u8, u8, u8) = (52, 152, 219);
/// Bar fill (orange).
pub const BAR_RGB: (u8, u8, u8) = (243, 156, 18);

/// Pie slice palette, shared by the interactive and static renderers.
pub const PALETTE_RGB: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (243, 156, 18),  // Orange
    (46, 204, 113),  // Green
    (231, 76, 60),   // Red
    (155, 89, 182),  // Purple
    (121, 85, 72),   // Brown
    (233, 30, 99),   // Pink
    (96, 125, 139),  // Blue Grey
    (26, 188, 156),  // Teal
    (0, 188, 212),   // Cyan
];
