//! Chart-ready summaries: the monthly timeline and the geographic drill-down.

mod geo;
mod timeline;

pub use geo::{
    CANVAS_HEIGHT, CANVAS_ORIGIN, CANVAS_WIDTH, CELL_GUTTER, CellRect, DemographicFilter,
    DistrictGrid, GeoSummary, GridCell, RegionValue, grid_dimensions,
};
pub use timeline::{
    DEFAULT_MAX_SLOTS, Timeline, TimelineBuilder, TimelineConfig, TimelineSlot, parse_date,
};
