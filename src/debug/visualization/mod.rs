pub mod svg;

pub use svg::SvgDump;
