// Utility modules for osm

pub mod time_format;
