pub mod geocoding;
pub mod kokuji;
pub mod landuse;
