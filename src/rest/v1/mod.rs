pub mod building_calculations;
pub mod kokuji;
pub mod landuse;
pub mod legal_info;
pub mod projects;
