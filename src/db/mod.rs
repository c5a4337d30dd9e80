pub mod building_calculation;
pub mod legal_info;
pub mod migration;
pub mod project;
pub mod project_kokuji;
