pub mod dataset;
pub mod feed;
pub mod headshots;
pub mod lineup;
pub mod rating;
pub mod roster;
pub mod state;
pub mod table_query;
